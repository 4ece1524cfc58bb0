pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod repository;
pub mod routes;
