use serde::{ Serialize, Deserialize };
use uuid::Uuid;
use chrono::{NaiveDate, DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CycleRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl CycleRecord {
    /// Days of flow, both ends inclusive.
    pub fn duration(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCycle {
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewCycle {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.end_date < self.start_date {
            return Err("End date cannot be before start date.");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CycleStat {
    pub cycle_number: i32,
    pub start_date: NaiveDate,
    pub period_length: i64,
    pub cycle_length: Option<i64>, // None for the ongoing cycle
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MonthlyDuration {
    pub month: NaiveDate, // first day of the month
    pub label: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration: i64,
}

#[derive(Debug, Serialize)]
pub struct CycleStatsResponse {
    pub average_period_length: f64,
    pub average_cycle_length: f64,
    pub cycle_stats: Vec<CycleStat>,
    pub history: Vec<MonthlyDuration>,
}
