//! Data persistence layer for stripboard
//!
//! Both sequences live as JSON strings in a SQLite-backed key-value
//! table; the stores own the in-memory data and mirror it to storage
//! after every mutation.

mod budget;
mod database;
mod migrations;
mod models;
mod schedule;
mod state;

pub use budget::BudgetStore;
pub use database::{Database, DatabaseError};
pub use models::{BudgetItem, Currency, Scene, SceneDraft, StatusStyle};
pub use schedule::ScheduleStore;
pub use state::{StateStore, BUDGET_KEY, CURRENCY_KEY, SCHEDULE_KEY};
