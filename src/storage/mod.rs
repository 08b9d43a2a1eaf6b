//! Storage layer for quasar.
//!
//! `SQLite` persistence for the life plan, goals, tasks and reflections.

mod database;
mod migrations;
mod store;

pub use database::Database;
pub use store::{
    next_id, PlanStore, Snapshot, GOALS_KEY, PLAN_KEY, REFLECTIONS_KEY, TASKS_KEY,
};
