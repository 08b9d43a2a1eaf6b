//! Core utilities shared across features.

pub mod datetime;
pub mod serde_fields;

pub use datetime::{
    completion_day, days_between, days_inclusive, format_minutes, iso_week_key,
    normalize_local_date, parse_date_arg, parse_time_of_day,
};
