//! Plan, goal, task and reflection records.

mod types;

pub use types::{
    Goal, GoalDraft, GoalStatus, LifePlan, Priority, ReflectionEntry, Task, TaskDraft, TaskStatus,
};
