use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::completion_day;
use crate::core::serde_fields::{opt_date, opt_time, opt_timestamp};
use crate::error::QuasarError;

/// Purpose, vision and values statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifePlan {
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub vision: String,
}

impl Default for LifePlan {
    fn default() -> Self {
        Self {
            purpose: "Build a life of purpose, growth and positive impact.".to_string(),
            values: vec![
                "Integrity".to_string(),
                "Learning".to_string(),
                "Creativity".to_string(),
            ],
            vision: "Be a recognized expert in my field, enjoying a balanced life with strong relationships."
                .to_string(),
        }
    }
}

impl LifePlan {
    /// Split a comma-separated values string into trimmed, non-empty values.
    #[must_use]
    pub fn parse_values(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalStatus {
    #[serde(alias = "No Iniciado")]
    NotStarted,
    #[serde(alias = "En Progreso")]
    InProgress,
    #[serde(alias = "Completado")]
    Completed,
    #[serde(alias = "En Pausa")]
    OnHold,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "not-started",
            GoalStatus::InProgress => "in-progress",
            GoalStatus::Completed => "completed",
            GoalStatus::OnHold => "on-hold",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = QuasarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "not-started" | "notstarted" | "new" => Ok(Self::NotStarted),
            "in-progress" | "inprogress" | "active" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            "on-hold" | "onhold" | "paused" => Ok(Self::OnHold),
            other => Err(QuasarError::InvalidInput(format!(
                "unknown goal status '{other}' (expected not-started, in-progress, completed or on-hold)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[serde(alias = "Pendiente")]
    Pending,
    #[serde(alias = "Completado")]
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    #[serde(alias = "High")]
    High,
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Low")]
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = QuasarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Self::High),
            "medium" | "m" => Ok(Self::Medium),
            "low" | "l" => Ok(Self::Low),
            other => Err(QuasarError::InvalidInput(format!("unknown priority '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: GoalStatus,
    #[serde(default, with = "opt_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub relevance: String,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub goal_id: String,
    pub content: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "opt_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "opt_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "opt_time", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "opt_time", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, with = "opt_timestamp", skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Inclusive `(start, end)` day range, with `end` defaulting to `start`.
    ///
    /// `None` when the task has no start date.
    pub fn scheduled_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date
            .map(|start| (start, self.end_date.unwrap_or(start)))
    }

    /// Whether `day` falls inside the task's scheduled range.
    pub fn is_scheduled_on(&self, day: NaiveDate) -> bool {
        self.scheduled_range()
            .is_some_and(|(start, end)| start <= day && day <= end)
    }

    /// Calendar day the task was completed on, if recorded.
    pub fn completed_on(&self) -> Option<NaiveDate> {
        self.completion_date.map(completion_day)
    }

    /// Start and end time of day, when both are set.
    pub fn time_block(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.start_time.zip(self.end_time)
    }

    /// Mark the task completed at `at`.
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.status = TaskStatus::Completed;
        self.completion_date = Some(at);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Fields for a goal that has not been stored yet.
#[derive(Debug, Clone, Default)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub relevance: String,
}

impl GoalDraft {
    /// Check that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns `QuasarError::InvalidInput` naming the first missing field.
    pub fn validate(&self) -> Result<(), QuasarError> {
        let missing = if self.title.trim().is_empty() {
            Some("title")
        } else if self.description.trim().is_empty() {
            Some("description")
        } else if self.relevance.trim().is_empty() {
            Some("relevance")
        } else if self.due_date.is_none() {
            Some("due date")
        } else {
            None
        };

        match missing {
            Some(field) => Err(QuasarError::InvalidInput(format!("goal {field} is required"))),
            None => Ok(()),
        }
    }

    /// Build a new `NotStarted` goal with the given id.
    pub fn into_goal(self, id: String) -> Goal {
        Goal {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status: GoalStatus::NotStarted,
            due_date: self.due_date,
            relevance: self.relevance.trim().to_string(),
        }
    }
}

/// Fields for a task that has not been stored yet.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub goal_id: String,
    pub content: String,
    pub priority: Priority,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl TaskDraft {
    /// Inclusive day range of the draft, with `end` defaulting to `start`.
    pub fn scheduled_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date
            .map(|start| (start, self.end_date.unwrap_or(start)))
    }

    /// Check that the draft has content and a goal.
    ///
    /// # Errors
    ///
    /// Returns `QuasarError::InvalidInput` when content or goal is missing.
    pub fn validate(&self) -> Result<(), QuasarError> {
        if self.content.trim().is_empty() {
            return Err(QuasarError::InvalidInput("task content is required".to_string()));
        }
        if self.goal_id.trim().is_empty() {
            return Err(QuasarError::InvalidInput("task must be assigned to a goal".to_string()));
        }
        Ok(())
    }

    /// Build a new `Pending` task with the given id.
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            goal_id: self.goal_id,
            content: self.content.trim().to_string(),
            status: TaskStatus::Pending,
            priority: self.priority,
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            completion_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_reads_spanish_labels() {
        let json = r#"{"id":"g1","title":"Run","description":"10k","status":"En Progreso","dueDate":"2024-01-10","relevance":"health"}"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert_eq!(goal.due_date, NaiveDate::from_ymd_opt(2024, 1, 10));
    }

    #[test]
    fn test_goal_writes_camel_case() {
        let goal = Goal {
            id: "g1".to_string(),
            title: "Run".to_string(),
            description: String::new(),
            status: GoalStatus::OnHold,
            due_date: None,
            relevance: String::new(),
        };
        let json = serde_json::to_string(&goal).unwrap();
        assert!(json.contains(r#""status":"onHold""#));
        assert!(!json.contains("dueDate"));
    }

    #[test]
    fn test_task_reads_browser_shape() {
        let json = r#"{"id":"t1","goalId":"g1","content":"Study","status":"Completado","priority":"High",
            "startDate":"2024-01-01","endDate":"2024-01-01","startTime":"09:00","endTime":"10:00",
            "completionDate":"2024-01-01T10:05:00.000Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.is_completed());
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.completed_on(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(task.time_block().is_some());
    }

    #[test]
    fn test_task_scheduled_range_defaults_end() {
        let json = r#"{"id":"t1","goalId":"g1","content":"x","status":"pending","startDate":"2024-03-05"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(task.scheduled_range(), Some((start, start)));
        assert!(task.is_scheduled_on(start));
        assert!(!task.is_scheduled_on(start.succ_opt().unwrap()));
    }

    #[test]
    fn test_goal_status_from_str() {
        assert_eq!("in-progress".parse::<GoalStatus>().unwrap(), GoalStatus::InProgress);
        assert_eq!("On Hold".parse::<GoalStatus>().unwrap(), GoalStatus::OnHold);
        assert!("later".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(
            LifePlan::parse_values(" Integrity, Learning ,, Joy "),
            vec!["Integrity", "Learning", "Joy"]
        );
    }

    #[test]
    fn test_goal_draft_requires_all_fields() {
        let draft = GoalDraft {
            title: "Run".to_string(),
            description: "10k".to_string(),
            due_date: None,
            relevance: "health".to_string(),
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_task_draft_into_task_is_pending() {
        let draft = TaskDraft {
            goal_id: "g1".to_string(),
            content: " Read ".to_string(),
            ..TaskDraft::default()
        };
        draft.validate().unwrap();
        let task = draft.into_task("t1".to_string());
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.content, "Read");
        assert_eq!(task.priority, Priority::Medium);
    }
}
