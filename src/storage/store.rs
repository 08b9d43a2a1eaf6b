//! Typed access to the plan, goals, tasks and reflections.
//!
//! Each collection is one JSON document in the `kv` table, stored under the
//! same keys and in the same camelCase shape the web app used in browser
//! storage.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuasarError;
use crate::features::schedule::find_conflict;
use crate::model::{
    Goal, GoalDraft, GoalStatus, LifePlan, ReflectionEntry, Task, TaskDraft,
};

use super::Database;

pub const PLAN_KEY: &str = "nq_lifePlan";
pub const GOALS_KEY: &str = "nq_goals";
pub const TASKS_KEY: &str = "nq_tasks";
pub const REFLECTIONS_KEY: &str = "nq_reflections";

/// Every stored document at once, as exported and imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "nq_lifePlan", default)]
    pub life_plan: LifePlan,
    #[serde(rename = "nq_goals", default)]
    pub goals: Vec<Goal>,
    #[serde(rename = "nq_tasks", default)]
    pub tasks: Vec<Task>,
    #[serde(rename = "nq_reflections", default)]
    pub reflections: Vec<ReflectionEntry>,
}

impl Snapshot {
    /// Parse an export.
    ///
    /// Each key may hold the document itself or, as in a raw browser storage
    /// dump, a string containing the document's JSON. Missing keys take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `QuasarError::Parse` naming the offending key.
    pub fn from_json(input: &str) -> Result<Self, QuasarError> {
        let root: Value = serde_json::from_str(input)
            .map_err(|e| QuasarError::Parse(format!("import file is not valid JSON: {e}")))?;
        let Value::Object(map) = root else {
            return Err(QuasarError::Parse(
                "import file must contain a JSON object".to_string(),
            ));
        };

        Ok(Self {
            life_plan: document_field(&map, PLAN_KEY)?,
            goals: document_field(&map, GOALS_KEY)?,
            tasks: document_field(&map, TASKS_KEY)?,
            reflections: document_field(&map, REFLECTIONS_KEY)?,
        })
    }
}

fn document_field<T: DeserializeOwned + Default>(
    map: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<T, QuasarError> {
    let parsed = match map.get(key) {
        None | Some(Value::Null) => return Ok(T::default()),
        Some(Value::String(raw)) => serde_json::from_str(raw),
        Some(value) => serde_json::from_value(value.clone()),
    };
    parsed.map_err(|e| QuasarError::Parse(format!("'{key}': {e}")))
}

/// Build a `{prefix}{millis}` id not yet taken, bumping the number on
/// collision.
pub fn next_id(prefix: &str, now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let id = format!("{prefix}{millis}");
        if !taken(&id) {
            return id;
        }
        millis += 1;
    }
}

/// Persistent store for every quasar document.
pub struct PlanStore {
    db: Database,
}

impl PlanStore {
    /// Wrap an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Store backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self, QuasarError> {
        Database::open_in_memory().map(Self::new)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, QuasarError> {
        let Some(raw) = self.db.get(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .map_err(|e| QuasarError::Parse(format!("stored document '{key}' is corrupt: {e}")))?;
        tracing::debug!(key, "loaded document");
        Ok(Some(value))
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), QuasarError> {
        self.db.put(key, &serde_json::to_string(value)?)
    }

    /// The stored life plan, or the default plan when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn life_plan(&self) -> Result<LifePlan, QuasarError> {
        Ok(self.load(PLAN_KEY)?.unwrap_or_default())
    }

    /// Replace the life plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save_life_plan(&self, plan: &LifePlan) -> Result<(), QuasarError> {
        self.save(PLAN_KEY, plan)
    }

    /// All goals, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn goals(&self) -> Result<Vec<Goal>, QuasarError> {
        Ok(self.load(GOALS_KEY)?.unwrap_or_default())
    }

    /// All tasks, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn tasks(&self) -> Result<Vec<Task>, QuasarError> {
        Ok(self.load(TASKS_KEY)?.unwrap_or_default())
    }

    /// All reflections, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn reflections(&self) -> Result<Vec<ReflectionEntry>, QuasarError> {
        Ok(self.load(REFLECTIONS_KEY)?.unwrap_or_default())
    }

    /// Validate and store a new goal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a field is missing, or a storage error.
    pub fn add_goal(&self, draft: GoalDraft, now: DateTime<Utc>) -> Result<Goal, QuasarError> {
        draft.validate()?;
        let mut goals = self.goals()?;
        let id = next_id("g", now, |id| goals.iter().any(|g| g.id == id));
        let goal = draft.into_goal(id);
        goals.push(goal.clone());
        self.save(GOALS_KEY, &goals)?;
        tracing::info!(id = %goal.id, "added goal");
        Ok(goal)
    }

    /// Change the status of a goal.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn set_goal_status(&self, id: &str, status: GoalStatus) -> Result<Goal, QuasarError> {
        let mut goals = self.goals()?;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| QuasarError::NotFound(format!("goal '{id}'")))?;
        goal.status = status;
        let updated = goal.clone();
        self.save(GOALS_KEY, &goals)?;
        tracing::info!(id, %status, "updated goal status");
        Ok(updated)
    }

    /// Delete a goal. Its tasks are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn delete_goal(&self, id: &str) -> Result<Goal, QuasarError> {
        let mut goals = self.goals()?;
        let index = goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| QuasarError::NotFound(format!("goal '{id}'")))?;
        let removed = goals.remove(index);
        self.save(GOALS_KEY, &goals)?;
        tracing::info!(id, "deleted goal");
        Ok(removed)
    }

    /// Validate, check for time conflicts and store a new task.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for missing fields, `NotFound` for an unknown
    /// goal, `ScheduleConflict` when the time block overlaps a pending task,
    /// or a storage error.
    pub fn add_task(&self, draft: TaskDraft, now: DateTime<Utc>) -> Result<Task, QuasarError> {
        draft.validate()?;

        let goals = self.goals()?;
        if !goals.iter().any(|g| g.id == draft.goal_id) {
            return Err(QuasarError::NotFound(format!("goal '{}'", draft.goal_id)));
        }

        let mut tasks = self.tasks()?;
        if let Some(existing) = find_conflict(&draft, &tasks) {
            tracing::info!(conflict = %existing.id, "rejected overlapping task");
            return Err(QuasarError::ScheduleConflict {
                task_id: existing.id.clone(),
                content: existing.content.clone(),
            });
        }

        let id = next_id("t", now, |id| tasks.iter().any(|t| t.id == id));
        let task = draft.into_task(id);
        tasks.push(task.clone());
        self.save(TASKS_KEY, &tasks)?;
        tracing::info!(id = %task.id, goal = %task.goal_id, "added task");
        Ok(task)
    }

    /// Mark a task completed at `now`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `InvalidInput` when the task is
    /// already completed, or a storage error.
    pub fn complete_task(&self, id: &str, now: DateTime<Utc>) -> Result<Task, QuasarError> {
        let mut tasks = self.tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| QuasarError::NotFound(format!("task '{id}'")))?;
        if task.is_completed() {
            return Err(QuasarError::InvalidInput(format!(
                "task '{id}' is already completed"
            )));
        }
        task.complete(now);
        let updated = task.clone();
        self.save(TASKS_KEY, &tasks)?;
        tracing::info!(id, "completed task");
        Ok(updated)
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn delete_task(&self, id: &str) -> Result<Task, QuasarError> {
        let mut tasks = self.tasks()?;
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| QuasarError::NotFound(format!("task '{id}'")))?;
        let removed = tasks.remove(index);
        self.save(TASKS_KEY, &tasks)?;
        tracing::info!(id, "deleted task");
        Ok(removed)
    }

    /// Store a new reflection at the front of the journal, with an optional
    /// image URL. A blank image counts as none.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for blank content, or a storage error.
    pub fn add_reflection(
        &self,
        content: &str,
        image_url: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ReflectionEntry, QuasarError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(QuasarError::InvalidInput(
                "reflection content is required".to_string(),
            ));
        }
        let image_url = image_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        let mut entries = self.reflections()?;
        let id = next_id("r", now, |id| entries.iter().any(|e| e.id == id));
        let entry = ReflectionEntry {
            id,
            date: now,
            content: content.to_string(),
            image_url,
        };
        entries.insert(0, entry.clone());
        self.save(REFLECTIONS_KEY, &entries)?;
        tracing::info!(id = %entry.id, "added reflection");
        Ok(entry)
    }

    /// Snapshot of all four documents: the plan, goals, tasks and
    /// reflections.
    ///
    /// # Errors
    ///
    /// Returns an error if any document cannot be read or parsed.
    pub fn export(&self) -> Result<Snapshot, QuasarError> {
        Ok(Snapshot {
            life_plan: self.life_plan()?,
            goals: self.goals()?,
            tasks: self.tasks()?,
            reflections: self.reflections()?,
        })
    }

    /// Replace every document with the snapshot's, atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the documents cannot be written.
    pub fn import(&self, snapshot: &Snapshot) -> Result<(), QuasarError> {
        self.db.put_all(&[
            (PLAN_KEY, serde_json::to_string(&snapshot.life_plan)?),
            (GOALS_KEY, serde_json::to_string(&snapshot.goals)?),
            (TASKS_KEY, serde_json::to_string(&snapshot.tasks)?),
            (REFLECTIONS_KEY, serde_json::to_string(&snapshot.reflections)?),
        ])?;
        tracing::info!(
            goals = snapshot.goals.len(),
            tasks = snapshot.tasks.len(),
            reflections = snapshot.reflections.len(),
            "imported snapshot"
        );
        Ok(())
    }
}
