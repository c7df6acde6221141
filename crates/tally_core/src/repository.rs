use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TaskError;
use crate::streak::StreakState;
use crate::task::{NewTask, Task, TaskCompletion};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_streak_check: Option<NaiveDate>,
}

impl Profile {
    pub fn streak_state(&self) -> StreakState {
        StreakState {
            streak: self.streak,
            last_check: self.last_streak_check,
        }
    }
}

/// Partial profile write; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub streak: Option<u32>,
    pub last_streak_check: Option<NaiveDate>,
}

impl From<StreakState> for ProfileUpdate {
    fn from(state: StreakState) -> Self {
        Self {
            streak: Some(state.streak),
            last_streak_check: state.last_check,
        }
    }
}

impl ProfileUpdate {
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(streak) = self.streak {
            profile.streak = streak;
        }
        if let Some(date) = self.last_streak_check {
            profile.last_streak_check = Some(date);
        }
    }
}

/// Storage backend for tasks, completions and the profile. Implementations
/// own all I/O; the evaluation code only sees the returned collections.
pub trait TaskRepository: Send + Sync {
    fn list_tasks(&self) -> Result<Vec<Task>>;
    fn list_completions(&self) -> Result<Vec<TaskCompletion>>;
    fn create_task(&self, draft: NewTask) -> Result<Task>;
    /// Returns the existing record when one already exists for the pair.
    fn create_completion(&self, task_id: &str, date: NaiveDate) -> Result<TaskCompletion>;
    fn delete_completion(&self, task_id: &str, date: NaiveDate) -> Result<()>;
    fn profile(&self) -> Result<Profile>;
    fn update_profile(&self, update: ProfileUpdate) -> Result<Profile>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for Arc<R> {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        (**self).list_tasks()
    }

    fn list_completions(&self) -> Result<Vec<TaskCompletion>> {
        (**self).list_completions()
    }

    fn create_task(&self, draft: NewTask) -> Result<Task> {
        (**self).create_task(draft)
    }

    fn create_completion(&self, task_id: &str, date: NaiveDate) -> Result<TaskCompletion> {
        (**self).create_completion(task_id, date)
    }

    fn delete_completion(&self, task_id: &str, date: NaiveDate) -> Result<()> {
        (**self).delete_completion(task_id, date)
    }

    fn profile(&self) -> Result<Profile> {
        (**self).profile()
    }

    fn update_profile(&self, update: ProfileUpdate) -> Result<Profile> {
        (**self).update_profile(update)
    }
}

/// Plain in-memory collections shared by the in-memory and file-backed stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub completions: Vec<TaskCompletion>,
    #[serde(default)]
    pub profile: Profile,
}

impl StoreData {
    pub fn insert_task(&mut self, draft: NewTask) -> Result<Task> {
        let draft = draft.validate()?;
        let task = draft.into_task(Uuid::new_v4().to_string(), Utc::now());
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn upsert_completion(&mut self, task_id: &str, date: NaiveDate) -> Result<TaskCompletion> {
        if !self.tasks.iter().any(|task| task.id == task_id) {
            return Err(TaskError::UnknownTask(task_id.to_string()).into());
        }
        if let Some(existing) = self
            .completions
            .iter()
            .find(|completion| completion.matches(task_id, date))
        {
            return Ok(existing.clone());
        }
        let completion = TaskCompletion {
            id: Uuid::new_v4().to_string(),
            task_id: task_id.to_string(),
            completion_date: date,
        };
        self.completions.push(completion.clone());
        Ok(completion)
    }

    pub fn remove_completion(&mut self, task_id: &str, date: NaiveDate) {
        self.completions
            .retain(|completion| !completion.matches(task_id, date));
    }

    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Profile {
        update.apply(&mut self.profile);
        self.profile.clone()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    data: RwLock<StoreData>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: StoreData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub fn snapshot(&self) -> StoreData {
        self.data.read().clone()
    }
}

impl TaskRepository for InMemoryRepository {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.data.read().tasks.clone())
    }

    fn list_completions(&self) -> Result<Vec<TaskCompletion>> {
        Ok(self.data.read().completions.clone())
    }

    fn create_task(&self, draft: NewTask) -> Result<Task> {
        self.data.write().insert_task(draft)
    }

    fn create_completion(&self, task_id: &str, date: NaiveDate) -> Result<TaskCompletion> {
        self.data.write().upsert_completion(task_id, date)
    }

    fn delete_completion(&self, task_id: &str, date: NaiveDate) -> Result<()> {
        self.data.write().remove_completion(task_id, date);
        Ok(())
    }

    fn profile(&self) -> Result<Profile> {
        Ok(self.data.read().profile.clone())
    }

    fn update_profile(&self, update: ProfileUpdate) -> Result<Profile> {
        Ok(self.data.write().update_profile(&update))
    }
}
