use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tally_core::{
    picker::QuoteRotation,
    repository::{Profile, ProfileUpdate, StoreData, TaskRepository},
    task::{NewTask, Task, TaskCompletion},
};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    #[serde(flatten)]
    data: StoreData,
    #[serde(default)]
    quote_rotation: QuoteRotation,
}

/// JSON document on disk holding tasks, completions, the profile and the
/// quote rotation. Every mutation is written through immediately.
pub struct JsonFileRepository {
    path: PathBuf,
    state: RwLock<StoreFile>,
}

impl JsonFileRepository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read store `{}`", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("store `{}` is not valid", path.display()))?
        } else {
            info!(path = %path.display(), "store not found, starting empty");
            StoreFile::default()
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn quote_rotation(&self) -> QuoteRotation {
        self.state.read().quote_rotation.clone()
    }

    pub fn save_quote_rotation(&self, rotation: QuoteRotation) -> Result<()> {
        let mut state = self.state.write();
        state.quote_rotation = rotation;
        self.persist(&state)
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut StoreData) -> Result<T>) -> Result<T> {
        let mut state = self.state.write();
        let value = apply(&mut state.data)?;
        self.persist(&state)?;
        Ok(value)
    }

    fn persist(&self, state: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write store `{}`", self.path.display()))?;
        debug!(path = %self.path.display(), "store saved");
        Ok(())
    }
}

impl TaskRepository for JsonFileRepository {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.state.read().data.tasks.clone())
    }

    fn list_completions(&self) -> Result<Vec<TaskCompletion>> {
        Ok(self.state.read().data.completions.clone())
    }

    fn create_task(&self, draft: NewTask) -> Result<Task> {
        self.mutate(|data| data.insert_task(draft))
    }

    fn create_completion(&self, task_id: &str, date: NaiveDate) -> Result<TaskCompletion> {
        self.mutate(|data| data.upsert_completion(task_id, date))
    }

    fn delete_completion(&self, task_id: &str, date: NaiveDate) -> Result<()> {
        self.mutate(|data| {
            data.remove_completion(task_id, date);
            Ok(())
        })
    }

    fn profile(&self) -> Result<Profile> {
        Ok(self.state.read().data.profile.clone())
    }

    fn update_profile(&self, update: ProfileUpdate) -> Result<Profile> {
        self.mutate(|data| Ok(data.update_profile(&update)))
    }
}
