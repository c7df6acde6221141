use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDate};
use parking_lot::RwLock;
use tracing::{debug, info, instrument};

use crate::{
    agenda::{self, AgendaDay, AgendaEntry, AgendaGroups},
    due::{BiweeklyMode, Evaluator},
    error::TaskError,
    repository::{Profile, ProfileUpdate, TaskRepository},
    streak::{self, StreakUpdate},
    task::{NewTask, Task, TaskCompletion},
};

#[derive(Debug, Clone, Default)]
struct Snapshot {
    tasks: Vec<Task>,
    completions: Vec<TaskCompletion>,
    profile: Profile,
}

/// Session-level state container: caches what the repository returned and
/// routes every mutation back through it.
pub struct Tracker {
    repository: Box<dyn TaskRepository>,
    evaluator: Evaluator,
    snapshot: RwLock<Snapshot>,
}

pub struct TrackerBuilder {
    repository: Option<Box<dyn TaskRepository>>,
    biweekly_mode: BiweeklyMode,
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            biweekly_mode: BiweeklyMode::default(),
        }
    }

    pub fn repository(mut self, repository: Box<dyn TaskRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn biweekly_mode(mut self, mode: BiweeklyMode) -> Self {
        self.biweekly_mode = mode;
        self
    }

    pub fn build(self) -> Result<Tracker> {
        let repository = self
            .repository
            .ok_or_else(|| anyhow!("tracker requires a repository"))?;
        let tracker = Tracker {
            repository,
            evaluator: Evaluator::new(self.biweekly_mode),
            snapshot: RwLock::new(Snapshot::default()),
        };
        tracker.reload()?;
        Ok(tracker)
    }
}

impl Tracker {
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    #[instrument(skip(self))]
    pub fn reload(&self) -> Result<()> {
        let tasks = self.repository.list_tasks().context("failed to list tasks")?;
        let completions = self
            .repository
            .list_completions()
            .context("failed to list completions")?;
        let profile = self.repository.profile().context("failed to load profile")?;
        info!(
            tasks = tasks.len(),
            completions = completions.len(),
            "loaded tracker data"
        );
        *self.snapshot.write() = Snapshot {
            tasks,
            completions,
            profile,
        };
        Ok(())
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.snapshot.read().tasks.clone()
    }

    pub fn completions(&self) -> Vec<TaskCompletion> {
        self.snapshot.read().completions.clone()
    }

    pub fn profile(&self) -> Profile {
        self.snapshot.read().profile.clone()
    }

    #[instrument(skip(self))]
    pub fn add_task(&self, draft: NewTask) -> Result<Task> {
        let draft = draft.validate()?;
        let task = self
            .repository
            .create_task(draft)
            .context("failed to create task")?;
        info!(task_id = %task.id, recurrence = %task.recurrence, "task created");
        self.snapshot.write().tasks.push(task.clone());
        Ok(task)
    }

    pub fn agenda(&self, date: NaiveDate) -> Vec<AgendaEntry> {
        let snapshot = self.snapshot.read();
        agenda::agenda_for(&self.evaluator, &snapshot.tasks, &snapshot.completions, date)
    }

    pub fn agenda_groups(&self, date: NaiveDate) -> AgendaGroups {
        AgendaGroups::partition(self.agenda(date))
    }

    pub fn agenda_range(&self, start: NaiveDate, days: usize) -> Vec<AgendaDay> {
        let snapshot = self.snapshot.read();
        agenda::agenda_range(
            &self.evaluator,
            &snapshot.tasks,
            &snapshot.completions,
            start,
            days,
        )
    }

    /// Flips the completion of `task_id` on `date` and returns the new state.
    #[instrument(skip(self))]
    pub fn toggle_completion(&self, task_id: &str, date: NaiveDate) -> Result<bool> {
        let is_complete = {
            let snapshot = self.snapshot.read();
            if !snapshot.tasks.iter().any(|task| task.id == task_id) {
                return Err(TaskError::UnknownTask(task_id.to_string()).into());
            }
            snapshot
                .completions
                .iter()
                .any(|completion| completion.matches(task_id, date))
        };

        if is_complete {
            self.repository
                .delete_completion(task_id, date)
                .context("failed to delete completion")?;
            self.snapshot
                .write()
                .completions
                .retain(|completion| !completion.matches(task_id, date));
            debug!(task_id, %date, "completion removed");
            Ok(false)
        } else {
            let completion = self
                .repository
                .create_completion(task_id, date)
                .context("failed to record completion")?;
            self.snapshot.write().completions.push(completion);
            debug!(task_id, %date, "completion recorded");
            Ok(true)
        }
    }

    /// Completes every due-but-incomplete task on `date`; returns how many
    /// completions were added.
    #[instrument(skip(self))]
    pub fn complete_all(&self, date: NaiveDate) -> Result<usize> {
        let pending: Vec<String> = self
            .agenda(date)
            .into_iter()
            .filter(|entry| !entry.is_complete)
            .map(|entry| entry.task.id)
            .collect();
        for task_id in &pending {
            let completion = self
                .repository
                .create_completion(task_id, date)
                .with_context(|| format!("failed to complete task `{task_id}`"))?;
            self.snapshot.write().completions.push(completion);
        }
        info!(count = pending.len(), %date, "completed all due tasks");
        Ok(pending.len())
    }

    /// Evaluates the streak for `today` and persists it when it changed.
    #[instrument(skip(self))]
    pub fn refresh_streak(&self, today: NaiveDate) -> Result<StreakUpdate> {
        let state = self.snapshot.read().profile.streak_state();
        let yesterday = today - Duration::days(1);
        let yesterday_agenda = self.agenda(yesterday);
        let update = streak::update_streak(state, today, &yesterday_agenda);

        if update.changed() {
            let profile = self
                .repository
                .update_profile(ProfileUpdate::from(update.state))
                .context("failed to persist streak")?;
            info!(
                streak = profile.streak,
                outcome = ?update.outcome,
                "streak evaluated"
            );
            self.snapshot.write().profile = profile;
        } else {
            debug!(%today, "streak already evaluated");
        }
        Ok(update)
    }
}
