pub mod agenda;
pub mod calendar;
pub mod catalog;
pub mod due;
pub mod error;
pub mod navigation;
pub mod picker;
pub mod recurrence;
pub mod repository;
pub mod service;
pub mod streak;
pub mod task;

pub use crate::due::{is_due, BiweeklyMode, Evaluator};
pub use crate::recurrence::Recurrence;
pub use crate::service::{Tracker, TrackerBuilder};
