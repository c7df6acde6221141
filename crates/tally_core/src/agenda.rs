use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use icu_normalizer::DecomposingNormalizerBorrowed;
use serde::{Deserialize, Serialize};

use crate::due::Evaluator;
use crate::task::{Task, TaskCompletion};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgendaEntry {
    pub task: Task,
    pub is_complete: bool,
}

/// Presentation split of an agenda: `daily` rules versus everything else.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgendaGroups {
    pub daily: Vec<AgendaEntry>,
    pub scheduled: Vec<AgendaEntry>,
}

impl AgendaGroups {
    pub fn partition(entries: Vec<AgendaEntry>) -> Self {
        let (daily, scheduled) = entries
            .into_iter()
            .partition(|entry| entry.task.recurrence.is_daily());
        Self { daily, scheduled }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.scheduled.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub entries: Vec<AgendaEntry>,
}

/// Tasks due on `date`, paired with their completion state and ordered by title.
pub fn agenda_for(
    evaluator: &Evaluator,
    tasks: &[Task],
    completions: &[TaskCompletion],
    date: NaiveDate,
) -> Vec<AgendaEntry> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries: Vec<AgendaEntry> = tasks
        .iter()
        .filter(|task| evaluator.task_is_due(task, date))
        .filter(|task| seen.insert(task.id.as_str()))
        .map(|task| AgendaEntry {
            task: task.clone(),
            is_complete: completions
                .iter()
                .any(|completion| completion.matches(&task.id, date)),
        })
        .collect();

    // `sort_by` is stable, so equal titles keep insertion order.
    entries.sort_by(|a, b| compare_titles(&a.task.title, &b.task.title));
    entries
}

pub fn agenda_range(
    evaluator: &Evaluator,
    tasks: &[Task],
    completions: &[TaskCompletion],
    start: NaiveDate,
    days: usize,
) -> Vec<AgendaDay> {
    (0..days)
        .filter_map(|offset| start.checked_add_signed(Duration::days(offset as i64)))
        .map(|date| AgendaDay {
            date,
            entries: agenda_for(evaluator, tasks, completions, date),
        })
        .collect()
}

/// Locale-style title ordering, compared in three passes:
///
/// 1. base letters with accents and case removed, where whitespace sorts
///    before punctuation and symbols, then digits, then letters
/// 2. accents, unaccented first
/// 3. case, lowercase first
///
/// Titles equal on all three passes compare equal.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .map(|(x, y)| case_rank(x).cmp(&case_rank(y)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

/// Lowercased canonical decomposition; accents survive as combining marks.
fn folded(title: &str) -> impl Iterator<Item = char> + '_ {
    DecomposingNormalizerBorrowed::new_nfd()
        .normalize_iter(title.chars())
        .flat_map(char::to_lowercase)
}

fn primary_key(title: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    folded(title)
        .filter(|c| !is_combining_mark(*c))
        .map(|c| (char_class(c), c))
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}
