use std::collections::VecDeque;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Quote, QUOTES, TASK_EXAMPLES};

pub const TITLE_WINDOW: usize = 3;
pub const QUOTE_WINDOW: usize = 30;

/// Anything drawn from a rotation pool exposes a key the window remembers.
pub trait PoolItem {
    type Key: Clone + PartialEq;

    fn key(&self) -> Self::Key;
}

impl PoolItem for &'static str {
    type Key = &'static str;

    fn key(&self) -> Self::Key {
        *self
    }
}

impl PoolItem for Quote {
    type Key = u32;

    fn key(&self) -> Self::Key {
        self.id
    }
}

/// What happens to the window once every pool item is in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exhaustion {
    /// Forget everything.
    Reset,
    /// Forget all but the most recent pick so it cannot repeat immediately.
    KeepLast,
}

/// Bounded most-recently-used list; the oldest key is evicted first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentWindow<K> {
    capacity: usize,
    recent: VecDeque<K>,
}

impl<K: Clone + PartialEq> RecentWindow<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            recent: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.recent.contains(key)
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn last(&self) -> Option<&K> {
        self.recent.back()
    }

    pub fn push(&mut self, key: K) {
        self.recent.push_back(key);
        while self.recent.len() > self.capacity {
            self.recent.pop_front();
        }
    }

    fn exhaust(&mut self, policy: Exhaustion) {
        match policy {
            Exhaustion::Reset => self.recent.clear(),
            Exhaustion::KeepLast => {
                let last = self.recent.pop_back();
                self.recent.clear();
                self.recent.extend(last);
            }
        }
    }
}

/// Picks uniformly among pool items whose key is not in `window`, then
/// records the pick. Returns `None` only for an empty pool.
pub fn pick<'a, T, R>(
    pool: &'a [T],
    window: &mut RecentWindow<T::Key>,
    policy: Exhaustion,
    rng: &mut R,
) -> Option<&'a T>
where
    T: PoolItem,
    R: Rng + ?Sized,
{
    let mut candidates = fresh_candidates(pool, window);
    if candidates.is_empty() {
        window.exhaust(policy);
        candidates = fresh_candidates(pool, window);
    }
    if candidates.is_empty() {
        // Single-item pool under KeepLast: the only choice is a repeat.
        candidates = pool.iter().collect();
    }
    let chosen = *candidates.choose(rng)?;
    window.push(chosen.key());
    Some(chosen)
}

fn fresh_candidates<'a, T: PoolItem>(pool: &'a [T], window: &RecentWindow<T::Key>) -> Vec<&'a T> {
    pool.iter()
        .filter(|item| !window.contains(&item.key()))
        .collect()
}

/// Placeholder titles for the "new task" form, avoiding the last few shown.
#[derive(Debug, Clone)]
pub struct TitleSuggester {
    pool: &'static [&'static str],
    window: RecentWindow<&'static str>,
}

impl Default for TitleSuggester {
    fn default() -> Self {
        Self::with_pool(TASK_EXAMPLES)
    }
}

impl TitleSuggester {
    pub fn with_pool(pool: &'static [&'static str]) -> Self {
        Self {
            pool,
            window: RecentWindow::new(TITLE_WINDOW),
        }
    }

    pub fn suggest<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&'static str> {
        pick(self.pool, &mut self.window, Exhaustion::Reset, rng).copied()
    }
}

/// Persistable daily-quote rotation. Repeated requests for the same date
/// return the same quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRotation {
    current: Option<u32>,
    last_date: Option<NaiveDate>,
    recently_used: RecentWindow<u32>,
}

impl Default for QuoteRotation {
    fn default() -> Self {
        Self {
            current: None,
            last_date: None,
            recently_used: RecentWindow::new(QUOTE_WINDOW),
        }
    }
}

impl QuoteRotation {
    pub fn quote_for<R: Rng + ?Sized>(
        &mut self,
        date: NaiveDate,
        rng: &mut R,
    ) -> Option<&'static Quote> {
        self.quote_from(QUOTES, date, rng)
    }

    pub fn quote_from<'a, R: Rng + ?Sized>(
        &mut self,
        pool: &'a [Quote],
        date: NaiveDate,
        rng: &mut R,
    ) -> Option<&'a Quote> {
        if self.last_date == Some(date) {
            if let Some(cached) = self
                .current
                .and_then(|id| pool.iter().find(|quote| quote.id == id))
            {
                return Some(cached);
            }
        }
        let quote = pick(pool, &mut self.recently_used, Exhaustion::KeepLast, rng)?;
        self.current = Some(quote.id);
        self.last_date = Some(date);
        Some(quote)
    }

    pub fn recently_used(&self) -> &RecentWindow<u32> {
        &self.recently_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_evicts_oldest_first() {
        let mut window = RecentWindow::new(3);
        for key in 1..=5 {
            window.push(key);
        }
        assert_eq!(window.len(), 3);
        assert!(!window.contains(&2));
        assert!(window.contains(&3));
        assert_eq!(window.last(), Some(&5));
    }

    #[test]
    fn never_repeats_within_window() {
        let pool: &[&str] = &["a", "b", "c", "d", "e"];
        let mut window = RecentWindow::new(3);
        let mut rng = StdRng::seed_from_u64(7);
        let picks: Vec<&str> = (0..50)
            .map(|_| *pick(pool, &mut window, Exhaustion::Reset, &mut rng).unwrap())
            .collect();
        for span in picks.windows(4) {
            for (i, a) in span.iter().enumerate() {
                assert!(span[i + 1..].iter().all(|b| a != b), "{span:?}");
            }
        }
    }

    #[test]
    fn keep_last_avoids_immediate_repeat_after_exhaustion() {
        let pool: &[&str] = &["x", "y"];
        let mut window = RecentWindow::new(10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut previous = *pick(pool, &mut window, Exhaustion::KeepLast, &mut rng).unwrap();
        for _ in 0..20 {
            let next = *pick(pool, &mut window, Exhaustion::KeepLast, &mut rng).unwrap();
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn reset_allows_any_item_after_exhaustion() {
        let pool: &[&str] = &["only"];
        let mut window = RecentWindow::new(3);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..3 {
            assert_eq!(pick(pool, &mut window, Exhaustion::Reset, &mut rng), Some(&"only"));
        }
        let empty: &[&str] = &[];
        assert!(pick(empty, &mut window, Exhaustion::Reset, &mut rng).is_none());
    }

    #[test]
    fn title_suggestions_come_from_pool() {
        let mut suggester = TitleSuggester::default();
        let mut rng = StdRng::seed_from_u64(11);
        let first = suggester.suggest(&mut rng).unwrap();
        assert!(TASK_EXAMPLES.contains(&first));
    }

    #[test]
    fn quote_is_cached_per_day_and_rotates_across_days() {
        let mut rotation = QuoteRotation::default();
        let mut rng = StdRng::seed_from_u64(42);
        let monday = rotation.quote_for(date(2024, 1, 1), &mut rng).unwrap().id;
        let again = rotation.quote_for(date(2024, 1, 1), &mut rng).unwrap().id;
        assert_eq!(monday, again);

        let mut seen = vec![monday];
        for day in 2..=QUOTE_WINDOW as u32 {
            let id = rotation.quote_for(date(2024, 1, day), &mut rng).unwrap().id;
            assert!(!seen.contains(&id));
            seen.push(id);
        }
        assert_eq!(rotation.recently_used().len(), QUOTE_WINDOW);
    }

    #[test]
    fn quote_rotation_survives_serialization() {
        let mut rotation = QuoteRotation::default();
        let mut rng = StdRng::seed_from_u64(5);
        let today = date(2024, 6, 1);
        let id = rotation.quote_for(today, &mut rng).unwrap().id;
        let json = serde_json::to_string(&rotation).unwrap();
        let mut restored: QuoteRotation = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.quote_for(today, &mut rng).unwrap().id, id);
    }
}
