use chrono::NaiveDate;
use serde_json::json;

use tally_core::{
    agenda::AgendaGroups,
    navigation::DateCursor,
    repository::{InMemoryRepository, StoreData, TaskRepository},
    streak::StreakOutcome,
    BiweeklyMode, Tracker,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn seeded_store() -> StoreData {
    serde_json::from_value(json!({
        "tasks": [
            {"id": "1", "title": "Morning meditation", "recurrence": {"type": "daily"},
             "dueTime": "08:00", "createdAt": "2024-01-01T07:00:00Z"},
            {"id": "2", "title": "Submit weekly report",
             "recurrence": {"type": "weekly", "dayOfWeek": 5},
             "dueTime": "17:00", "createdAt": "2024-01-01T07:00:00Z"},
            {"id": "3", "title": "Water the plants", "recurrence": {"type": "daily"},
             "dueTime": "all_day", "createdAt": "2024-01-01T07:00:00Z"},
            {"id": "4", "title": "Take out recycling",
             "recurrence": {"type": "biweekly", "dayOfWeek": 2, "biweeklyWeeks": "second_fourth"},
             "dueTime": "19:00", "createdAt": "2024-01-01T07:00:00Z"},
            {"id": "5", "title": "Pay rent",
             "recurrence": {"type": "monthly", "monthlyType": "dayOfMonth", "day": 1},
             "dueTime": "all_day", "createdAt": "2024-01-01T07:00:00Z"},
            {"id": "6", "title": "Book club meeting",
             "recurrence": {"type": "monthly", "monthlyType": "dayOfWeek",
                            "week": "last", "dayOfWeek": 4},
             "dueTime": "18:30", "createdAt": "2024-01-01T07:00:00Z"},
            {"id": "7", "title": "Balance budget",
             "recurrence": {"type": "monthly", "dayOfMonth": 31, "isLastDayOfMonth": true},
             "createdAt": "2024-01-01T07:00:00Z"}
        ],
        "completions": [],
        "profile": {"streak": 0, "lastStreakCheck": null}
    }))
    .expect("seed store")
}

fn titles(entries: &[tally_core::agenda::AgendaEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.task.title.as_str()).collect()
}

#[test]
fn agenda_follows_each_rule_across_a_month() {
    let tracker = Tracker::builder()
        .repository(Box::new(InMemoryRepository::with_data(seeded_store())))
        .build()
        .expect("build tracker");

    // Thursday 2024-02-01: rent plus the daily habits.
    assert_eq!(
        titles(&tracker.agenda(date(2024, 2, 1))),
        vec!["Morning meditation", "Pay rent", "Water the plants"]
    );

    // Tuesday 2024-02-13 is in the second week bucket.
    assert!(titles(&tracker.agenda(date(2024, 2, 13))).contains(&"Take out recycling"));
    assert!(!titles(&tracker.agenda(date(2024, 2, 6))).contains(&"Take out recycling"));

    // Thursday 2024-02-29 is both the last Thursday and the last day.
    let groups: AgendaGroups = tracker.agenda_groups(date(2024, 2, 29));
    assert_eq!(
        titles(&groups.scheduled),
        vec!["Balance budget", "Book club meeting"]
    );
    assert_eq!(groups.daily.len(), 2);

    let week = tracker.agenda_range(date(2024, 2, 1), 7);
    let reports = week
        .iter()
        .filter(|day| titles(&day.entries).contains(&"Submit weekly report"))
        .count();
    assert_eq!(reports, 1);
}

#[test]
fn anchor_mode_changes_biweekly_weeks() {
    let tracker = Tracker::builder()
        .repository(Box::new(InMemoryRepository::with_data(seeded_store())))
        .biweekly_mode(BiweeklyMode::Anchor)
        .build()
        .expect("build tracker");

    // Created in the week of 2024-01-01; second_fourth means the odd weeks after it.
    assert!(titles(&tracker.agenda(date(2024, 1, 9))).contains(&"Take out recycling"));
    assert!(!titles(&tracker.agenda(date(2024, 1, 16))).contains(&"Take out recycling"));
}

#[test]
fn streak_scenarios_over_consecutive_sessions() {
    let mut store = seeded_store();
    store.profile.streak = 3;
    store.profile.last_streak_check = Some(date(2024, 1, 1));
    let repo = InMemoryRepository::with_data(store.clone());
    let tracker = Tracker::builder()
        .repository(Box::new(repo))
        .build()
        .expect("build tracker");

    // Monday 2024-01-01: meditation, plants, rent are due.
    tracker.complete_all(date(2024, 1, 1)).expect("complete all");
    let update = tracker.refresh_streak(date(2024, 1, 2)).expect("streak");
    assert_eq!(update.outcome, StreakOutcome::Extended);
    assert_eq!(tracker.profile().streak, 4);

    // Leave one task open on 2024-01-02.
    tracker
        .toggle_completion("1", date(2024, 1, 2))
        .expect("toggle");
    let update = tracker.refresh_streak(date(2024, 1, 3)).expect("streak");
    assert_eq!(update.outcome, StreakOutcome::Reset);
    assert_eq!(tracker.profile().streak, 0);

    // Gap of several days resets even with everything done.
    let repo = InMemoryRepository::with_data(store);
    let tracker = Tracker::builder()
        .repository(Box::new(repo))
        .build()
        .expect("build tracker");
    let update = tracker.refresh_streak(date(2024, 1, 5)).expect("streak");
    assert_eq!(update.outcome, StreakOutcome::Lapsed);
    assert_eq!(update.state.streak, 0);
    assert_eq!(update.state.last_check, Some(date(2024, 1, 5)));
}

#[test]
fn viewed_date_cursor_drives_agenda_lookups() {
    let repo = InMemoryRepository::with_data(seeded_store());
    assert_eq!(repo.list_tasks().expect("tasks").len(), 7);
    let tracker = Tracker::builder()
        .repository(Box::new(repo))
        .build()
        .expect("build tracker");

    let mut cursor = DateCursor::new(date(2024, 2, 2));
    cursor.retreat();
    cursor.retreat();
    assert_eq!(cursor.viewed(), date(2024, 2, 1));
    assert!(titles(&tracker.agenda(cursor.viewed())).contains(&"Pay rent"));

    cursor.jump_to_today();
    assert!(titles(&tracker.agenda(cursor.viewed())).contains(&"Submit weekly report"));
}
