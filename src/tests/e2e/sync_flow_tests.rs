use crate::modules::time_entries::core::time_entry::SyncStatus;
use crate::modules::time_entries::use_cases::delete_time_entry::command::DeleteTimeEntry;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::ListTimeEntries;
use crate::modules::time_entries::use_cases::sync_time_entries::command::{
    ClientEntry, SyncTimeEntries,
};
use crate::modules::time_entries::use_cases::sync_time_entries::handler::SyncOutcome;
use crate::modules::time_entries::use_cases::update_time_entry::command::{
    TimeEntryPatch, UpdateTimeEntry,
};
use crate::modules::time_entries::use_cases::weekly_summary::handler::ComputeWeeklySummary;
use crate::shell::state::AppState;
use crate::tests::fixtures::{HOUR, USER_ID, at};

fn offline_entry(id: &str, start_time: i64, end_time: i64) -> ClientEntry {
    ClientEntry {
        time_entry_id: id.into(),
        user_id: USER_ID.into(),
        start_time,
        end_time: Some(end_time),
        is_manual_entry: false,
        created_at: Some(start_time),
        modified_at: None,
        deleted_at: None,
        base_version: None,
    }
}

#[tokio::test]
async fn reconciling_new_entries_applies_all_of_them() {
    let day = at(2024, 1, 8, 8, 0);
    let state = AppState::for_tests(day + 24 * HOUR);
    let entries: Vec<ClientEntry> = (0..4)
        .map(|i| offline_entry(&format!("offline-{i}"), day + i * HOUR, day + i * HOUR + HOUR / 2))
        .collect();

    let results = state.sync.handle(SyncTimeEntries { entries }).await;

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.outcome == SyncOutcome::Applied));
    let stored = state
        .queries
        .list(ListTimeEntries::for_user(USER_ID))
        .await
        .unwrap();
    assert_eq!(stored.len(), 4);
    assert!(
        stored
            .iter()
            .all(|loaded| loaded.entry.sync_status == SyncStatus::Synced)
    );
}

#[tokio::test]
async fn concurrent_edits_from_the_same_base_keep_both_records() {
    let day = at(2024, 1, 9, 8, 0);
    let state = AppState::for_tests(day + 24 * HOUR);
    let original = offline_entry("shared", day, day + HOUR);
    state
        .sync
        .handle(SyncTimeEntries {
            entries: vec![original.clone()],
        })
        .await;

    let laptop = SyncTimeEntries {
        entries: vec![ClientEntry {
            end_time: Some(day + 2 * HOUR),
            base_version: Some(1),
            ..original.clone()
        }],
    };
    let phone = SyncTimeEntries {
        entries: vec![ClientEntry {
            start_time: day + HOUR / 2,
            base_version: Some(1),
            ..original
        }],
    };
    let (laptop, phone) = tokio::join!(state.sync.handle(laptop), state.sync.handle(phone));

    let mut outcomes = vec![laptop[0].outcome, phone[0].outcome];
    outcomes.sort_by_key(|o| *o as u8);
    assert_eq!(outcomes, vec![SyncOutcome::Applied, SyncOutcome::Conflicted]);

    let conflicted = if laptop[0].outcome == SyncOutcome::Conflicted {
        &laptop[0]
    } else {
        &phone[0]
    };
    assert_eq!(
        conflicted.server_version.as_ref().map(|s| s.version),
        Some(2)
    );
    let sibling = conflicted.stored.as_ref().unwrap();
    assert_eq!(sibling.entry.conflict_of.as_deref(), Some("shared"));

    let stored = state
        .queries
        .list(ListTimeEntries::for_user(USER_ID))
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    let server = stored
        .iter()
        .find(|loaded| loaded.entry.time_entry_id == "shared")
        .unwrap();
    assert_eq!(server.entry.sync_status, SyncStatus::Synced);
}

#[tokio::test]
async fn deleting_the_server_record_resolves_the_sibling() {
    let day = at(2024, 1, 9, 8, 0);
    let state = AppState::for_tests(day + 24 * HOUR);
    let original = offline_entry("shared", day, day + HOUR);
    state
        .sync
        .handle(SyncTimeEntries {
            entries: vec![original.clone()],
        })
        .await;
    let results = state
        .sync
        .handle(SyncTimeEntries {
            entries: vec![
                ClientEntry {
                    end_time: Some(day + 2 * HOUR),
                    base_version: Some(1),
                    ..original.clone()
                },
                ClientEntry {
                    start_time: day + HOUR / 2,
                    base_version: Some(1),
                    ..original
                },
            ],
        })
        .await;
    assert_eq!(results[1].outcome, SyncOutcome::Conflicted);
    let sibling = results[1].stored.clone().unwrap();

    let server = state.queries.get("shared").await.unwrap().unwrap();
    state
        .delete_time_entry
        .handle(DeleteTimeEntry {
            time_entry_id: "shared".into(),
            expected_version: server.version,
        })
        .await
        .unwrap();
    let settled = state
        .update_time_entry
        .handle(UpdateTimeEntry {
            time_entry_id: sibling.entry.time_entry_id.clone(),
            expected_version: sibling.version,
            patch: TimeEntryPatch::default(),
        })
        .await
        .unwrap();

    assert_eq!(settled.entry.sync_status, SyncStatus::Pending);
    assert_eq!(settled.entry.conflict_of, None);
    let summary = state
        .weekly_summary
        .handle(ComputeWeeklySummary {
            user_id: USER_ID.into(),
            year: Some(2024),
            week: Some(2),
            target_hours: None,
        })
        .await
        .unwrap();
    assert!(!summary.has_unresolved_conflicts);
    assert_eq!(summary.entry_count, 1);
}

#[tokio::test]
async fn offline_deletions_propagate_through_sync() {
    let day = at(2024, 1, 10, 8, 0);
    let state = AppState::for_tests(day + 24 * HOUR);
    let entry = offline_entry("to-delete", day, day + HOUR);
    state
        .sync
        .handle(SyncTimeEntries {
            entries: vec![entry.clone()],
        })
        .await;

    let results = state
        .sync
        .handle(SyncTimeEntries {
            entries: vec![ClientEntry {
                deleted_at: Some(day + 3 * HOUR),
                base_version: Some(1),
                ..entry
            }],
        })
        .await;
    assert_eq!(results[0].outcome, SyncOutcome::Applied);

    let live = state
        .queries
        .list(ListTimeEntries::for_user(USER_ID))
        .await
        .unwrap();
    assert!(live.is_empty());
    let tombstone = state.queries.get("to-delete").await.unwrap().unwrap();
    assert_eq!(tombstone.entry.deleted_at, Some(day + 3 * HOUR));
    assert_eq!(tombstone.version, 2);
}

#[tokio::test]
async fn sync_refuses_to_touch_another_users_entry() {
    let day = at(2024, 1, 11, 8, 0);
    let state = AppState::for_tests(day + 24 * HOUR);
    let mine = offline_entry("taken", day, day + HOUR);
    state
        .sync
        .handle(SyncTimeEntries {
            entries: vec![mine.clone()],
        })
        .await;

    let results = state
        .sync
        .handle(SyncTimeEntries {
            entries: vec![ClientEntry {
                user_id: "intruder".into(),
                base_version: Some(1),
                ..mine
            }],
        })
        .await;
    assert_eq!(results[0].outcome, SyncOutcome::Rejected);
    let stored = state.queries.get("taken").await.unwrap().unwrap();
    assert_eq!(stored.entry.user_id, USER_ID);
    assert_eq!(stored.version, 1);
}
