use crate::modules::time_entries::adapters::outbound::entry_store::StoreError;
use crate::modules::time_entries::core::time_entry::SyncStatus;
use crate::modules::time_entries::use_cases::create_manual_entry::command::CreateManualEntry;
use crate::modules::time_entries::use_cases::decision::DecideError;
use crate::modules::time_entries::use_cases::delete_time_entry::command::DeleteTimeEntry;
use crate::modules::time_entries::use_cases::errors::ApplicationError;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::ListTimeEntries;
use crate::modules::time_entries::use_cases::start_tracking::command::StartTracking;
use crate::modules::time_entries::use_cases::stop_tracking::command::StopTracking;
use crate::modules::time_entries::use_cases::update_time_entry::command::{
    TimeEntryPatch, UpdateTimeEntry,
};
use crate::modules::time_entries::use_cases::weekly_summary::handler::ComputeWeeklySummary;
use crate::shared::core::clock::MockClock;
use crate::shell::state::AppState;
use crate::tests::fixtures::{HOUR, USER_ID, at};

fn start(id: &str, start_time: i64) -> StartTracking {
    StartTracking {
        time_entry_id: id.into(),
        user_id: USER_ID.into(),
        start_time,
    }
}

fn manual(id: &str, start_time: i64, end_time: i64) -> CreateManualEntry {
    CreateManualEntry {
        time_entry_id: id.into(),
        user_id: USER_ID.into(),
        start_time,
        end_time,
    }
}

#[tokio::test]
async fn tracks_a_workday_and_summarizes_the_week() {
    let monday_nine = at(2024, 1, 8, 9, 0);
    let clock = MockClock::at(monday_nine);
    let state = AppState::with_clock(clock.clone());

    let started = state
        .start_tracking
        .handle(start("te-day", monday_nine))
        .await
        .unwrap();
    assert!(started.entry.is_open());

    let again = state
        .start_tracking
        .handle(start("te-again", monday_nine + HOUR))
        .await;
    assert!(matches!(
        again,
        Err(ApplicationError::Domain(DecideError::AlreadyTracking(_)))
    ));

    clock.set(at(2024, 1, 8, 17, 0));
    let stopped = state
        .stop_tracking
        .handle(StopTracking {
            user_id: USER_ID.into(),
            end_time: at(2024, 1, 8, 17, 0),
            expected_version: Some(started.version),
        })
        .await
        .unwrap();
    assert_eq!(stopped.entry.duration_millis(), Some(8 * HOUR));

    let summary = state
        .weekly_summary
        .handle(ComputeWeeklySummary {
            user_id: USER_ID.into(),
            year: Some(2024),
            week: Some(2),
            target_hours: Some(16.0),
        })
        .await
        .unwrap();
    assert_eq!(summary.total_hours, 8.0);
    assert_eq!(summary.target_hours, 16.0);
    assert_eq!(summary.overtime_hours, -8.0);
    assert!(!summary.has_unresolved_conflicts);

    let next_week = state
        .weekly_summary
        .handle(ComputeWeeklySummary {
            user_id: USER_ID.into(),
            year: Some(2024),
            week: Some(3),
            target_hours: None,
        })
        .await
        .unwrap();
    assert_eq!(next_week.total_millis, 0);
}

#[tokio::test]
async fn stale_updates_never_change_the_stored_entry() {
    let now = at(2024, 1, 9, 12, 0);
    let state = AppState::for_tests(now);
    let created = state
        .create_manual_entry
        .handle(manual("te-a", now - 3 * HOUR, now - 2 * HOUR))
        .await
        .unwrap();

    let first = UpdateTimeEntry {
        time_entry_id: "te-a".into(),
        expected_version: created.version,
        patch: TimeEntryPatch {
            end_time: Some(now - HOUR),
            ..Default::default()
        },
    };
    let updated = state.update_time_entry.handle(first.clone()).await.unwrap();
    assert_eq!(updated.version, created.version + 1);

    for stale_version in [0, created.version, updated.version + 1] {
        let result = state
            .update_time_entry
            .handle(UpdateTimeEntry {
                expected_version: stale_version,
                patch: TimeEntryPatch {
                    start_time: Some(now - 10 * HOUR),
                    ..Default::default()
                },
                ..first.clone()
            })
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::Store(StoreError::VersionMismatch { .. }))
        ));
        assert_eq!(state.queries.get("te-a").await.unwrap(), Some(updated.clone()));
    }
}

#[tokio::test]
async fn overlapping_manual_entries_are_surfaced_and_can_be_resolved() {
    let now = at(2024, 1, 10, 18, 0);
    let state = AppState::for_tests(now);
    state
        .create_manual_entry
        .handle(manual("te-morning", at(2024, 1, 10, 8, 0), at(2024, 1, 10, 12, 0)))
        .await
        .unwrap();
    let correction = state
        .create_manual_entry
        .handle(manual("te-fix", at(2024, 1, 10, 11, 0), at(2024, 1, 10, 13, 0)))
        .await
        .unwrap();
    assert_eq!(correction.entry.sync_status, SyncStatus::Conflict);

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
    assert!(summary.has_unresolved_conflicts);
    assert_eq!(summary.total_hours, 6.0);

    let morning = state.queries.get("te-morning").await.unwrap().unwrap();
    state
        .update_time_entry
        .handle(UpdateTimeEntry {
            time_entry_id: "te-morning".into(),
            expected_version: morning.version,
            patch: TimeEntryPatch {
                end_time: Some(at(2024, 1, 10, 11, 0)),
                ..Default::default()
            },
        })
        .await
        .unwrap();
    let fix = state.queries.get("te-fix").await.unwrap().unwrap();
    state
        .update_time_entry
        .handle(UpdateTimeEntry {
            time_entry_id: "te-fix".into(),
            expected_version: fix.version,
            patch: TimeEntryPatch::default(),
        })
        .await
        .unwrap();

    let listed = state
        .queries
        .list(ListTimeEntries::for_user(USER_ID))
        .await
        .unwrap();
    assert!(
        listed
            .iter()
            .all(|loaded| loaded.entry.sync_status == SyncStatus::Pending)
    );
}

#[tokio::test]
async fn edits_that_keep_an_overlap_keep_the_conflict() {
    let now = at(2024, 1, 10, 18, 0);
    let state = AppState::for_tests(now);
    state
        .create_manual_entry
        .handle(manual("te-a", at(2024, 1, 10, 8, 0), at(2024, 1, 10, 12, 0)))
        .await
        .unwrap();
    let b = state
        .create_manual_entry
        .handle(manual("te-b", at(2024, 1, 10, 11, 0), at(2024, 1, 10, 13, 0)))
        .await
        .unwrap();
    assert_eq!(b.entry.sync_status, SyncStatus::Conflict);

    let a = state.queries.get("te-a").await.unwrap().unwrap();
    let edited = state
        .update_time_entry
        .handle(UpdateTimeEntry {
            time_entry_id: "te-a".into(),
            expected_version: a.version,
            patch: TimeEntryPatch {
                is_manual_entry: Some(true),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    assert!(edited.entry.overlaps(&b.entry, now));
    assert_eq!(edited.entry.sync_status, SyncStatus::Conflict);
    let b = state.queries.get("te-b").await.unwrap().unwrap();
    assert_eq!(b.entry.sync_status, SyncStatus::Conflict);
}

#[tokio::test]
async fn deletes_are_idempotent() {
    let now = at(2024, 1, 11, 12, 0);
    let state = AppState::for_tests(now);

    let missing = state
        .delete_time_entry
        .handle(DeleteTimeEntry {
            time_entry_id: "never-existed".into(),
            expected_version: 0,
        })
        .await;
    assert!(matches!(missing, Ok(None)));

    let created = state
        .create_manual_entry
        .handle(manual("te-gone", now - 2 * HOUR, now - HOUR))
        .await
        .unwrap();
    let delete = DeleteTimeEntry {
        time_entry_id: "te-gone".into(),
        expected_version: created.version,
    };
    let first = state.delete_time_entry.handle(delete.clone()).await.unwrap();
    let second = state.delete_time_entry.handle(delete).await.unwrap();
    assert_eq!(first, second);

    let live = state
        .queries
        .list(ListTimeEntries::for_user(USER_ID))
        .await
        .unwrap();
    assert!(live.is_empty());
    let all = state
        .queries
        .list(ListTimeEntries {
            include_deleted: true,
            ..ListTimeEntries::for_user(USER_ID)
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].entry.deleted_at, Some(now));
}
