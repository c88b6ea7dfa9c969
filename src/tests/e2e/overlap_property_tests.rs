// Randomised operation sequences against one user's entries. After every
// step no two live entries outside `Conflict` may overlap, and every closed
// entry's duration must equal `end_time - start_time`.
//
// The clock stays fixed so open entries have a stable span.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use crate::modules::time_entries::core::time_entry::{LoadedEntry, SyncStatus};
use crate::modules::time_entries::use_cases::create_manual_entry::command::CreateManualEntry;
use crate::modules::time_entries::use_cases::delete_time_entry::command::DeleteTimeEntry;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::ListTimeEntries;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::modules::time_entries::use_cases::start_tracking::command::StartTracking;
use crate::modules::time_entries::use_cases::stop_tracking::command::StopTracking;
use crate::modules::time_entries::use_cases::sync_time_entries::command::{
    ClientEntry, SyncTimeEntries,
};
use crate::modules::time_entries::use_cases::update_time_entry::command::{
    TimeEntryPatch, UpdateTimeEntry,
};
use crate::shell::state::AppState;
use crate::tests::fixtures::{USER_ID, at};

const QUARTER: i64 = 15 * 60 * 1000;
const STEPS: usize = 80;

fn base() -> i64 {
    at(2024, 1, 8, 0, 0)
}

fn now() -> i64 {
    base() + 2 * 24 * 4 * QUARTER
}

fn random_span(rng: &mut StdRng) -> (i64, i64) {
    let start = base() + rng.gen_range(0..2 * 24 * 4) * QUARTER;
    (start, start + rng.gen_range(0..12) * QUARTER)
}

fn pick<'a>(rng: &mut StdRng, entries: &'a [LoadedEntry]) -> Option<&'a LoadedEntry> {
    (!entries.is_empty()).then(|| &entries[rng.gen_range(0..entries.len())])
}

async fn live_entries(state: &AppState) -> Vec<LoadedEntry> {
    state
        .queries
        .list(ListTimeEntries::for_user(USER_ID))
        .await
        .unwrap()
}

fn assert_invariants(entries: &[LoadedEntry], step: usize) {
    let counted: Vec<&LoadedEntry> = entries
        .iter()
        .filter(|loaded| loaded.entry.sync_status != SyncStatus::Conflict)
        .collect();
    for (i, left) in counted.iter().enumerate() {
        for right in &counted[i + 1..] {
            assert!(
                !left.entry.overlaps(&right.entry, now()),
                "step {step}: {} and {} overlap outside Conflict",
                left.entry.time_entry_id,
                right.entry.time_entry_id
            );
        }
    }
    for loaded in entries {
        let view = TimeEntryView::from(loaded.clone());
        assert_eq!(
            view.duration_ms,
            loaded.entry.end_time.map(|end| end - loaded.entry.start_time)
        );
    }
}

async fn random_step(state: &AppState, rng: &mut StdRng, step: usize) {
    let entries = live_entries(state).await;
    match rng.gen_range(0..6) {
        0 => {
            let (start_time, end_time) = random_span(rng);
            let _ = state
                .create_manual_entry
                .handle(CreateManualEntry {
                    time_entry_id: format!("manual-{step}"),
                    user_id: USER_ID.into(),
                    start_time,
                    end_time,
                })
                .await;
        }
        1 => {
            let Some(target) = pick(rng, &entries) else {
                return;
            };
            let (start_time, end_time) = random_span(rng);
            let stale = rng.gen_range(0..4) == 0;
            let _ = state
                .update_time_entry
                .handle(UpdateTimeEntry {
                    time_entry_id: target.entry.time_entry_id.clone(),
                    expected_version: target.version - i64::from(stale),
                    patch: TimeEntryPatch {
                        start_time: Some(start_time),
                        end_time: Some(end_time),
                        is_manual_entry: None,
                    },
                })
                .await;
        }
        2 => {
            let Some(target) = pick(rng, &entries) else {
                return;
            };
            let _ = state
                .delete_time_entry
                .handle(DeleteTimeEntry {
                    time_entry_id: target.entry.time_entry_id.clone(),
                    expected_version: target.version,
                })
                .await;
        }
        3 => {
            let (start_time, _) = random_span(rng);
            let _ = state
                .start_tracking
                .handle(StartTracking {
                    time_entry_id: format!("tracked-{step}"),
                    user_id: USER_ID.into(),
                    start_time,
                })
                .await;
        }
        4 => {
            let (_, end_time) = random_span(rng);
            let _ = state
                .stop_tracking
                .handle(StopTracking {
                    user_id: USER_ID.into(),
                    end_time,
                    expected_version: None,
                })
                .await;
        }
        _ => {
            let (start_time, end_time) = random_span(rng);
            let existing = if rng.gen_range(0..2) == 0 {
                pick(rng, &entries)
            } else {
                None
            };
            let (time_entry_id, base_version) = match existing {
                Some(target) => (
                    target.entry.time_entry_id.clone(),
                    Some(target.version - rng.gen_range(0..2)),
                ),
                None => (format!("client-{step}"), None),
            };
            state
                .sync
                .handle(SyncTimeEntries {
                    entries: vec![ClientEntry {
                        time_entry_id,
                        user_id: USER_ID.into(),
                        start_time,
                        end_time: Some(end_time),
                        is_manual_entry: true,
                        created_at: None,
                        modified_at: None,
                        deleted_at: None,
                        base_version,
                    }],
                })
                .await;
        }
    }
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
#[case(1_234)]
#[case(98_765)]
#[tokio::test]
async fn random_operation_sequences_never_leave_unflagged_overlaps(#[case] seed: u64) {
    let state = AppState::for_tests(now());
    let mut rng = StdRng::seed_from_u64(seed);

    for step in 0..STEPS {
        random_step(&state, &mut rng, step).await;
        assert_invariants(&live_entries(&state).await, step);
    }
}

#[rstest]
#[case(3)]
#[case(2_024)]
#[tokio::test]
async fn flagged_entries_always_have_an_overlapping_partner(#[case] seed: u64) {
    let state = AppState::for_tests(now());
    let mut rng = StdRng::seed_from_u64(seed);
    for step in 0..STEPS {
        let (start_time, end_time) = random_span(&mut rng);
        let _ = state
            .create_manual_entry
            .handle(CreateManualEntry {
                time_entry_id: format!("manual-{step}"),
                user_id: USER_ID.into(),
                start_time,
                end_time,
            })
            .await;
    }

    // With only inserts, a conflicted entry always has a live partner it overlaps.
    let entries = live_entries(&state).await;
    for flagged in entries
        .iter()
        .filter(|loaded| loaded.entry.sync_status == SyncStatus::Conflict)
    {
        assert!(
            entries.iter().any(|other| {
                other.entry.time_entry_id != flagged.entry.time_entry_id
                    && other.entry.overlaps(&flagged.entry, now())
            }),
            "{} is flagged without an overlapping partner",
            flagged.entry.time_entry_id
        );
    }
}
