use std::sync::Arc;
use std::time::Duration;

use crate::modules::time_entries::adapters::outbound::entry_store_in_memory::InMemoryTimeEntryStore;
use crate::modules::time_entries::use_cases::create_manual_entry::handler::CreateManualEntryHandler;
use crate::modules::time_entries::use_cases::delete_time_entry::handler::DeleteTimeEntryHandler;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::TimeEntryQueryHandler;
use crate::modules::time_entries::use_cases::start_tracking::handler::StartTrackingHandler;
use crate::modules::time_entries::use_cases::stop_tracking::handler::StopTrackingHandler;
use crate::modules::time_entries::use_cases::sync_time_entries::handler::SyncTimeEntriesHandler;
use crate::modules::time_entries::use_cases::update_time_entry::handler::UpdateTimeEntryHandler;
use crate::modules::time_entries::use_cases::weekly_summary::handler::WeeklySummaryHandler;
use crate::modules::time_entries::use_cases::weekly_summary::summary::WeeklyTargets;
use crate::modules::time_entries::use_cases::write_path::EntryWriter;
use crate::shared::core::clock::Clock;

type Store = InMemoryTimeEntryStore;

#[derive(Clone)]
pub struct AppState {
    pub start_tracking: Arc<StartTrackingHandler<Store>>,
    pub stop_tracking: Arc<StopTrackingHandler<Store>>,
    pub create_manual_entry: Arc<CreateManualEntryHandler<Store>>,
    pub update_time_entry: Arc<UpdateTimeEntryHandler<Store>>,
    pub delete_time_entry: Arc<DeleteTimeEntryHandler<Store>>,
    pub queries: Arc<TimeEntryQueryHandler<Store>>,
    pub weekly_summary: Arc<WeeklySummaryHandler<Store>>,
    pub sync: Arc<SyncTimeEntriesHandler<Store>>,
}

impl AppState {
    /// All mutating handlers share one writer, and with it one set of
    /// per-user locks.
    pub fn new(
        store: Arc<Store>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
        targets: WeeklyTargets,
    ) -> Self {
        let writer = Arc::new(EntryWriter::new(store.clone(), clock.clone(), timeout));
        Self {
            start_tracking: Arc::new(StartTrackingHandler::new(writer.clone())),
            stop_tracking: Arc::new(StopTrackingHandler::new(writer.clone())),
            create_manual_entry: Arc::new(CreateManualEntryHandler::new(writer.clone())),
            update_time_entry: Arc::new(UpdateTimeEntryHandler::new(writer.clone())),
            delete_time_entry: Arc::new(DeleteTimeEntryHandler::new(writer.clone())),
            queries: Arc::new(TimeEntryQueryHandler::new(store.clone(), timeout)),
            weekly_summary: Arc::new(WeeklySummaryHandler::new(store, clock, timeout, targets)),
            sync: Arc::new(SyncTimeEntriesHandler::new(writer)),
        }
    }
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(now: i64) -> Self {
        Self::with_clock(crate::shared::core::clock::MockClock::at(now))
    }

    pub fn with_clock(clock: crate::shared::core::clock::MockClock) -> Self {
        Self::new(
            Arc::new(InMemoryTimeEntryStore::new()),
            Arc::new(clock),
            Duration::from_millis(500),
            WeeklyTargets::default(),
        )
    }
}
