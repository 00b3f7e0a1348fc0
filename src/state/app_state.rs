use crate::app::MenuItem;
use chrono::Local;
use fest_api::{FestData, MedalSort};
use log::debug;

pub const STATUS_LOADING: &str = "Loading…";
pub const STATUS_LOADED: &str = "Loaded from sheet.";
pub const STATUS_FAILED: &str = "Failed to load data";

// ---------------------------------------------------------------------------
// Sheet / fetch state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Default)]
pub struct SheetState {
    pub data: FestData,
    pub fetch: FetchState,
    pub status: String,
    /// Detail of the most recent failure, shown next to the status line.
    pub last_error: Option<String>,
    /// Local "HH:MM:SS" of the last applied response.
    pub last_refreshed: Option<String>,
    /// Sequence number of the newest response applied so far.
    last_applied: u64,
    latest_started: u64,
}

impl SheetState {
    pub fn begin(&mut self, seq: u64) {
        self.latest_started = self.latest_started.max(seq);
        self.fetch = FetchState::Loading;
        self.status = STATUS_LOADING.to_string();
    }

    fn is_stale(&self, seq: u64) -> bool {
        if seq <= self.last_applied {
            debug!("discarding response #{seq}, #{} already applied", self.last_applied);
            return true;
        }
        false
    }

    fn settle(&mut self, seq: u64) {
        self.last_applied = seq;
        self.last_refreshed = Some(Local::now().format("%H:%M:%S").to_string());
    }

    /// Returns false when the response was stale and ignored.
    pub fn apply_success(&mut self, seq: u64, data: FestData) -> bool {
        if self.is_stale(seq) {
            return false;
        }
        self.settle(seq);
        self.data = data;
        self.last_error = None;
        self.fetch = self.resolved(FetchState::Success);
        self.status = STATUS_LOADED.to_string();
        true
    }

    /// Failure clears the data so nothing stale stays on screen.
    pub fn apply_failure(&mut self, seq: u64, message: String) -> bool {
        if self.is_stale(seq) {
            return false;
        }
        self.settle(seq);
        self.data = FestData::default();
        self.last_error = Some(message);
        self.fetch = self.resolved(FetchState::Error);
        self.status = STATUS_FAILED.to_string();
        true
    }

    /// Stays in Loading while a newer request is still out.
    fn resolved(&self, outcome: FetchState) -> FetchState {
        if self.latest_started > self.last_applied {
            FetchState::Loading
        } else {
            outcome
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tab state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StandingsState {
    /// Index into the catalog's sport list.
    pub selected_sport: usize,
    pub scroll_offset: u16,
}

#[derive(Debug, Default)]
pub struct ScheduleState {
    pub selected: usize,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub sheet: SheetState,
    pub standings: StandingsState,
    pub schedule: ScheduleState,
    pub medal_sort: MedalSort,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
