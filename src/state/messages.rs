use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use fest_api::FestData;

/// What caused a fetch. Only used for logging; every reason fetches the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Startup,
    Manual,
    SportChanged,
    Timer,
}

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    Refresh { reason: RefreshReason },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// The worker accepted a request and tagged it with `seq`.
    FetchStarted { seq: u64 },
    SnapshotLoaded { seq: u64, data: FestData },
    Error { seq: u64, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
