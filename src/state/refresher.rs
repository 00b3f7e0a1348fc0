use crate::state::messages::{NetworkRequest, RefreshReason};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Re-fetches the sheet on a fixed interval. Aborted with the other tasks when
/// the UI loop exits.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut ticker = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let request = NetworkRequest::Refresh { reason: RefreshReason::Timer };
            if self.network_requests.send(request).await.is_err() {
                break;
            }
        }
    }
}
