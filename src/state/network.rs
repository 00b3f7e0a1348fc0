use crate::state::messages::{NetworkRequest, NetworkResponse};
use fest_api::client::FestApi;
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the HTTP client. Every request gets the next sequence number and runs
/// in its own task, so a slow fetch never blocks a newer one; the UI decides
/// which response is current.
pub struct NetworkWorker {
    client: Arc<FestApi>,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    next_seq: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
}

impl NetworkWorker {
    pub fn new(
        client: FestApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: Arc::new(client),
            requests,
            responses,
            next_seq: Arc::new(AtomicU64::new(1)),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let NetworkRequest::Refresh { reason } = request;
            let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
            debug!("fetch #{seq} requested ({reason:?})");

            if self.responses.send(NetworkResponse::FetchStarted { seq }).await.is_err() {
                break;
            }
            self.start_loading_animation().await;

            let client = self.client.clone();
            let responses = self.responses.clone();
            let in_flight = self.in_flight.clone();
            tokio::spawn(async move {
                let result = client.fetch_snapshot().await;
                let is_ok = result.is_ok();
                let response = match result {
                    Ok(data) => NetworkResponse::SnapshotLoaded { seq, data },
                    Err(err) => NetworkResponse::Error { seq, message: err.to_string() },
                };
                debug!("fetch #{seq} complete (ok={is_ok})");
                if let Err(e) = responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
                stop_loading_animation(&in_flight, &responses, is_ok).await;
            });
        }
    }

    async fn start_loading_animation(&self) {
        // Only the first concurrent request drives the spinner.
        if self.in_flight.fetch_add(1, Ordering::AcqRel) > 0 {
            return;
        }

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let in_flight = self.in_flight.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if in_flight.load(Ordering::Acquire) == 0 {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                if responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
    }
}

async fn stop_loading_animation(
    in_flight: &AtomicUsize,
    responses: &mpsc::Sender<NetworkResponse>,
    is_ok: bool,
) {
    if in_flight.fetch_sub(1, Ordering::AcqRel) > 1 {
        return;
    }
    tokio::time::sleep(Duration::from_millis(15)).await;

    let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged {
            loading_state: LoadingState { is_loading: false, spinner_char },
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::messages::RefreshReason;

    async fn collect_until_done(rx: &mut mpsc::Receiver<NetworkResponse>, expected: usize) -> Vec<NetworkResponse> {
        let mut out = Vec::new();
        let mut finished = 0;
        while finished < expected {
            let Some(resp) = rx.recv().await else { break };
            if matches!(resp, NetworkResponse::SnapshotLoaded { .. } | NetworkResponse::Error { .. }) {
                finished += 1;
            }
            out.push(resp);
        }
        out
    }

    #[tokio::test]
    async fn requests_get_increasing_sequence_numbers() {
        let (req_tx, req_rx) = mpsc::channel(8);
        let (resp_tx, mut resp_rx) = mpsc::channel(256);
        let worker = NetworkWorker::new(FestApi::new(None), req_rx, resp_tx);
        let task = tokio::spawn(worker.run());

        for reason in [RefreshReason::Startup, RefreshReason::Manual] {
            req_tx.send(NetworkRequest::Refresh { reason }).await.unwrap();
        }
        let responses = collect_until_done(&mut resp_rx, 2).await;
        task.abort();

        let started: Vec<u64> = responses
            .iter()
            .filter_map(|r| match r {
                NetworkResponse::FetchStarted { seq } => Some(*seq),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec![1, 2]);

        // No endpoint configured: both fetches fail rather than panic.
        let errors = responses.iter().filter(|r| matches!(r, NetworkResponse::Error { .. })).count();
        assert_eq!(errors, 2);
    }
}
