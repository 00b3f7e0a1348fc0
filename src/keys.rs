use crate::app::{App, MenuItem};
use crate::state::messages::{NetworkRequest, RefreshReason};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> KeyOutcome {
    let mut guard = app.lock().await;
    let mut refresh = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => return KeyOutcome::Quit,

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Medals),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Schedule),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Sport selector, shared by standings and schedule
        (MenuItem::Standings | MenuItem::Schedule, Char('l') | KeyCode::Right, _) => {
            if guard.next_sport() {
                refresh = Some(RefreshReason::SportChanged);
            }
        }
        (MenuItem::Standings | MenuItem::Schedule, Char('h') | KeyCode::Left, _) => {
            if guard.prev_sport() {
                refresh = Some(RefreshReason::SportChanged);
            }
        }

        // Standings scrolling
        (MenuItem::Standings, Char('j') | KeyCode::Down, _) => guard.scroll_down(),
        (MenuItem::Standings, Char('k') | KeyCode::Up, _) => guard.scroll_up(),

        // Schedule navigation
        (MenuItem::Schedule, Char('j') | KeyCode::Down, _) => guard.schedule_down(),
        (MenuItem::Schedule, Char('k') | KeyCode::Up, _) => guard.schedule_up(),

        // Medals
        (MenuItem::Medals, Char('s'), _) => guard.toggle_medal_sort(),

        // Global
        (_, Char('r'), _) => refresh = Some(RefreshReason::Manual),
        (_, Char('t'), _) => guard.toggle_theme(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(reason) = refresh {
        drop(guard);
        let _ = network_requests.send(NetworkRequest::Refresh { reason }).await;
    }
    KeyOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use fest_api::SportCatalog;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(Char(c), KeyModifiers::NONE)
    }

    fn setup() -> (Arc<Mutex<App>>, mpsc::Sender<NetworkRequest>, mpsc::Receiver<NetworkRequest>) {
        let app = Arc::new(Mutex::new(App::with_catalog(AppSettings::default(), SportCatalog::default())));
        let (tx, rx) = mpsc::channel(8);
        (app, tx, rx)
    }

    #[tokio::test]
    async fn changing_sport_requests_a_fetch() {
        let (app, tx, mut rx) = setup();
        assert_eq!(handle_key_bindings(key('l'), &app, &tx).await, KeyOutcome::Continue);
        let Ok(NetworkRequest::Refresh { reason }) = rx.try_recv() else {
            panic!("expected refresh");
        };
        assert_eq!(reason, RefreshReason::SportChanged);
        assert_eq!(app.lock().await.selected_sport(), Some("Football"));
    }

    #[tokio::test]
    async fn manual_refresh_and_quit() {
        let (app, tx, mut rx) = setup();
        handle_key_bindings(key('r'), &app, &tx).await;
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkRequest::Refresh { reason: RefreshReason::Manual })
        ));
        let ctrl_c = KeyEvent::new(Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_bindings(ctrl_c, &app, &tx).await, KeyOutcome::Quit);
    }

    #[tokio::test]
    async fn sort_key_only_applies_on_medals_tab() {
        let (app, tx, _rx) = setup();
        handle_key_bindings(key('s'), &app, &tx).await;
        assert_eq!(app.lock().await.state.medal_sort, fest_api::MedalSort::Gold);
        handle_key_bindings(key('2'), &app, &tx).await;
        handle_key_bindings(key('s'), &app, &tx).await;
        assert_eq!(app.lock().await.state.medal_sort, fest_api::MedalSort::Total);
    }
}
