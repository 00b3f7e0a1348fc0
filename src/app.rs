use crate::components::theme::Theme;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use fest_api::{FestData, MedalRow, ResultRow, SportCatalog, SportView};
use log::{error, info, warn};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Standings,
    Medals,
    Schedule,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub catalog: SportCatalog,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        let catalog = match settings.catalog_path.as_deref() {
            Some(path) => SportCatalog::load(path).unwrap_or_else(|e| {
                error!("{e}; using the built-in sport table");
                SportCatalog::default()
            }),
            None => SportCatalog::default(),
        };

        Self::with_catalog(settings, catalog)
    }

    pub fn with_catalog(settings: AppSettings, catalog: SportCatalog) -> Self {
        if catalog.sports.is_empty() {
            warn!("sport catalog lists no sports");
        }
        Self { settings, state: AppState::new(), catalog }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_fetch_started(&mut self, seq: u64) {
        self.state.sheet.begin(seq);
    }

    pub fn on_snapshot_loaded(&mut self, seq: u64, data: FestData) {
        if self.state.sheet.apply_success(seq, data) {
            self.clamp_schedule_selection();
        }
    }

    pub fn on_fetch_failed(&mut self, seq: u64, message: String) {
        if self.state.sheet.apply_failure(seq, message) {
            self.state.schedule.selected = 0;
            self.state.standings.scroll_offset = 0;
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggle();
        match self.settings.save() {
            Ok(()) => info!("theme set to {}", self.settings.theme.label()),
            Err(e) => warn!("could not persist theme: {e}"),
        }
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    // -----------------------------------------------------------------------
    // Sport selector
    // -----------------------------------------------------------------------

    pub fn selected_sport(&self) -> Option<&str> {
        self.catalog
            .sports
            .get(self.state.standings.selected_sport)
            .map(String::as_str)
    }

    /// Returns true when the selection moved, which should trigger a fetch.
    pub fn next_sport(&mut self) -> bool {
        let count = self.catalog.sports.len();
        if count < 2 {
            return false;
        }
        self.select_sport((self.state.standings.selected_sport + 1) % count);
        true
    }

    pub fn prev_sport(&mut self) -> bool {
        let count = self.catalog.sports.len();
        if count < 2 {
            return false;
        }
        self.select_sport((self.state.standings.selected_sport + count - 1) % count);
        true
    }

    fn select_sport(&mut self, idx: usize) {
        self.state.standings.selected_sport = idx;
        self.state.standings.scroll_offset = 0;
        self.state.schedule.selected = 0;
    }

    pub fn sport_view(&self) -> Option<SportView> {
        let sport = self.selected_sport()?;
        Some(self.state.sheet.data.sport_view(sport, &self.catalog))
    }

    pub fn scroll_down(&mut self) {
        self.state.standings.scroll_offset = self.state.standings.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.state.standings.scroll_offset = self.state.standings.scroll_offset.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Medals
    // -----------------------------------------------------------------------

    pub fn toggle_medal_sort(&mut self) {
        self.state.medal_sort = self.state.medal_sort.toggle();
    }

    pub fn medal_table(&self) -> Vec<MedalRow> {
        self.state.sheet.data.medal_table(self.state.medal_sort)
    }

    // -----------------------------------------------------------------------
    // Schedule
    // -----------------------------------------------------------------------

    pub fn schedule_rows(&self) -> &[ResultRow] {
        match self.selected_sport() {
            Some(sport) => self.state.sheet.data.results_for(sport),
            None => &[],
        }
    }

    pub fn schedule_down(&mut self) {
        let max = self.schedule_rows().len().saturating_sub(1);
        if self.state.schedule.selected < max {
            self.state.schedule.selected += 1;
        }
    }

    pub fn schedule_up(&mut self) {
        self.state.schedule.selected = self.state.schedule.selected.saturating_sub(1);
    }

    fn clamp_schedule_selection(&mut self) {
        let max = self.schedule_rows().len().saturating_sub(1);
        self.state.schedule.selected = self.state.schedule.selected.min(max);
    }
}
