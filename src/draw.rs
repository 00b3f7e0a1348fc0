use fest_api::bracket::Bracket;
use fest_api::{KnockoutMatch, KnockoutView, LeagueGroup, SportView};
use log::error;
use tui::backend::Backend;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Widget};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::bracket::BracketView;
use crate::components::tables;
use crate::components::theme::{Palette, Theme, resolve};
use crate::state::app_state::FetchState;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 3] = &["Standings", "Medals", "Schedule"];

/// Off-screen standings are cut off below this many rows.
const MAX_CANVAS_ROWS: u16 = 4096;

const HELP_TEXT: &[(&str, &str)] = &[
    ("q / Ctrl-C", "quit"),
    ("1 2 3", "Standings / Medals / Schedule"),
    ("h l  ← →", "previous / next sport"),
    ("j k  ↓ ↑", "scroll standings, move in schedule"),
    ("r", "refresh now"),
    ("s", "toggle medal sort (Medals tab)"),
    ("t", "toggle dark / light theme"),
    ("f", "full screen"),
    ("\"", "show / hide logs"),
    ("Esc", "close help"),
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_status(f, layout.status, app);
        }

        match app.state.active_tab {
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Medals => draw_medals(f, layout.main, app),
            MenuItem::Schedule => draw_schedule(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main, app.theme()),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs, app.theme());
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(theme: Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(resolve(Palette::Border, theme))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = resolve(Palette::Text, app.theme());
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Standings => 0,
        MenuItem::Medals => 1,
        MenuItem::Schedule => 2,
        MenuItem::Help => match app.state.previous_tab {
            MenuItem::Medals => 1,
            MenuItem::Schedule => 2,
            _ => 0,
        },
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// "◀ Football ▶  League" header shared by the standings and schedule tabs.
fn sport_selector(app: &App) -> Line<'static> {
    let theme = app.theme();
    let Some(sport) = app.selected_sport() else {
        return Line::from(Span::styled("No sports configured", resolve(Palette::Muted, theme)));
    };
    let format = app.catalog.classify(sport).map(|f| f.label()).unwrap_or("");
    Line::from(vec![
        Span::styled("◀ ", resolve(Palette::Muted, theme)),
        Span::styled(sport.to_string(), resolve(Palette::Accent, theme)),
        Span::styled(" ▶  ", resolve(Palette::Muted, theme)),
        Span::styled(format, resolve(Palette::Muted, theme)),
    ])
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

enum Section<'a> {
    League(&'a LeagueGroup),
    MatchList(&'a [KnockoutMatch]),
    Bracket(&'a Bracket),
    Note(&'static str),
}

impl Section<'_> {
    fn height(&self, width: u16, theme: Theme) -> u16 {
        match self {
            Section::League(group) => tables::league_height(group),
            Section::MatchList(matches) => tables::match_list_height(matches),
            Section::Bracket(bracket) => BracketView { bracket: *bracket, theme }.height(width),
            Section::Note(_) => 1,
        }
    }

    fn render(&self, sport: &str, theme: Theme, area: Rect, buf: &mut Buffer) {
        match self {
            Section::League(group) => tables::render_league(group, sport, theme, area, buf),
            Section::MatchList(matches) => tables::render_match_list(matches, theme, area, buf),
            Section::Bracket(bracket) => BracketView { bracket: *bracket, theme }.render(area, buf),
            Section::Note(text) => {
                Paragraph::new(*text).style(resolve(Palette::Muted, theme)).render(area, buf)
            }
        }
    }
}

fn sections(view: &SportView) -> Vec<Section<'_>> {
    let mut out: Vec<Section> = view
        .league
        .iter()
        .flatten()
        .map(Section::League)
        .collect();
    match &view.knockout {
        KnockoutView::None => {}
        KnockoutView::MatchList(matches) => out.push(Section::MatchList(matches)),
        KnockoutView::Bracket(bracket) if bracket.is_empty() => {
            out.push(Section::Note(tables::EMPTY_BRACKET))
        }
        KnockoutView::Bracket(bracket) => out.push(Section::Bracket(bracket)),
    }
    out
}

fn draw_standings(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme();
    let block = default_border(theme).title(" Standings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, content] = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(sport_selector(app)), header);

    let Some(view) = app.sport_view() else {
        return;
    };
    if view.is_empty() || content.width == 0 || content.height == 0 {
        return;
    }

    // Render everything into an off-screen buffer, then copy the visible window.
    let sport = app.selected_sport().unwrap_or_default().to_string();
    let parts = sections(&view);
    let heights: Vec<u16> = parts.iter().map(|s| s.height(content.width, theme)).collect();
    let total = heights
        .iter()
        .fold(0u16, |acc, h| acc.saturating_add(h.saturating_add(1)))
        .min(MAX_CANVAS_ROWS);

    let mut canvas = Buffer::empty(Rect { x: 0, y: 0, width: content.width, height: total });
    let mut y: u16 = 0;
    for (section, h) in parts.iter().zip(&heights) {
        let area = Rect { x: 0, y, width: content.width, height: *h }.intersection(canvas.area);
        if area.is_empty() {
            break;
        }
        section.render(&sport, theme, area, &mut canvas);
        y = y.saturating_add(h.saturating_add(1));
    }

    let max_scroll = total.saturating_sub(content.height);
    let scroll = app.state.standings.scroll_offset.min(max_scroll);
    app.state.standings.scroll_offset = scroll;
    blit(&canvas, scroll, content, f.buffer_mut());
}

fn blit(src: &Buffer, scroll: u16, dest_area: Rect, dest: &mut Buffer) {
    let rows = dest_area.height.min(src.area.height.saturating_sub(scroll));
    for dy in 0..rows {
        for dx in 0..dest_area.width.min(src.area.width) {
            if let (Some(cell), Some(target)) = (
                src.cell((dx, dy + scroll)),
                dest.cell_mut((dest_area.x + dx, dest_area.y + dy)),
            ) {
                *target = cell.clone();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Medals / Schedule / Help
// ---------------------------------------------------------------------------

fn draw_medals(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.medal_table();
    tables::render_medals(&rows, app.state.medal_sort, app.theme(), area, f.buffer_mut());
}

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let [header, body] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    f.render_widget(Paragraph::new(sport_selector(app)), header);
    let sport = app.selected_sport().unwrap_or_default();
    tables::render_schedule(
        app.schedule_rows(),
        app.state.schedule.selected,
        sport,
        app.theme(),
        body,
        f.buffer_mut(),
    );
}

fn draw_help(f: &mut Frame, area: Rect, theme: Theme) {
    let block = default_border(theme).title(" Help ");
    let lines: Vec<Line> = HELP_TEXT
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:<14}"), resolve(Palette::Accent, theme)),
                Span::styled(*action, resolve(Palette::Text, theme)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_logs(f: &mut Frame, area: Rect, theme: Theme) {
    if area.height == 0 {
        return;
    }
    let widget = TuiLoggerWidget::default()
        .block(default_border(theme).title(" Logs "))
        .style_error(resolve(Palette::Error, theme))
        .style_warn(resolve(Palette::Accent, theme))
        .style_info(resolve(Palette::Text, theme))
        .style_debug(resolve(Palette::Muted, theme));
    f.render_widget(widget, area);
}

pub fn status_text(app: &App) -> String {
    let sheet = &app.state.sheet;
    let mut parts = Vec::new();
    if !sheet.status.is_empty() {
        parts.push(sheet.status.clone());
    }
    if let Some(err) = sheet.last_error.as_deref() {
        parts.push(err.to_string());
    }
    if let Some(at) = sheet.last_refreshed.as_deref() {
        parts.push(format!("Last refreshed {at}"));
    }
    parts.push(format!("auto-refresh {}s", app.settings.refresh_interval.as_secs()));
    parts.join(" · ")
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let theme = app.theme();
    let style = match app.state.sheet.fetch {
        FetchState::Error => resolve(Palette::Error, theme),
        _ => resolve(Palette::Muted, theme),
    };
    f.render_widget(Paragraph::new(format!(" {}", status_text(app))).style(style), area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => resolve(Palette::Error, app.theme()),
        _ => resolve(Palette::Text, app.theme()),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
