use fest_api::{KnockoutMatch, LeagueGroup, MedalRow, ResultRow, bracket};
use fest_api::{MedalSort, Outcome};
use tui::buffer::Buffer;
use tui::layout::{Constraint, Rect};
use tui::style::{Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget};

use crate::components::row_count;
use crate::components::theme::{Palette, Theme, resolve};

/// Rows taken by the block border plus the header line.
const TABLE_CHROME: u16 = 3;

pub const EMPTY_KNOCKOUT: &str = "Knockout stage not started yet";
pub const EMPTY_BRACKET: &str = "No bracket data available.";

fn bordered(title: String, theme: Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(resolve(Palette::Border, theme))
        .title(Span::styled(title, resolve(Palette::Accent, theme)))
}

// ---------------------------------------------------------------------------
// League table
// ---------------------------------------------------------------------------

pub fn league_height(group: &LeagueGroup) -> u16 {
    TABLE_CHROME.saturating_add(row_count(group.rows.len().max(1)))
}

pub fn render_league(group: &LeagueGroup, sport_label: &str, theme: Theme, area: Rect, buf: &mut Buffer) {
    let title = match &group.title {
        Some(t) => format!(" {sport_label} · {t} "),
        None => format!(" {sport_label} "),
    };
    let block = bordered(title, theme);

    if group.rows.is_empty() {
        Paragraph::new(Span::styled("No standings yet", resolve(Palette::Muted, theme)))
            .block(block)
            .render(area, buf);
        return;
    }

    let header = Row::new(["#", "Team", "P", "W", "L", "Pts"]).style(resolve(Palette::Header, theme));
    let rows = group.rows.iter().enumerate().map(|(i, r)| {
        Row::new(vec![
            Cell::from((i + 1).to_string()),
            Cell::from(r.team.clone()),
            Cell::from(r.played.to_string()),
            Cell::from(r.won.to_string()),
            Cell::from(r.lost.to_string()),
            Cell::from(r.points.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
        ])
        .style(resolve(Palette::Text, theme))
    });
    let widths = [
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
    ];
    Table::new(rows, widths).header(header).block(block).render(area, buf);
}

// ---------------------------------------------------------------------------
// Knockout match list
// ---------------------------------------------------------------------------

pub fn match_list_height(matches: &[KnockoutMatch]) -> u16 {
    row_count(matches.len().max(1)).saturating_add(2)
}

pub fn winner_line(m: &KnockoutMatch) -> String {
    if m.is_decided() {
        format!("Winner: {}", m.result)
    } else {
        format!("Result: {}", bracket::NO_SCORE)
    }
}

pub fn render_match_list(matches: &[KnockoutMatch], theme: Theme, area: Rect, buf: &mut Buffer) {
    let block = bordered(" Knockout ".to_string(), theme);
    let lines: Vec<Line> = if matches.is_empty() {
        vec![Line::from(Span::styled(EMPTY_KNOCKOUT, resolve(Palette::Muted, theme)))]
    } else {
        matches
            .iter()
            .map(|m| {
                let team_style = |team: &str| {
                    if m.is_winner(team) {
                        resolve(Palette::Winner, theme)
                    } else {
                        resolve(Palette::Text, theme)
                    }
                };
                Line::from(vec![
                    Span::styled(format!("{:<14} ", m.round), resolve(Palette::Muted, theme)),
                    Span::styled(m.team1_label().to_string(), team_style(&m.team1)),
                    Span::raw(" vs "),
                    Span::styled(m.team2_label().to_string(), team_style(&m.team2)),
                    Span::raw("  "),
                    Span::styled(winner_line(m), resolve(Palette::Accent, theme)),
                ])
            })
            .collect()
    };
    Paragraph::new(lines).block(block).render(area, buf);
}

// ---------------------------------------------------------------------------
// Medal table
// ---------------------------------------------------------------------------

pub fn render_medals(rows: &[MedalRow], sort: MedalSort, theme: Theme, area: Rect, buf: &mut Buffer) {
    let block = bordered(format!(" Medal Tally · {} (s) ", sort.label()), theme);

    if rows.is_empty() {
        Paragraph::new(Span::styled("No medals awarded yet", resolve(Palette::Muted, theme)))
            .block(block)
            .render(area, buf);
        return;
    }

    let header =
        Row::new(["#", "Team", "Gold", "Silver", "Bronze", "Total"]).style(resolve(Palette::Header, theme));
    let body = rows.iter().enumerate().map(|(i, r)| {
        let style = if i < 3 {
            resolve(Palette::Selected, theme)
        } else {
            resolve(Palette::Text, theme)
        };
        Row::new(vec![
            (i + 1).to_string(),
            r.team.clone(),
            r.gold.to_string(),
            r.silver.to_string(),
            r.bronze.to_string(),
            r.total.to_string(),
        ])
        .style(style)
    });
    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(6),
    ];
    Table::new(body, widths).header(header).block(block).render(area, buf);
}

// ---------------------------------------------------------------------------
// Schedule / results
// ---------------------------------------------------------------------------

fn side_style(outcome: Outcome, side: Outcome, theme: Theme) -> Style {
    match outcome {
        Outcome::Tie => resolve(Palette::Tie, theme),
        o if o == side => resolve(Palette::Winner, theme),
        _ => resolve(Palette::Loser, theme),
    }
}

pub fn result_line(row: &ResultRow, selected: bool, theme: Theme) -> Line<'static> {
    let outcome = row.outcome();
    let marker = if selected { "▶ " } else { "  " };
    Line::from(vec![
        Span::styled(marker, resolve(Palette::Accent, theme)),
        Span::styled(format!("{} {}", row.team_a, row.score_a), side_style(outcome, Outcome::TeamA, theme)),
        Span::raw("  -  "),
        Span::styled(format!("{} {}", row.score_b, row.team_b), side_style(outcome, Outcome::TeamB, theme)),
    ])
}

pub fn detail_lines(row: &ResultRow, theme: Theme) -> Vec<Line<'static>> {
    let muted = resolve(Palette::Muted, theme);
    let text = resolve(Palette::Text, theme);
    [
        ("Time", row.time_label()),
        ("Venue", row.venue_label()),
        ("Referee", row.referee_label()),
        ("Notes", row.notes_label()),
    ]
    .into_iter()
    .map(|(k, v)| Line::from(vec![Span::styled(format!("{k:<8} "), muted), Span::styled(v.to_string(), text)]))
    .collect()
}

pub fn render_schedule(
    rows: &[ResultRow],
    selected: usize,
    sport_label: &str,
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = bordered(format!(" {sport_label} · Results "), theme);
    let inner = block.inner(area);
    block.render(area, buf);

    if rows.is_empty() {
        Paragraph::new(Span::styled("No results yet", resolve(Palette::Muted, theme))).render(inner, buf);
        return;
    }

    let details_h = 6u16.min(inner.height / 2);
    let list_h = inner.height.saturating_sub(details_h);
    let list_area = Rect { height: list_h, ..inner };
    let detail_area = Rect { y: inner.y + list_h, height: details_h, ..inner };

    // Keep the selection visible.
    let skip = selected.saturating_sub(list_h.saturating_sub(1) as usize);
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, r)| result_line(r, i == selected, theme))
        .collect();
    Paragraph::new(lines).render(list_area, buf);

    if let Some(row) = rows.get(selected) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(resolve(Palette::Border, theme))
            .title(Span::styled(" Details ", resolve(Palette::Muted, theme)));
        Paragraph::new(detail_lines(row, theme))
            .block(block)
            .render(detail_area, buf);
    }
}
