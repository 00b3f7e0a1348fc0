use fest_api::KnockoutMatch;
use fest_api::bracket::{Bracket, BracketRound, score_label};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Modifier, Style};
use tui::widgets::Widget;

use crate::components::row_count;
use crate::components::theme::{Palette, Theme, resolve};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per match cell: team-one line, status line, team-two line.
pub const MATCH_HEIGHT: u16 = 3;

/// Width of the connector zone drawn between adjacent round columns.
pub const CONNECTOR_WIDTH: u16 = 3;

/// Maximum match cell width in wider terminals.
const CELL_W_FULL: u16 = 22;

/// Rows above the tree used for round titles.
const TITLE_ROWS: u16 = 2;

/// Slot height at bracket depth `d`: SH[0] = MATCH_HEIGHT, SH[d] = 2 * SH[d-1] + 1.
pub fn slot_height(depth: usize) -> u16 {
    (0..depth).fold(MATCH_HEIGHT, |sh, _| sh.saturating_mul(2).saturating_add(1))
}

// ---------------------------------------------------------------------------
// MatchCell / BracketGrid: layout engine
// ---------------------------------------------------------------------------

/// Pre-computed layout position for one match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCell {
    /// Row of the status line (middle of the 3-row cell), relative to the tree origin.
    pub center_row: u16,
    /// Starting x-column relative to the grid origin.
    pub col: u16,
    pub cell_width: u16,
    /// Round index in display order.
    pub depth: usize,
    /// Index of the match within its round.
    pub match_idx: usize,
}

/// Layout for a bracket whose round `d` holds `counts[d]` matches.
///
/// Each round's centers follow the triangle formula
/// `center[d][i] = SH[d]/2 + i * (SH[d] + 1)`, so a parent sits on the midpoint
/// of its two children whenever the sheet describes a complete tree. Uneven
/// rounds still get a stable position; connectors are only drawn for complete pairs.
#[derive(Debug, Clone)]
pub struct BracketGrid {
    pub cells: Vec<MatchCell>,
    pub round_cols: Vec<u16>,
    pub cell_width: u16,
    /// Rows used by the tree (title rows excluded).
    pub tree_height: u16,
    offsets: Vec<usize>,
}

impl BracketGrid {
    pub fn compute(counts: &[usize], width: u16) -> Self {
        let rounds = row_count(counts.len().max(1));
        let connector_total = CONNECTOR_WIDTH.saturating_mul(rounds - 1);
        let cell_width = (width.saturating_sub(connector_total) / rounds).clamp(1, CELL_W_FULL);
        let stride = cell_width + CONNECTOR_WIDTH;

        let mut cells = Vec::with_capacity(counts.iter().sum());
        let mut round_cols = Vec::with_capacity(counts.len());
        let mut offsets = vec![0];
        let mut tree_height = 0u16;

        for (depth, &count) in counts.iter().enumerate() {
            let sh = slot_height(depth);
            let col = stride.saturating_mul(row_count(depth));
            round_cols.push(col);
            for i in 0..count {
                // Rows past u16::MAX pile up on the last row and are clipped at render time.
                let center_row = (sh / 2).saturating_add(row_count(i).saturating_mul(sh.saturating_add(1)));
                tree_height = tree_height.max(center_row.saturating_add(2));
                cells.push(MatchCell { center_row, col, cell_width, depth, match_idx: i });
            }
            offsets.push(cells.len());
        }

        Self { cells, round_cols, cell_width, tree_height, offsets }
    }

    pub fn cells_for_depth(&self, depth: usize) -> &[MatchCell] {
        match (self.offsets.get(depth), self.offsets.get(depth + 1)) {
            (Some(&start), Some(&end)) => &self.cells[start..end],
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// BracketView widget
// ---------------------------------------------------------------------------

/// Knockout bracket: one column per round, connectors between them, and the
/// bronze match listed underneath.
pub struct BracketView<'a> {
    pub bracket: &'a Bracket,
    pub theme: Theme,
}

impl BracketView<'_> {
    fn counts(&self) -> Vec<usize> {
        self.bracket.rounds.iter().map(|r| r.matches.len()).collect()
    }

    /// Total rows the widget wants for the given width.
    pub fn height(&self, width: u16) -> u16 {
        let grid = BracketGrid::compute(&self.counts(), width);
        let tree = if self.bracket.rounds.is_empty() {
            0
        } else {
            TITLE_ROWS.saturating_add(grid.tree_height)
        };
        let bronze = self
            .bracket
            .bronze
            .as_ref()
            .map(|b| 2u16.saturating_add(row_count(b.matches.len()).saturating_mul(MATCH_HEIGHT + 1)))
            .unwrap_or(0);
        tree.saturating_add(bronze)
    }
}

impl Widget for BracketView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 12 || area.height < MATCH_HEIGHT {
            return;
        }

        let grid = BracketGrid::compute(&self.counts(), area.width);
        let accent = resolve(Palette::Accent, self.theme);
        let mut y_after_tree = area.y;

        if !self.bracket.rounds.is_empty() {
            for (depth, round) in self.bracket.rounds.iter().enumerate() {
                let x = area.x.saturating_add(grid.round_cols[depth]);
                let title: String = round.label.chars().take(grid.cell_width as usize).collect();
                set_clipped(buf, area, x, area.y, &title, accent);
            }

            let tree = Rect {
                y: area.y.saturating_add(TITLE_ROWS),
                height: area.height.saturating_sub(TITLE_ROWS),
                ..area
            };

            // Pass 1: match cells
            for cell in &grid.cells {
                let m = &self.bracket.rounds[cell.depth].matches[cell.match_idx];
                let (x, y) = (tree.x.saturating_add(cell.col), tree.y.saturating_add(cell.center_row));
                if y.saturating_sub(1) >= tree.bottom() {
                    continue;
                }
                draw_match_cell(m, x, y, cell.cell_width, tree, self.theme, buf);
            }

            // Pass 2: connectors from each complete child pair to its parent.
            for depth in 0..self.bracket.rounds.len().saturating_sub(1) {
                let children = grid.cells_for_depth(depth);
                let parents = grid.cells_for_depth(depth + 1);
                let conn_x = tree.x.saturating_add(grid.round_cols[depth]).saturating_add(grid.cell_width);
                for (j, parent) in parents.iter().enumerate() {
                    let (Some(a), Some(b)) = (children.get(2 * j), children.get(2 * j + 1)) else {
                        continue;
                    };
                    draw_connector(a.center_row, parent.center_row, b.center_row, conn_x, tree, self.theme, buf);
                }
            }

            y_after_tree = tree.y.saturating_add(grid.tree_height);
        }

        if let Some(bronze) = &self.bracket.bronze {
            draw_bronze(bronze, area, y_after_tree, grid.cell_width, self.theme, buf);
        }
    }
}

fn draw_bronze(round: &BracketRound, area: Rect, y: u16, cell_w: u16, theme: Theme, buf: &mut Buffer) {
    let title_y = y.saturating_add(1);
    set_clipped(buf, area, area.x, title_y, "Bronze", resolve(Palette::Accent, theme));
    for (i, m) in round.matches.iter().enumerate() {
        let center = title_y
            .saturating_add(2)
            .saturating_add(row_count(i).saturating_mul(MATCH_HEIGHT + 1));
        if center.saturating_sub(1) >= area.bottom() {
            break;
        }
        draw_match_cell(m, area.x, center, cell_w, area, theme, buf);
    }
}

// ---------------------------------------------------------------------------
// Shared drawing helpers
// ---------------------------------------------------------------------------

/// Draw one 3-row match cell centred on `center_y`, clipped to `area`.
fn draw_match_cell(
    m: &KnockoutMatch,
    x: u16,
    center_y: u16,
    cell_w: u16,
    area: Rect,
    theme: Theme,
    buf: &mut Buffer,
) {
    let base = resolve(Palette::Text, theme);
    let winner = resolve(Palette::Winner, theme);
    let dim = resolve(Palette::Muted, theme);
    let width = cell_w as usize;

    let rows = [
        (center_y.saturating_sub(1), format_team_line(m.team1_label(), m.score1.as_deref(), width), m.is_winner(&m.team1)),
        (center_y, format_status_line(m, width), false),
        (center_y.saturating_add(1), format_team_line(m.team2_label(), m.score2.as_deref(), width), m.is_winner(&m.team2)),
    ];

    for (idx, (y, text, is_winner)) in rows.into_iter().enumerate() {
        let style = match (idx, is_winner) {
            (1, _) => dim,
            (_, true) => winner.add_modifier(Modifier::BOLD),
            _ => base,
        };
        set_clipped(buf, area, x, y, &text, style);
    }
}

/// `"[name        ] [score]"`, exactly `width` columns.
pub fn format_team_line(name: &str, score: Option<&str>, width: usize) -> String {
    let score = score_label(score);
    let score: String = score.chars().take(3).collect();
    let name_w = width.saturating_sub(5);
    let name: String = name.chars().take(name_w).collect();
    let line = format!("{name:<name_w$} {score:>3} ");
    line.chars().take(width).collect()
}

fn format_status_line(m: &KnockoutMatch, width: usize) -> String {
    let raw = if m.is_decided() { " FINAL" } else { "" };
    let padded = format!("{raw:<width$}");
    padded.chars().take(width).collect()
}

/// Box-drawing connector between one parent and its two children.
///
/// ```text
///  child_top  ──┐
///               │
///  parent     ──├──
///               │
///  child_bot  ──┘
/// ```
fn draw_connector(r_top: u16, r_mid: u16, r_bot: u16, conn_x: u16, area: Rect, theme: Theme, buf: &mut Buffer) {
    let style = resolve(Palette::Border, theme);
    let (col_a, col_b, col_c) = (conn_x, conn_x.saturating_add(1), conn_x.saturating_add(2));
    let put = |buf: &mut Buffer, x: u16, row: u16, ch: char| {
        let y = area.y.saturating_add(row);
        if x < area.right() && y < area.bottom() {
            put_char(buf, x, y, ch, style);
        }
    };
    // Vertical runs past the area are invisible; stop them at its edge.
    let last_row = area.height;

    put(buf, col_a, r_top, '─');
    put(buf, col_b, r_top, '┐');
    for row in r_top.saturating_add(1)..r_mid.min(last_row) {
        put(buf, col_b, row, '│');
    }
    put(buf, col_a, r_mid, ' ');
    put(buf, col_b, r_mid, '├');
    put(buf, col_c, r_mid, '─');
    for row in r_mid.saturating_add(1)..r_bot.min(last_row) {
        put(buf, col_b, row, '│');
    }
    put(buf, col_a, r_bot, '─');
    put(buf, col_b, r_bot, '┘');
}

fn set_clipped(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < area.y || y >= area.bottom() || x < area.x || x >= area.right() {
        return;
    }
    let avail = (area.right() - x) as usize;
    let clipped: String = text.chars().take(avail).collect();
    buf.set_string(x, y, clipped, style);
}

fn put_char(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
