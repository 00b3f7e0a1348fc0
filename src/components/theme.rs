use serde::{Deserialize, Serialize};
use tui::style::{Color, Modifier, Style};

/// Display theme, the one preference persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    Text,
    Muted,
    Border,
    Accent,
    Header,
    Winner,
    Loser,
    Tie,
    Selected,
    Error,
}

pub fn resolve(color: Palette, theme: Theme) -> Style {
    match (color, theme) {
        (Palette::Text, Theme::Dark) => Style::default().fg(Color::White),
        (Palette::Text, Theme::Light) => Style::default().fg(Color::Black),
        (Palette::Muted, Theme::Dark) => Style::default().fg(Color::Indexed(244)),
        (Palette::Muted, Theme::Light) => Style::default().fg(Color::Indexed(242)),
        (Palette::Border, Theme::Dark) => Style::default().fg(Color::Indexed(240)),
        (Palette::Border, Theme::Light) => Style::default().fg(Color::Indexed(248)),
        (Palette::Accent, Theme::Dark) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        (Palette::Accent, Theme::Light) => {
            Style::default().fg(Color::Rgb(176, 96, 0)).add_modifier(Modifier::BOLD)
        }
        (Palette::Header, Theme::Dark) => Style::default().fg(Color::Rgb(0, 122, 195)).add_modifier(Modifier::BOLD),
        (Palette::Header, Theme::Light) => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        (Palette::Winner, _) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        (Palette::Loser, _) => Style::default().fg(Color::Red),
        (Palette::Tie, Theme::Dark) => Style::default().fg(Color::Gray),
        (Palette::Tie, Theme::Light) => Style::default().fg(Color::DarkGray),
        (Palette::Selected, Theme::Dark) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        (Palette::Selected, Theme::Light) => Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
        (Palette::Error, _) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}
