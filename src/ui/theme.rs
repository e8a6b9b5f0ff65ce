use crate::api::models::Role;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(22, 24, 30);
    pub const BG_SURFACE: Color = Color::Rgb(30, 33, 41);
    pub const BG_ELEVATED: Color = Color::Rgb(40, 44, 54);

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 223, 228);
    pub const TEXT_SECONDARY: Color = Color::Rgb(150, 156, 168);
    pub const TEXT_MUTED: Color = Color::Rgb(98, 104, 117);

    pub const BORDER_DIM: Color = Color::Rgb(62, 68, 81);

    pub const ACCENT_TEAL: Color = Color::Rgb(86, 182, 194);
    pub const ACCENT_GREEN: Color = Color::Rgb(152, 195, 121);
    pub const ACCENT_AMBER: Color = Color::Rgb(229, 192, 123);
    pub const ACCENT_RED: Color = Color::Rgb(224, 108, 117);
    pub const ACCENT_VIOLET: Color = Color::Rgb(198, 120, 221);

    /// Accent colour for the node the client is connected to.
    pub fn accent(role: Role) -> Color {
        match role {
            Role::Buyer => Self::ACCENT_GREEN,
            Role::RepositoryNode => Self::ACCENT_VIOLET,
            Role::Other => Self::ACCENT_TEAL,
        }
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused(role: Role) -> Style {
        Style::default().fg(Self::accent(role))
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Self::BG_DARK)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(role: Role) -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::accent(role))
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn label() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn muted() -> Style {
        Style::default()
            .fg(Self::TEXT_MUTED)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ACCENT_RED)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::ACCENT_GREEN)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_ELEVATED)
    }

    pub fn scrollbar_thumb() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn scrollbar_track() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }
}
