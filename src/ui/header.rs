use crate::app::state::AppState;
use crate::config::Page;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let accent = Theme::accent(state.role());
    let tab = |label: &'static str, page: Page| {
        if state.page == page {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(Theme::BG_DARK)
                    .bg(accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!(" {} ", label),
                Style::default().fg(Theme::TEXT_SECONDARY).bg(Theme::BG_ELEVATED),
            )
        }
    };

    let me = state
        .identity
        .as_ref()
        .map(|i| i.me.as_str())
        .filter(|me| !me.is_empty())
        .unwrap_or("connecting...");

    let line = Line::from(vec![
        Span::styled(
            " pkgmart ",
            Style::default()
                .fg(accent)
                .bg(Theme::BG_ELEVATED)
                .add_modifier(Modifier::BOLD),
        ),
        tab("Marketplace", Page::Marketplace),
        tab("Developer", Page::Developer),
        Span::styled(
            " │ ",
            Style::default().fg(Theme::BORDER_DIM).bg(Theme::BG_ELEVATED),
        ),
        Span::styled(
            me.to_string(),
            Style::default()
                .fg(Theme::TEXT_PRIMARY)
                .bg(Theme::BG_ELEVATED)
                .add_modifier(Modifier::ITALIC),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Theme::BG_ELEVATED)),
        area,
    );
}
