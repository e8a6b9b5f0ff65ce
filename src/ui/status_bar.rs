use crate::app::state::AppState;
use crate::config::Page;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = vec![Span::styled(
        format!(" {} ", state.clock),
        Style::default()
            .fg(Theme::accent(state.role()))
            .bg(Theme::BG_ELEVATED),
    )];

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    let hints = match state.page {
        Page::Marketplace => "↑↓ select  Enter details  b buy  i issue cash  r refresh  Tab page  q quit",
        Page::Developer => "↑↓ select  Enter details  Tab page  q quit",
    };
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.width()).sum();
    let hint_w = hints.chars().count() + 2;
    let remaining = (area.width as usize).saturating_sub(used + hint_w);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" {} ", hints),
        Style::default()
            .fg(Theme::TEXT_SECONDARY)
            .bg(Theme::BG_ELEVATED),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
