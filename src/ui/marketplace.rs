use crate::api::models::balance_label;
use crate::api::RefreshTarget;
use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render_licenses(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut items: Vec<ListItem> = state
        .licenses
        .iter()
        .map(|license| match license.offer() {
            Some(offer) => ListItem::new(Line::from(vec![
                Span::styled(" ◆ ", Style::default().fg(Theme::ACCENT_GREEN)),
                Span::styled(offer.name, Theme::text()),
                Span::styled(format!(" v{}", offer.version), Theme::label()),
            ])),
            None => ListItem::new(Span::styled(
                format!(" ◇ {}", license.pkg_licensed),
                Theme::muted(),
            )),
        })
        .collect();
    if items.is_empty() {
        items.push(ListItem::new(Span::styled(" No licenses", Theme::muted())));
    }

    let list = List::new(items).block(panel(" Licenses ", state, RefreshTarget::Licenses));
    frame.render_widget(list, area);
}

pub fn render_balances(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut items: Vec<ListItem> = state
        .balances
        .iter()
        .map(|(currency, amount)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<5}", currency), Theme::label()),
                Span::styled(
                    balance_label(amount),
                    Style::default().fg(Theme::ACCENT_AMBER),
                ),
            ]))
        })
        .collect();
    if items.is_empty() {
        items.push(ListItem::new(Span::styled(" No cash", Theme::muted())));
    }

    let list = List::new(items).block(panel(" Balances ", state, RefreshTarget::Balances));
    frame.render_widget(list, area);
}

/// Side panel block with the time of its last successful refresh.
pub fn panel<'a>(title: &'a str, state: &'a AppState, target: RefreshTarget) -> Block<'a> {
    let mut block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());
    if let Some(at) = state.last_refreshed.get(&target) {
        block = block.title_bottom(Line::from(Span::styled(format!(" {} ", at), Theme::muted())).right_aligned());
    }
    block
}
