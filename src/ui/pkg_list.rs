use crate::app::state::AppState;
use crate::config::Page;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

/// The package table of the current page: marketplace listing for buyers,
/// the developer's own offers otherwise.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let role = state.role();
    let (title, selected) = match state.page {
        Page::Marketplace => ("Marketplace", state.market_list.selected),
        Page::Developer => ("My packages", state.dev_list.selected),
    };
    let offers = state.visible_offers();

    let block = Block::default()
        .title(format!(" {} ({}) ", title, offers.len()))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if state.dialogs.is_empty() {
            Theme::border_focused(role)
        } else {
            Theme::border()
        })
        .style(Theme::panel_bg());

    if offers.is_empty() {
        let empty = List::new(vec![ListItem::new(Span::styled(
            " No packages",
            Theme::muted(),
        ))])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = offers
        .iter()
        .map(|offer| {
            let kind = offer
                .pkg_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "---".to_string());
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<4}", kind), Theme::label()),
                Span::styled(format!("{:<24}", offer.name), Theme::text()),
                Span::styled(format!(" v{:<8}", offer.version), Theme::label()),
                Span::styled(
                    format!(" {:>14}", offer.price().to_string()),
                    Style::default().fg(Theme::ACCENT_AMBER),
                ),
                Span::styled(format!("  {}", offer.author_name()), Theme::muted()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected(role))
        .highlight_symbol("▸");
    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}
