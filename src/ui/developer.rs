use crate::api::models::party_name;
use crate::api::RefreshTarget;
use crate::app::state::AppState;
use crate::ui::marketplace::panel;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

pub fn render_fee_agreement(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = match &state.fee_agreement {
        Some(agreement) => vec![
            Line::from(vec![
                Span::styled(" Fee         ", Theme::label()),
                Span::styled(
                    format!("{}%", agreement.fee),
                    Style::default()
                        .fg(Theme::ACCENT_AMBER)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled(" Developer   ", Theme::label()),
                Span::styled(party_name(&agreement.developer), Theme::text()),
            ]),
            Line::from(vec![
                Span::styled(" Repository  ", Theme::label()),
                Span::styled(party_name(&agreement.repository_node), Theme::text()),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            " No fee agreement established",
            Theme::muted(),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(panel(" Fee agreement ", state, RefreshTarget::FeeAgreement))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

pub fn render_help(frame: &mut Frame, area: Rect, state: &AppState) {
    let row = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {:<8}", key), Theme::key_hint()),
            Span::styled(what, Theme::label()),
        ])
    };
    let lines = vec![
        row("n", "Register package"),
        row("u", "Update selected"),
        row("x / Del", "Delete selected"),
        row("f", "Establish fee agreement"),
        row("r", "Refresh"),
    ];
    let paragraph = Paragraph::new(lines).block(panel(" Actions ", state, RefreshTarget::PkgOffers));
    frame.render_widget(paragraph, area);
}
