mod developer;
mod dialog;
mod header;
mod layout;
mod marketplace;
mod pkg_list;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use crate::config::Page;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    header::render(frame, app_layout.header, state);
    pkg_list::render(frame, app_layout.pkg_list, state);
    match state.page {
        Page::Marketplace => {
            marketplace::render_licenses(frame, app_layout.side_top, state);
            marketplace::render_balances(frame, app_layout.side_bottom, state);
        }
        Page::Developer => {
            developer::render_fee_agreement(frame, app_layout.side_top, state);
            developer::render_help(frame, app_layout.side_bottom, state);
        }
    }
    status_bar::render(frame, app_layout.status_bar, state);

    // Dialogs float above everything else
    dialog::render(frame, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Identity, PkgOffer};
    use crate::api::Refreshed;
    use crate::config::AppConfig;
    use crate::dialog::{DialogKind, MessageDialog, ResponseMessage, SelfIssueCashDialog};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn marketplace_page_shows_listing_and_identity() {
        let mut state = AppState::new(AppConfig::default());
        state.apply_refresh(Refreshed::Identity(Identity {
            me: "O=Buyer, L=Pisa, C=IT".into(),
        }));
        state.apply_refresh(Refreshed::Marketplace(vec![PkgOffer {
            name: "vFirewall".into(),
            ..PkgOffer::default()
        }]));
        let text = screen(&state);
        assert!(text.contains("vFirewall"));
        assert!(text.contains("O=Buyer, L=Pisa, C=IT"));
        assert!(text.contains("Balances"));
    }

    #[test]
    fn form_dialog_draws_over_page() {
        let mut state = AppState::new(AppConfig::default());
        state.toggle_page();
        state.open_dialog(DialogKind::SelfIssueCash(SelfIssueCashDialog::new()));
        let text = screen(&state);
        assert!(text.contains("Fee agreement"));
        assert!(text.contains("Self-issue cash"));
        assert!(text.contains("Currency"));
    }

    #[test]
    fn long_reply_gets_scrollbar_and_scroll_limit() {
        let mut state = AppState::new(AppConfig::default());
        state.open_dialog(DialogKind::Message(MessageDialog::new(
            "Register package",
            ResponseMessage::Reply {
                status: 500,
                body: "x".repeat(5000),
            },
        )));
        let text = screen(&state);
        assert!(text.contains("HTTP 500"));
        assert!(text.contains("▼"));
        let DialogKind::Message(m) = &state.dialogs[0].kind else {
            panic!("message expected");
        };
        assert!(m.max_scroll.get() > 0);
        assert!(m.max_scroll.get() < u16::MAX);
    }
}
