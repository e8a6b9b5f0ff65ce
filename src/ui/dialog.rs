use crate::api::models::{linear_id_label, Role};
use crate::app::state::AppState;
use crate::dialog::{
    BuyPkgDialog, DeletePkgDialog, Dialog, DialogKind, Form, JsonInputDialog, MessageDialog,
    PkgDetailsDialog, ResponseMessage,
};
use crate::ui::layout::popup_rect;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};
use std::cell::Cell;

/// Draw the dialog stack bottom to top. Only the topmost dialog gets a cursor.
pub fn render(frame: &mut Frame, state: &AppState) {
    let role = state.role();
    let last = state.dialogs.len().saturating_sub(1);
    for (i, dialog) in state.dialogs.iter().enumerate() {
        render_one(frame, dialog, role, i == last);
    }
}

fn render_one(frame: &mut Frame, dialog: &Dialog, role: Role, on_top: bool) {
    let area = frame.area();
    let popup = match &dialog.kind {
        DialogKind::SelfIssueCash(_) | DialogKind::FeeAgreement(_) => popup_rect(area, 50, 40, 50, 14),
        DialogKind::BuyPkg(_) | DialogKind::DeletePkg(_) => popup_rect(area, 50, 30, 50, 11),
        DialogKind::RegisterPkg(_) | DialogKind::UpdatePkg(_) => popup_rect(area, 75, 80, 60, 20),
        DialogKind::PkgDetails(_) | DialogKind::Message(_) => popup_rect(area, 70, 70, 50, 12),
    };
    frame.render_widget(Clear, popup);

    let border = if on_top {
        Theme::border_focused(role)
    } else {
        Theme::border()
    };
    let block = Block::default()
        .title(format!(" {} ", dialog.kind.title()))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(border)
        .style(Style::default().bg(Theme::BG_SURFACE));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.height < 3 || inner.width < 10 {
        return;
    }

    let (body, help) = split_help(inner);
    match &dialog.kind {
        DialogKind::SelfIssueCash(d) => {
            render_form(frame, body, &d.form, role, on_top);
            render_help(frame, help, &[("Enter", "Submit"), ("Tab", "Next field"), ("Esc", "Cancel")]);
        }
        DialogKind::FeeAgreement(d) => {
            render_form(frame, body, &d.form, role, on_top);
            render_help(frame, help, &[("Enter", "Submit"), ("Esc", "Cancel")]);
        }
        DialogKind::BuyPkg(d) => {
            render_buy(frame, body, d);
            render_help(frame, help, &[("y/Enter", "Buy"), ("n/Esc", "Cancel")]);
        }
        DialogKind::DeletePkg(d) => {
            render_delete(frame, body, d);
            render_help(frame, help, &[("y/Enter", "Delete"), ("n/Esc", "Cancel")]);
        }
        DialogKind::RegisterPkg(d) | DialogKind::UpdatePkg(d) => {
            render_editor(frame, body, d, on_top);
            render_help(
                frame,
                help,
                &[("Ctrl+S", "Submit"), ("Enter", "New line"), ("Esc", "Cancel")],
            );
        }
        DialogKind::PkgDetails(d) => {
            render_details(frame, body, d);
            render_help(frame, help, &[("↑↓", "Scroll"), ("Enter/Esc", "Close")]);
        }
        DialogKind::Message(m) => {
            render_message(frame, body, m);
            render_help(frame, help, &[("↑↓", "Scroll"), ("Enter/Esc", "Close")]);
        }
    }
}

fn split_help(inner: Rect) -> (Rect, Rect) {
    let body = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
    let help = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    (body, help)
}

fn render_help(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, what) in keys {
        spans.push(Span::styled(format!(" {}", key), Theme::key_hint()));
        spans.push(Span::styled(format!(" {} ", what), Theme::label()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form(frame: &mut Frame, area: Rect, form: &Form, role: Role, on_top: bool) {
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor = None;
    let label_w = form
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    lines.push(Line::default());
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let value_style = if focused {
            Style::default()
                .fg(Theme::TEXT_PRIMARY)
                .bg(Theme::BG_ELEVATED)
        } else {
            Theme::text()
        };
        let marker = if focused { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Theme::accent(role))),
            Span::styled(format!("{:<w$}", field.label, w = label_w), Theme::label()),
            Span::styled(format!("{:<16}", field.text), value_style),
        ]));
        if focused {
            let (_, col) = field.cursor_position();
            let x = area.x + 2 + label_w as u16 + col as u16;
            let y = area.y + lines.len() as u16 - 1;
            cursor = Some((x.min(area.right().saturating_sub(1)), y));
        }
        lines.push(Line::default());
    }

    if form.form_error {
        for error in &form.errors {
            lines.push(Line::from(Span::styled(format!("  ✗ {}", error), Theme::error())));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    if on_top {
        if let Some((x, y)) = cursor {
            if y < area.bottom() {
                frame.set_cursor_position((x, y));
            }
        }
    }
}

fn summary_row<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", label), Theme::label()),
        Span::styled(value, Theme::text()),
    ])
}

fn render_buy(frame: &mut Frame, area: Rect, d: &BuyPkgDialog) {
    let kind = d.pkg_type.map(|t| t.to_string()).unwrap_or_default();
    let lines = vec![
        Line::default(),
        summary_row("Package", d.name.clone()),
        summary_row("Info id", d.pkg_info_id.clone()),
        summary_row("Type", kind),
        Line::from(vec![
            Span::styled(format!("  {:<12}", "Price"), Theme::label()),
            Span::styled(
                d.price.to_string(),
                Style::default()
                    .fg(Theme::ACCENT_AMBER)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_delete(frame: &mut Frame, area: Rect, d: &DeletePkgDialog) {
    let lines = vec![
        Line::default(),
        summary_row("Package", d.name.clone()),
        summary_row("Linear id", linear_id_label(&d.linear_id)),
        Line::default(),
        Line::from(Span::styled("  This removes the offer from the marketplace.", Theme::error())),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_editor(frame: &mut Frame, area: Rect, d: &JsonInputDialog, on_top: bool) {
    let (line, col) = d.editor.cursor_position();
    let height = area.height.max(1) as usize;
    let width = area.width.max(1) as usize;
    let scroll_y = line.saturating_sub(height - 1);
    let scroll_x = col.saturating_sub(width - 1);

    let text: Vec<Line> = d
        .editor
        .text
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Theme::text())))
        .collect();
    let paragraph = Paragraph::new(text)
        .style(Style::default().bg(Theme::BG_DARK))
        .scroll((scroll_y as u16, scroll_x as u16));
    frame.render_widget(paragraph, area);

    if on_top {
        let x = area.x + (col - scroll_x) as u16;
        let y = area.y + (line - scroll_y) as u16;
        frame.set_cursor_position((x, y));
    }
}

/// Draw wrapped text scrolled to `scroll`, clamped to what the wrapped
/// height allows. The clamp is written back to `max_scroll` so key handling
/// stops at the last row.
fn render_scrolled(
    frame: &mut Frame,
    area: Rect,
    lines: Vec<Line>,
    scroll: u16,
    max_scroll: &Cell<u16>,
) {
    // Rightmost column is kept for the scrollbar
    let text_area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(text_area.width);
    let max = u16::try_from(rows.saturating_sub(area.height as usize)).unwrap_or(u16::MAX);
    max_scroll.set(max);
    let scroll = scroll.min(max);
    frame.render_widget(paragraph.scroll((scroll, 0)), text_area);

    if max > 0 {
        let mut scrollbar_state = ScrollbarState::new(max as usize + 1)
            .position(scroll as usize)
            .viewport_content_length(area.height as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(Theme::scrollbar_thumb())
                .track_style(Theme::scrollbar_track()),
            area,
            &mut scrollbar_state,
        );
    }
}

fn render_details(frame: &mut Frame, area: Rect, d: &PkgDetailsDialog) {
    let lines = d
        .text
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Theme::text())))
        .collect();
    render_scrolled(frame, area, lines, d.scroll, &d.max_scroll);
}

fn render_message(frame: &mut Frame, area: Rect, m: &MessageDialog) {
    let (headline, style) = match &m.message {
        ResponseMessage::Reply { status, .. } if m.message.is_success() => {
            (format!("HTTP {}", status), Theme::success())
        }
        ResponseMessage::Reply { status, .. } => (format!("HTTP {}", status), Theme::error()),
        ResponseMessage::Failed(_) => ("No response".to_string(), Theme::error()),
        ResponseMessage::Local(_) => ("Not sent".to_string(), Theme::error()),
    };
    let mut lines = vec![
        Line::from(Span::styled(headline, style.add_modifier(Modifier::BOLD))),
        Line::default(),
    ];
    lines.extend(
        m.message
            .display_text()
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Theme::text()))),
    );
    render_scrolled(frame, area, lines, m.scroll, &m.max_scroll);
}
