use crate::api::RefreshTarget;
use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::config::Page;
use crate::dialog::{
    BuyPkgDialog, DeletePkgDialog, DialogKind, FeeAgreementDialog, JsonInputDialog, MessageDialog,
    Operation, PkgDetailsDialog, SelfIssueCashDialog, Submission, TextField,
};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};

const PAGE_STEP: usize = 10;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Result<Vec<Action>> {
    let actions = match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent)?,
        AppEvent::Response {
            dialog_id,
            operation,
            message,
        } => {
            state.in_flight.remove(&dialog_id);
            info!(dialog_id, %operation, status = ?message.status(), "response received");
            let refresh = message.is_success();
            state.open_dialog(DialogKind::Message(MessageDialog::new(operation.title(), message)));
            if refresh {
                vec![Action::Refresh {
                    targets: operation.affected().to_vec(),
                }]
            } else {
                vec![]
            }
        }
        AppEvent::Refreshed(refreshed) => {
            let target = state.apply_refresh(refreshed);
            info!(?target, "view model refreshed");
            vec![]
        }
        AppEvent::RefreshFailed { target, error } => {
            warn!(?target, %error, "refresh failed");
            vec![]
        }
        AppEvent::Tick => {
            handle_tick(state);
            vec![]
        }
    };
    Ok(actions)
}

fn handle_tick(state: &mut AppState) {
    let now = Local::now().format(&state.config.ui.timestamp_format).to_string();
    if now != state.clock {
        state.clock = now;
        state.dirty = true;
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Result<Vec<Action>> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => {
            state.dirty = true;
            handle_key(state, key)
        }
        CEvent::Paste(text) => {
            handle_paste(state, &text);
            Ok(vec![])
        }
        CEvent::Resize(_, _) => {
            state.dirty = true;
            Ok(vec![])
        }
        _ => Ok(vec![]),
    }
}

fn handle_paste(state: &mut AppState, text: &str) {
    let Some(dialog) = state.top_dialog_mut() else {
        return;
    };
    let field = match DialogInput::of(&dialog.kind) {
        DialogInput::Json => dialog.kind.editor_mut(),
        DialogInput::Form => dialog.kind.form_mut().and_then(|f| f.focused_mut()),
        _ => None,
    };
    if let Some(field) = field {
        field.insert_str(text);
        state.dirty = true;
    }
}

/// How the top dialog interprets key presses.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DialogInput {
    Form,
    Json,
    Confirm,
    Viewer,
}

impl DialogInput {
    fn of(kind: &DialogKind) -> Self {
        match kind {
            DialogKind::SelfIssueCash(_) | DialogKind::FeeAgreement(_) => DialogInput::Form,
            DialogKind::RegisterPkg(_) | DialogKind::UpdatePkg(_) => DialogInput::Json,
            DialogKind::BuyPkg(_) | DialogKind::DeletePkg(_) => DialogInput::Confirm,
            DialogKind::PkgDetails(_) | DialogKind::Message(_) => DialogInput::Viewer,
        }
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Result<Vec<Action>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(vec![Action::Quit]);
    }

    // The topmost dialog captures all input
    if let Some(dialog) = state.dialogs.last() {
        let id = dialog.id;
        let input = DialogInput::of(&dialog.kind);
        if key.code == KeyCode::Esc {
            state.close_top();
            debug!(dialog_id = id, "dialog dismissed");
            return Ok(vec![]);
        }
        return match input {
            DialogInput::Form => handle_form_key(state, key),
            DialogInput::Json => handle_json_key(state, key),
            DialogInput::Confirm => handle_confirm_key(state, key),
            DialogInput::Viewer => Ok(handle_viewer_key(state, key)),
        };
    }

    handle_page_key(state, key)
}

fn handle_page_key(state: &mut AppState, key: KeyEvent) -> Result<Vec<Action>> {
    state.status_message = None;
    match key.code {
        KeyCode::Char('q') => return Ok(vec![Action::Quit]),
        KeyCode::Tab | KeyCode::F(2) => state.toggle_page(),
        KeyCode::Char('r') => {
            return Ok(vec![Action::Refresh {
                targets: RefreshTarget::ALL.to_vec(),
            }])
        }
        KeyCode::Up => state.selection_mut().0.select_prev(),
        KeyCode::Down => {
            let (sel, len) = state.selection_mut();
            sel.select_next(len);
        }
        KeyCode::PageUp => {
            let (sel, _) = state.selection_mut();
            sel.selected = sel.selected.saturating_sub(PAGE_STEP);
        }
        KeyCode::PageDown => {
            let (sel, len) = state.selection_mut();
            for _ in 0..PAGE_STEP {
                sel.select_next(len);
            }
        }
        KeyCode::Home => state.selection_mut().0.selected = 0,
        KeyCode::End => {
            let (sel, len) = state.selection_mut();
            sel.selected = len.saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(details) = state.selected_offer().map(PkgDetailsDialog::new) {
                state.open_dialog(DialogKind::PkgDetails(details));
            }
        }
        _ => match state.page {
            Page::Marketplace => handle_marketplace_key(state, key),
            Page::Developer => handle_developer_key(state, key),
        },
    }
    Ok(vec![])
}

fn handle_marketplace_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('b') => {
            if let Some(buy) = state.selected_offer().map(BuyPkgDialog::from_offer) {
                state.open_dialog(DialogKind::BuyPkg(buy));
            } else {
                state.status_message = Some("No package selected".to_string());
            }
        }
        KeyCode::Char('i') => {
            state.open_dialog(DialogKind::SelfIssueCash(SelfIssueCashDialog::new()));
        }
        _ => {}
    }
}

fn handle_developer_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => {
            state.open_dialog(DialogKind::RegisterPkg(JsonInputDialog::register()));
        }
        KeyCode::Char('u') => {
            let update = JsonInputDialog::update(state.selected_offer());
            state.open_dialog(DialogKind::UpdatePkg(update));
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(delete) = state.selected_offer().map(DeletePkgDialog::from_offer) {
                state.open_dialog(DialogKind::DeletePkg(delete));
            } else {
                state.status_message = Some("No package selected".to_string());
            }
        }
        KeyCode::Char('f') => {
            state.open_dialog(DialogKind::FeeAgreement(FeeAgreementDialog::new()));
        }
        _ => {}
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) -> Result<Vec<Action>> {
    if key.code == KeyCode::Enter {
        return submit_top(state);
    }
    let Some(form) = state.top_dialog_mut().and_then(|d| d.kind.form_mut()) else {
        return Ok(vec![]);
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        _ => {
            if let Some(field) = form.focused_mut() {
                edit_field(field, key);
            }
        }
    }
    Ok(vec![])
}

fn handle_json_key(state: &mut AppState, key: KeyEvent) -> Result<Vec<Action>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        return submit_top(state);
    }
    let Some(editor) = state.top_dialog_mut().and_then(|d| d.kind.editor_mut()) else {
        return Ok(vec![]);
    };
    match key.code {
        KeyCode::Enter => editor.insert_char('\n'),
        KeyCode::Tab => editor.insert_str("  "),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        _ => edit_field(editor, key),
    }
    Ok(vec![])
}

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) -> Result<Vec<Action>> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => submit_top(state),
        KeyCode::Char('n') | KeyCode::Char('N') => {
            state.close_top();
            Ok(vec![])
        }
        _ => Ok(vec![]),
    }
}

fn handle_viewer_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Char('q')) {
        state.close_top();
        return vec![];
    }
    let Some(dialog) = state.top_dialog_mut() else {
        return vec![];
    };
    let Some((scroll, max)) = dialog.kind.scroll_mut() else {
        return vec![];
    };
    let current = (*scroll).min(max);
    *scroll = match key.code {
        KeyCode::Up => current.saturating_sub(1),
        KeyCode::Down => current.saturating_add(1),
        KeyCode::PageUp => current.saturating_sub(PAGE_STEP as u16),
        KeyCode::PageDown => current.saturating_add(PAGE_STEP as u16),
        KeyCode::Home => 0,
        KeyCode::End => max,
        _ => current,
    }
    .min(max);
    vec![]
}

/// Shared single-field editing keys.
fn edit_field(field: &mut TextField, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('w') if ctrl => field.delete_word_back(),
        KeyCode::Char('a') if ctrl => field.move_home(),
        KeyCode::Char('e') if ctrl => field.move_end(),
        KeyCode::Char(c) if !ctrl => field.insert_char(c),
        KeyCode::Backspace => field.delete_back(),
        KeyCode::Delete => field.delete_forward(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        _ => {}
    }
}

/// Resolve the top dialog. A dialog that produces a request is removed
/// before the request is handed out, so it can fire at most once.
fn submit_top(state: &mut AppState) -> Result<Vec<Action>> {
    let Some(dialog) = state.top_dialog_mut() else {
        return Ok(vec![]);
    };
    let dialog_id = dialog.id;
    let operation = dialog.kind.operation();
    match dialog.kind.submit()? {
        Submission::Invalid => {
            debug!(dialog_id, "validation failed");
            Ok(vec![])
        }
        Submission::Send(request) => {
            state.close_top();
            let Some(operation) = operation else {
                return Ok(vec![]);
            };
            state.in_flight.insert(dialog_id, operation);
            state.status_message = None;
            Ok(vec![Action::Submit {
                dialog_id,
                operation,
                request,
            }])
        }
        Submission::Show(message) => {
            state.close_top();
            let title = operation.map(Operation::title).unwrap_or("Message");
            state.open_dialog(DialogKind::Message(MessageDialog::new(title, message)));
            Ok(vec![])
        }
    }
}
