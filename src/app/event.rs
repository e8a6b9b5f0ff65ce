use crate::api::{RefreshTarget, Refreshed};
use crate::dialog::{Operation, ResponseMessage};
use crossterm::event::Event as CrosstermEvent;

pub type DialogId = usize;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// The request fired by a closed dialog resolved (success or failure)
    Response {
        dialog_id: DialogId,
        operation: Operation,
        message: ResponseMessage,
    },

    /// A view model was fetched
    Refreshed(Refreshed),
    RefreshFailed {
        target: RefreshTarget,
        error: String,
    },

    /// Tick for the status bar clock
    Tick,
}
