//! The read-only dialog that shows what a request came back with.

use crate::api::{ApiError, ApiReply};
use serde_json::Value;
use std::cell::Cell;

pub const SYNTAX_ERROR_PREFIX: &str = "There was a syntax error. Please correct it and try again: ";

/// An already-resolved outcome, shown verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseMessage {
    /// The backend answered, with any status.
    Reply { status: u16, body: String },
    /// No answer: connection refused, reset, and the like.
    Failed(String),
    /// Produced locally without a request (malformed JSON input).
    Local(String),
}

impl ResponseMessage {
    pub fn from_outcome(outcome: Result<ApiReply, ApiError>) -> Self {
        match outcome {
            Ok(reply) => ResponseMessage::Reply {
                status: reply.status,
                body: reply.body,
            },
            Err(e) => ResponseMessage::Failed(e.to_string()),
        }
    }

    pub fn syntax_error(err: &serde_json::Error) -> Self {
        ResponseMessage::Local(format!("{}{}", SYNTAX_ERROR_PREFIX, err))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseMessage::Reply { status, .. } if (200..300).contains(status))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseMessage::Reply { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Body text for display. JSON bodies are pretty-printed, JSON strings
    /// unquoted, anything else shown as received.
    pub fn display_text(&self) -> String {
        match self {
            ResponseMessage::Reply { body, .. } => {
                if body.trim().is_empty() {
                    return "(empty response)".to_string();
                }
                match serde_json::from_str::<Value>(body) {
                    Ok(Value::String(s)) => s,
                    Ok(value) => format!("{:#}", value),
                    Err(_) => body.clone(),
                }
            }
            ResponseMessage::Failed(text) | ResponseMessage::Local(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageDialog {
    pub title: String,
    pub message: ResponseMessage,
    pub scroll: u16,
    /// Last useful scroll offset, measured against the wrapped text each
    /// time the dialog is drawn. Unbounded until the first draw.
    pub max_scroll: Cell<u16>,
}

impl MessageDialog {
    pub fn new(title: impl Into<String>, message: ResponseMessage) -> Self {
        Self {
            title: title.into(),
            message,
            scroll: 0,
            max_scroll: Cell::new(u16::MAX),
        }
    }
}
