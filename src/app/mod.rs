//! Application core: state, the event handler and the actions it emits.

pub mod action;
pub mod event;
pub mod handler;
pub mod state;
