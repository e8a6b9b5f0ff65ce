use crate::api::{ApiRequest, RefreshTarget};
use crate::app::event::DialogId;
use crate::dialog::Operation;

#[derive(Debug, PartialEq)]
pub enum Action {
    Submit { dialog_id: DialogId, operation: Operation, request: ApiRequest },
    Refresh { targets: Vec<RefreshTarget> },
    Quit,
}
