//! Free-text JSON dialogs (register and update).

use crate::api::ApiRequest;
use crate::dialog::form::TextField;
use crate::dialog::{Operation, ResponseMessage, Submission};
use serde_json::error::Category;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct JsonInputDialog {
    pub operation: Operation,
    pub editor: TextField,
}

impl JsonInputDialog {
    pub fn new(operation: Operation, template: String) -> Self {
        Self {
            operation,
            editor: TextField::multiline("json", "JSON", template),
        }
    }

    /// Parse the editor text and build the request. Syntax errors become a
    /// local message; any other decode failure is returned to the caller.
    pub fn submit(&self) -> Result<Submission, serde_json::Error> {
        match serde_json::from_str::<Value>(&self.editor.text) {
            Ok(payload) => Ok(Submission::Send(
                ApiRequest::new(self.operation.endpoint()).json(payload),
            )),
            Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
                Ok(Submission::Show(ResponseMessage::syntax_error(&e)))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bad_json_yields_syntax_message() {
        let mut d = JsonInputDialog::new(Operation::RegisterPkg, String::new());
        d.editor.set_text("{bad json");
        match d.submit().unwrap() {
            Submission::Show(ResponseMessage::Local(text)) => {
                assert!(text.starts_with("There was a syntax error. Please correct it and try again: "));
                assert!(text.contains("line 1"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_editor_is_a_syntax_error() {
        let d = JsonInputDialog::new(Operation::UpdatePkg, String::new());
        assert!(matches!(d.submit().unwrap(), Submission::Show(_)));
    }

    #[test]
    fn valid_json_is_sent_unchanged() {
        let d = JsonInputDialog::new(Operation::UpdatePkg, r#"{"name": "x", "n": [1, 2]}"#.into());
        let Submission::Send(req) = d.submit().unwrap() else {
            panic!("expected a request");
        };
        assert_eq!(req.describe(), "PUT update-pkg");
        assert_eq!(req.body, Some(json!({"name": "x", "n": [1, 2]})));
    }
}
