use crate::dialog::json_input::JsonInputDialog;
use crate::dialog::Operation;
use serde_json::json;

impl JsonInputDialog {
    /// Register a new package, starting from a skeleton the backend accepts.
    pub fn register() -> Self {
        let template = json!({
            "name": "",
            "description": "",
            "version": "1.0",
            "pkgInfoId": "",
            "imageLink": "",
            "pkgType": "VNF",
            "poPrice": {
                "id": "",
                "description": "",
                "isBundle": false,
                "lifecycleStatus": "Active",
                "name": "",
                "percentage": 0.0,
                "priceType": "one time",
                "recurringChargePeriodLength": 0,
                "recurringChargePeriodType": "",
                "version": "1.0",
                "price": { "unit": "EUR", "value": 0.0 }
            }
        });
        Self::new(Operation::RegisterPkg, format!("{:#}", template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::Submission;
    use serde_json::Value;

    #[test]
    fn template_is_valid_json_for_register() {
        let d = JsonInputDialog::register();
        let parsed: Value = serde_json::from_str(&d.editor.text).unwrap();
        assert_eq!(parsed["pkgType"], "VNF");
        let Submission::Send(req) = d.submit().unwrap() else {
            panic!("template should submit");
        };
        assert_eq!(req.describe(), "PUT register-pkg");
    }
}
