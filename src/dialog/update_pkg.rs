use crate::api::models::PkgOffer;
use crate::dialog::json_input::JsonInputDialog;
use crate::dialog::Operation;
use serde_json::{json, Value};

impl JsonInputDialog {
    /// Update an existing package. Pre-filled with the editable fields of
    /// `offer` when one is selected.
    pub fn update(offer: Option<&PkgOffer>) -> Self {
        let template = match offer {
            Some(offer) => json!({
                "linearId": offer.linear_id,
                "name": offer.name,
                "description": offer.description,
                "version": offer.version,
                "imageLink": offer.image_link,
                "poPrice": offer.po_price,
            }),
            None => json!({
                "linearId": Value::Null,
                "name": "",
                "description": "",
                "version": "",
                "imageLink": "",
                "poPrice": Value::Null,
            }),
        };
        Self::new(Operation::UpdatePkg, format!("{:#}", template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefill_keeps_linear_id_and_drops_immutable_fields() {
        let offer = PkgOffer {
            linear_id: json!({"externalId": null, "id": "9a"}),
            name: "vRouter".into(),
            version: "2.0".into(),
            pkg_info_id: "pkg-9".into(),
            ..PkgOffer::default()
        };
        let d = JsonInputDialog::update(Some(&offer));
        let parsed: Value = serde_json::from_str(&d.editor.text).unwrap();
        assert_eq!(parsed["linearId"]["id"], "9a");
        assert_eq!(parsed["name"], "vRouter");
        assert!(parsed.get("pkgInfoId").is_none());
        assert_eq!(d.operation, Operation::UpdatePkg);
    }

    #[test]
    fn blank_template_without_selection() {
        let d = JsonInputDialog::update(None);
        let parsed: Value = serde_json::from_str(&d.editor.text).unwrap();
        assert!(parsed["linearId"].is_null());
    }
}
