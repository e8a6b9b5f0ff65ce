use crate::api::models::{linear_id_label, PkgOffer};
use crate::api::{ApiRequest, Endpoint};
use crate::dialog::Submission;
use serde_json::Value;

/// Confirm removal of one of the developer's packages.
#[derive(Debug, Clone)]
pub struct DeletePkgDialog {
    pub name: String,
    pub linear_id: Value,
}

impl DeletePkgDialog {
    pub fn new(linear_id: Value) -> Self {
        Self {
            name: linear_id_label(&linear_id),
            linear_id,
        }
    }

    pub fn from_offer(offer: &PkgOffer) -> Self {
        let mut dialog = Self::new(offer.linear_id.clone());
        dialog.name = offer.name.clone();
        dialog
    }

    /// The body is the linear id itself.
    pub fn submit(&self) -> Submission {
        Submission::Send(ApiRequest::new(Endpoint::DeletePkg).json(self.linear_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sends_linear_id_as_body() {
        let id = json!({"externalId": null, "id": "ab-12"});
        let dialog = DeletePkgDialog::new(id.clone());
        assert_eq!(dialog.name, "ab-12");
        let Submission::Send(req) = dialog.submit() else {
            panic!("delete always sends");
        };
        assert_eq!(req.describe(), "PUT delete-pkg");
        assert_eq!(req.body, Some(id));
    }
}
