use crate::api::models::{Money, PkgOffer, PkgType};
use crate::api::{ApiRequest, Endpoint};
use crate::dialog::Submission;
use serde_json::{json, Value};

/// Confirm the purchase of one marketplace package.
#[derive(Debug, Clone)]
pub struct BuyPkgDialog {
    pub name: String,
    pub linear_id: Value,
    pub pkg_info_id: String,
    pub pkg_type: Option<PkgType>,
    pub price: Money,
}

impl BuyPkgDialog {
    pub fn new(linear_id: Value, pkg_info_id: String, pkg_type: Option<PkgType>, price: Money) -> Self {
        Self {
            name: pkg_info_id.clone(),
            linear_id,
            pkg_info_id,
            pkg_type,
            price,
        }
    }

    pub fn from_offer(offer: &PkgOffer) -> Self {
        let mut dialog = Self::new(
            offer.linear_id.clone(),
            offer.pkg_info_id.clone(),
            offer.pkg_type,
            offer.price().clone(),
        );
        dialog.name = offer.name.clone();
        dialog
    }

    pub fn submit(&self) -> Submission {
        let body = json!({
            "linearId": self.linear_id,
            "pkgInfoId": self.pkg_info_id,
            "pkgType": self.pkg_type,
            "price": self.price,
        });
        Submission::Send(ApiRequest::new(Endpoint::BuyPkg).json(body))
    }
}
