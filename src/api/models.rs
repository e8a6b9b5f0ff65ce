//! View models decoded from the list endpoints.
//!
//! Decoding is lenient: every field defaults, and identifiers the backend
//! owns (linear ids, parties) stay raw JSON so they can be echoed back
//! unchanged in later requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Response of `GET me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub me: String,
}

/// Which node the client is talking to; drives the colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Buyer,
    RepositoryNode,
    #[default]
    Other,
}

impl Identity {
    /// Organisation (`O=`) component of the X.500 name.
    pub fn organisation(&self) -> Option<&str> {
        self.me
            .split(',')
            .map(str::trim)
            .find_map(|part| part.strip_prefix("O="))
            .map(str::trim)
    }

    pub fn role(&self) -> Role {
        match self.organisation() {
            Some("Buyer") => Role::Buyer,
            Some("RepositoryNode") => Role::RepositoryNode,
            _ => Role::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PkgType {
    #[serde(rename = "VNF")]
    Vnf,
    #[serde(rename = "PNF")]
    Pnf,
}

impl fmt::Display for PkgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PkgType::Vnf => write!(f, "VNF"),
            PkgType::Pnf => write!(f, "PNF"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Money {
    pub unit: String,
    pub value: f64,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductOfferingPrice {
    pub id: Option<String>,
    pub href: Option<String>,
    pub description: Option<String>,
    pub is_bundle: Option<bool>,
    pub last_update: Option<String>,
    pub lifecycle_status: Option<String>,
    pub name: Option<String>,
    pub percentage: Option<f64>,
    pub price_type: Option<String>,
    pub recurring_charge_period_length: Option<i64>,
    pub recurring_charge_period_type: Option<String>,
    pub version: Option<String>,
    pub price: Money,
    pub unit_of_measure: Option<Value>,
    pub valid_for: Option<Value>,
}

/// A package listed on the marketplace (`PkgOfferState`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PkgOffer {
    pub linear_id: Value,
    pub name: String,
    pub description: String,
    pub version: String,
    pub pkg_info_id: String,
    pub image_link: String,
    pub pkg_type: Option<PkgType>,
    pub po_price: ProductOfferingPrice,
    pub author: Value,
    pub repository_node: Value,
}

impl PkgOffer {
    pub fn price(&self) -> &Money {
        &self.po_price.price
    }

    pub fn author_name(&self) -> String {
        party_name(&self.author)
    }
}

/// A license the current identity holds (`PkgLicenseState`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PkgLicense {
    pub pkg_licensed: Value,
    pub buyer: Value,
}

impl PkgLicense {
    /// The licensed offer, unwrapped from its state-and-ref envelope.
    pub fn offer(&self) -> Option<PkgOffer> {
        let data = self
            .pkg_licensed
            .pointer("/state/data")
            .unwrap_or(&self.pkg_licensed);
        if !data.is_object() {
            return None;
        }
        serde_json::from_value(data.clone()).ok()
    }
}

/// Currency code to balance.
pub type CashBalances = BTreeMap<String, Value>;

pub fn balance_label(amount: &Value) -> String {
    match amount {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let quantity = map.get("quantity").map(Value::to_string);
            let token = map.get("token").and_then(Value::as_str);
            match (quantity, token) {
                (Some(q), Some(t)) => format!("{} {}", q, t),
                _ => amount.to_string(),
            }
        }
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeAgreement {
    pub fee: i64,
    pub developer: Value,
    pub repository_node: Value,
}

/// Human-readable form of a linear identifier (`{"externalId", "id"}` or a plain string).
pub fn linear_id_label(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let id = map.get("id").and_then(Value::as_str).unwrap_or_default();
            match map.get("externalId").and_then(Value::as_str) {
                Some(ext) => format!("{}_{}", ext, id),
                None => id.to_string(),
            }
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parties come back either as an X.500 name string or an object with `name`.
pub fn party_name(party: &Value) -> String {
    match party {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| party.to_string()),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
