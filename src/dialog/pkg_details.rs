use crate::api::models::PkgOffer;
use std::cell::Cell;

/// Read-only pretty JSON of one package.
#[derive(Debug, Clone)]
pub struct PkgDetailsDialog {
    pub name: String,
    pub text: String,
    pub scroll: u16,
    /// Updated by the renderer from the wrapped height.
    pub max_scroll: Cell<u16>,
}

impl PkgDetailsDialog {
    pub fn new(offer: &PkgOffer) -> Self {
        let text = serde_json::to_value(offer)
            .map(|v| format!("{:#}", v))
            .unwrap_or_else(|e| e.to_string());
        Self {
            name: offer.name.clone(),
            text,
            scroll: 0,
            max_scroll: Cell::new(u16::MAX),
        }
    }
}
