use serde::{Deserialize, Serialize};

/// One side of the invoice (the issuing company or the billed client).
/// Every field is free text; nothing is validated against a format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    pub name: String,
    /// Multi-line postal address.
    pub address: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
}
