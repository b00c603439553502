use serde::{Deserialize, Serialize};

/// Accepted payment methods. Independent flags; any subset may be active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethods {
    pub bank_transfer: bool,
    pub upi: bool,
    pub crypto: bool,
    pub paypal: bool,
    pub cash: bool,
    pub payment_link: bool,
}

impl PaymentMethods {
    /// Display labels of the active methods, in a fixed order.
    pub fn active_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.bank_transfer {
            labels.push("Bank Transfer");
        }
        if self.upi {
            labels.push("UPI");
        }
        if self.crypto {
            labels.push("Crypto");
        }
        if self.paypal {
            labels.push("PayPal");
        }
        if self.cash {
            labels.push("Cash");
        }
        if self.payment_link {
            labels.push("Payment Link");
        }
        labels
    }
}

/// Bank transfer coordinates. Only meaningful while the `bank_transfer`
/// flag is set; an absent group is distinct from a present-but-empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    pub bank_name: String,
    pub account_holder_name: String,
    pub account_number: String,
    /// e.g., Savings, Current, Checking
    pub account_type: String,
    pub swift_code: String,
}
