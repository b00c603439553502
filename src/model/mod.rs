mod currency;
mod invoice;
mod item;
mod party;
mod patch;
mod payment;

pub use currency::Currency;
pub use invoice::{Invoice, DEFAULT_TERMS};
pub use item::{append_item, next_id, parse_number, remove_item, update_item};
pub use item::{ItemField, LineItem};
pub use party::Party;
pub use patch::InvoicePatch;
pub use payment::{BankDetails, PaymentMethods};

use crate::error::{BuilderError, Result};
use std::fs;
use std::path::Path;

/// Load a draft TOML into an Invoice. Missing fields take the model
/// defaults; items are normalized afterwards.
pub fn load_draft(path: &Path) -> Result<Invoice> {
    if !path.exists() {
        return Err(BuilderError::DraftNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let mut invoice: Invoice = toml::from_str(&content).map_err(|e| BuilderError::DraftParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    normalize_draft(&mut invoice);
    Ok(invoice)
}

/// Draft authors do not manage item ids: ids are reassigned 1..n in file
/// order. An empty items array is reseeded with one default item, and
/// numeric fields are clamped to the non-negative range the model expects.
fn normalize_draft(invoice: &mut Invoice) {
    if invoice.items.is_empty() {
        invoice.items.push(LineItem::new(1));
    }
    for (index, item) in invoice.items.iter_mut().enumerate() {
        item.id = index as u32 + 1;
        item.quantity = sanitize(item.quantity);
        item.price = sanitize(item.price);
    }
    invoice.tax_rate = sanitize(invoice.tax_rate);
    invoice.discount_rate = sanitize(invoice.discount_rate);
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Commented starter draft written by `init`.
pub fn draft_template(invoice: &Invoice) -> String {
    format!(
        r#"# Invoice draft. Edit the fields below, then run:
#   invoice-builder preview
#   invoice-builder export
#
# One-off tweaks can also be applied on the command line, e.g.:
#   invoice-builder preview --set tax_rate=8.5 --item "Design work:3:120"

invoice_number = "{number}"
issue_date = "{issue}"
due_date = "{due}"
payment_terms = "Net 30 days"
currency = "USD"     # USD, EUR, GBP, INR, JPY, CAD, AUD
tax_rate = 0.0       # percent of the subtotal
discount_rate = 0.0  # percent of the subtotal
notes = ""
terms_and_conditions = "{terms}"
# company_logo = "data:image/png;base64,..."   # or pass --logo <file> on export

[company]
name = ""
address = ""
email = ""
phone = ""
tax_id = ""

[client]
name = ""
address = ""
email = ""
phone = ""
tax_id = ""

# Repeat [[items]] for each line; ids are assigned automatically.
[[items]]
description = ""
quantity = 1.0
price = 0.0

[payment_methods]
bank_transfer = false
upi = false
crypto = false
paypal = false
cash = false
payment_link = false

# Shown when the matching payment method is enabled.
# upi_id = "name@bank"
# paypal_id = "your.email@example.com"
# crypto_wallet_address = ""
# cash_instructions = ""
# payment_details = ""    # payment-link URL
#
# [bank_details]
# bank_name = ""
# account_holder_name = ""
# account_number = ""
# account_type = ""       # e.g., Savings, Current, Checking
# swift_code = ""
"#,
        number = invoice.invoice_number,
        issue = invoice.issue_date,
        due = invoice.due_date,
        terms = invoice.terms_and_conditions,
    )
}
