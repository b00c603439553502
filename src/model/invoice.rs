use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::item::LineItem;
use super::party::Party;
use super::patch::InvoicePatch;
use super::payment::{BankDetails, PaymentMethods};

/// Boilerplate terms seeded into every fresh invoice.
pub const DEFAULT_TERMS: &str = "Payment is due within 30 days. Please make checks \
payable to your company name or use the electronic payment information provided on \
the invoice.";

/// The one invoice a session edits. Created once with defaults, mutated
/// exclusively through `apply`, discarded when the session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub invoice_number: String,
    /// ISO 8601 date (YYYY-MM-DD). Empty or unparsable values render blank.
    pub issue_date: String,
    pub due_date: String,
    pub payment_terms: String,
    pub currency: Currency,
    /// Percentages applied to the items subtotal. Non-negative.
    pub tax_rate: f64,
    pub discount_rate: f64,
    pub notes: String,
    pub terms_and_conditions: String,
    /// Embedded logo as a data URI (mime + base64), or absent.
    pub company_logo: Option<String>,
    pub company: Party,
    pub client: Party,
    /// Ordered line items; never empty.
    pub items: Vec<LineItem>,
    pub payment_methods: PaymentMethods,
    /// Payment-link URL, shown when the `payment_link` flag is set.
    pub payment_details: String,
    pub bank_details: Option<BankDetails>,
    pub upi_id: String,
    pub paypal_id: String,
    pub crypto_wallet_address: String,
    pub cash_instructions: String,
}

impl Default for Invoice {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl Invoice {
    /// Fresh invoice issued on `issued`, payment due 30 days later.
    pub fn new(issued: NaiveDate) -> Self {
        let due = issued
            .checked_add_signed(chrono::Duration::days(30))
            .unwrap_or(issued);

        Self {
            invoice_number: "001".to_string(),
            issue_date: issued.format("%Y-%m-%d").to_string(),
            due_date: due.format("%Y-%m-%d").to_string(),
            payment_terms: "Net 30 days".to_string(),
            currency: Currency::Usd,
            tax_rate: 0.0,
            discount_rate: 0.0,
            notes: String::new(),
            terms_and_conditions: DEFAULT_TERMS.to_string(),
            company_logo: None,
            company: Party::default(),
            client: Party::default(),
            items: vec![LineItem::new(1)],
            payment_methods: PaymentMethods::default(),
            payment_details: String::new(),
            bank_details: None,
            upi_id: String::new(),
            paypal_id: String::new(),
            crypto_wallet_address: String::new(),
            cash_instructions: String::new(),
        }
    }

    /// Shallow-merge update: fields carried as `Some` replace the current
    /// value; everything else is preserved. Nested groups (`company`,
    /// `client`, `payment_methods`, `bank_details`) are replaced wholesale,
    /// never deep-merged — callers changing one nested field must pass the
    /// whole group.
    pub fn apply(&mut self, patch: InvoicePatch) {
        if let Some(value) = patch.invoice_number {
            self.invoice_number = value;
        }
        if let Some(value) = patch.issue_date {
            self.issue_date = value;
        }
        if let Some(value) = patch.due_date {
            self.due_date = value;
        }
        if let Some(value) = patch.payment_terms {
            self.payment_terms = value;
        }
        if let Some(value) = patch.currency {
            self.currency = value;
        }
        if let Some(value) = patch.tax_rate {
            self.tax_rate = value.max(0.0);
        }
        if let Some(value) = patch.discount_rate {
            self.discount_rate = value.max(0.0);
        }
        if let Some(value) = patch.notes {
            self.notes = value;
        }
        if let Some(value) = patch.terms_and_conditions {
            self.terms_and_conditions = value;
        }
        if let Some(value) = patch.company_logo {
            self.company_logo = value;
        }
        if let Some(value) = patch.company {
            self.company = value;
        }
        if let Some(value) = patch.client {
            self.client = value;
        }
        if let Some(items) = patch.items {
            // the sequence may never become empty
            if !items.is_empty() {
                self.items = items;
            }
        }
        if let Some(value) = patch.payment_methods {
            self.payment_methods = value;
        }
        if let Some(value) = patch.payment_details {
            self.payment_details = value;
        }
        if let Some(value) = patch.bank_details {
            self.bank_details = Some(value);
        }
        if let Some(value) = patch.upi_id {
            self.upi_id = value;
        }
        if let Some(value) = patch.paypal_id {
            self.paypal_id = value;
        }
        if let Some(value) = patch.crypto_wallet_address {
            self.crypto_wallet_address = value;
        }
        if let Some(value) = patch.cash_instructions {
            self.cash_instructions = value;
        }
    }
}
