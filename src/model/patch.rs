use super::currency::Currency;
use super::item::LineItem;
use super::party::Party;
use super::payment::{BankDetails, PaymentMethods};

/// A partial set of top-level invoice fields for `Invoice::apply`.
///
/// Fields left as `None` are untouched by the merge. `company_logo` is
/// doubly optional so a patch can distinguish "leave the logo alone"
/// (`None`) from "clear it" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct InvoicePatch {
    pub invoice_number: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub payment_terms: Option<String>,
    pub currency: Option<Currency>,
    pub tax_rate: Option<f64>,
    pub discount_rate: Option<f64>,
    pub notes: Option<String>,
    pub terms_and_conditions: Option<String>,
    pub company_logo: Option<Option<String>>,
    pub company: Option<Party>,
    pub client: Option<Party>,
    /// Always a full replacement sequence; an empty one is ignored.
    pub items: Option<Vec<LineItem>>,
    pub payment_methods: Option<PaymentMethods>,
    pub payment_details: Option<String>,
    pub bank_details: Option<BankDetails>,
    pub upi_id: Option<String>,
    pub paypal_id: Option<String>,
    pub crypto_wallet_address: Option<String>,
    pub cash_instructions: Option<String>,
}
