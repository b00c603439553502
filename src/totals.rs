use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Invoice, LineItem};

/// Sum of all line-item amounts (quantity x price) before tax/discount.
pub fn subtotal(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::amount).sum()
}

pub fn tax_amount(subtotal: f64, tax_rate: f64) -> f64 {
    subtotal * tax_rate / 100.0
}

pub fn discount_amount(subtotal: f64, discount_rate: f64) -> f64 {
    subtotal * discount_rate / 100.0
}

/// Tax and discount are both computed against the pre-discount subtotal:
/// the discount does not reduce the tax base.
pub fn total(subtotal: f64, tax_amount: f64, discount_amount: f64) -> f64 {
    subtotal + tax_amount - discount_amount
}

/// The four derived financial values of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total: f64,
}

impl Totals {
    pub fn compute(invoice: &Invoice) -> Self {
        let subtotal = subtotal(&invoice.items);
        let tax_amount = tax_amount(subtotal, invoice.tax_rate);
        let discount_amount = discount_amount(subtotal, invoice.discount_rate);

        Self {
            subtotal,
            tax_amount,
            discount_amount,
            total: total(subtotal, tax_amount, discount_amount),
        }
    }
}

/// Render an amount with exactly two fraction digits, rounding half up.
/// Stored values are never rounded; this applies at display time only.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

/// Render an ISO date (YYYY-MM-DD) as "Month DD, YYYY". Empty or
/// unparsable input renders as the empty string.
pub fn format_date(value: &str) -> String {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.format("%B %d, %Y").to_string())
        .unwrap_or_default()
}
