use serde::Serialize;

use crate::model::{BankDetails, Invoice, Party, PaymentMethods};
use crate::totals::{format_date, Totals};

/// A line item with its derived amount, ready for display.
#[derive(Debug, Serialize)]
pub struct SnapshotItem {
    pub id: u32,
    pub description: String,
    pub quantity: f64,
    pub price: f64,
    pub amount: f64,
}

/// The complete, internally consistent view handed to renderers: every
/// model field plus the computed totals, display dates, and the currency
/// symbol. An absent bank-details group flattens to empty strings.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub invoice_number: String,
    /// Display dates ("Month DD, YYYY"); blank when the model's ISO
    /// string is empty or unparsable.
    pub issue_date: String,
    pub due_date: String,
    pub payment_terms: String,
    pub currency: String,
    pub currency_symbol: String,
    pub company: Party,
    pub client: Party,
    /// Logo data URI, passed through untouched.
    pub company_logo: Option<String>,
    pub items: Vec<SnapshotItem>,
    pub tax_rate: f64,
    pub discount_rate: f64,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total: f64,
    pub notes: String,
    pub terms_and_conditions: String,
    pub payment_methods: PaymentMethods,
    pub bank_details: BankDetails,
    pub upi_id: String,
    pub paypal_id: String,
    pub crypto_wallet_address: String,
    pub cash_instructions: String,
    /// Payment-link URL.
    pub payment_details: String,
}

impl Snapshot {
    pub fn build(invoice: &Invoice) -> Self {
        let totals = Totals::compute(invoice);

        Self {
            invoice_number: invoice.invoice_number.clone(),
            issue_date: format_date(&invoice.issue_date),
            due_date: format_date(&invoice.due_date),
            payment_terms: invoice.payment_terms.clone(),
            currency: invoice.currency.code().to_string(),
            currency_symbol: invoice.currency.symbol().to_string(),
            company: invoice.company.clone(),
            client: invoice.client.clone(),
            company_logo: invoice.company_logo.clone(),
            items: invoice
                .items
                .iter()
                .map(|item| SnapshotItem {
                    id: item.id,
                    description: item.description.clone(),
                    quantity: item.quantity,
                    price: item.price,
                    amount: item.amount(),
                })
                .collect(),
            tax_rate: invoice.tax_rate,
            discount_rate: invoice.discount_rate,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            discount_amount: totals.discount_amount,
            total: totals.total,
            notes: invoice.notes.clone(),
            terms_and_conditions: invoice.terms_and_conditions.clone(),
            payment_methods: invoice.payment_methods,
            bank_details: invoice.bank_details.clone().unwrap_or_default(),
            upi_id: invoice.upi_id.clone(),
            paypal_id: invoice.paypal_id.clone(),
            crypto_wallet_address: invoice.crypto_wallet_address.clone(),
            cash_instructions: invoice.cash_instructions.clone(),
            payment_details: invoice.payment_details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemField, LineItem};
    use chrono::NaiveDate;

    #[test]
    fn snapshot_carries_model_and_derived_totals() {
        let mut invoice = Invoice::new(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        invoice.items = crate::model::update_item(&invoice.items, 1, ItemField::Price, "10");
        invoice.items = crate::model::update_item(&invoice.items, 1, ItemField::Quantity, "3");
        invoice.tax_rate = 10.0;
        invoice.discount_rate = 5.0;

        let snapshot = Snapshot::build(&invoice);

        assert_eq!(snapshot.issue_date, "April 01, 2026");
        assert_eq!(snapshot.due_date, "May 01, 2026");
        assert_eq!(snapshot.currency, "USD");
        assert_eq!(snapshot.currency_symbol, "$");
        assert_eq!(snapshot.items[0].amount, 30.0);
        assert_eq!(snapshot.subtotal, 30.0);
        assert_eq!(snapshot.tax_amount, 3.0);
        assert_eq!(snapshot.discount_amount, 1.5);
        assert_eq!(snapshot.total, 31.5);
    }

    #[test]
    fn absent_bank_details_flatten_to_empty_strings() {
        let invoice = Invoice::new(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        assert!(invoice.bank_details.is_none());

        let snapshot = Snapshot::build(&invoice);
        assert_eq!(snapshot.bank_details, BankDetails::default());
        assert_eq!(snapshot.bank_details.bank_name, "");
    }

    #[test]
    fn blank_dates_stay_blank() {
        let mut invoice = Invoice::default();
        invoice.issue_date = String::new();
        invoice.due_date = "someday".to_string();

        let snapshot = Snapshot::build(&invoice);
        assert_eq!(snapshot.issue_date, "");
        assert_eq!(snapshot.due_date, "");
    }

    #[test]
    fn snapshot_item_count_matches_model() {
        let mut invoice = Invoice::default();
        invoice.items = vec![LineItem::new(1), LineItem::new(2)];

        let snapshot = Snapshot::build(&invoice);
        assert_eq!(snapshot.items.len(), 2);
    }
}
