use crate::model::{self, Invoice, InvoicePatch, ItemField};
use crate::render::Snapshot;
use crate::totals::Totals;

/// Owns the one invoice being edited. Every mutation funnels through the
/// merge update or the item operations; readers borrow the model or take
/// a snapshot.
#[derive(Debug, Clone)]
pub struct Session {
    invoice: Invoice,
}

impl Session {
    /// Start a session with a fresh default invoice.
    pub fn new() -> Self {
        Self {
            invoice: Invoice::default(),
        }
    }

    /// Start a session from an already-built invoice (e.g., a loaded draft).
    pub fn with_invoice(invoice: Invoice) -> Self {
        Self { invoice }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Merge a partial update into the invoice (semantics of
    /// `Invoice::apply`).
    pub fn apply(&mut self, patch: InvoicePatch) {
        self.invoice.apply(patch);
    }

    /// Append a default line item and return its id.
    pub fn add_item(&mut self) -> u32 {
        let items = model::append_item(&self.invoice.items);
        let id = items.last().map(|item| item.id).unwrap_or(1);
        self.apply(InvoicePatch {
            items: Some(items),
            ..InvoicePatch::default()
        });
        id
    }

    /// Replace one field of the item `id`, coercing numeric input.
    pub fn update_item(&mut self, id: u32, field: ItemField, value: &str) {
        let items = model::update_item(&self.invoice.items, id, field, value);
        self.apply(InvoicePatch {
            items: Some(items),
            ..InvoicePatch::default()
        });
    }

    /// Remove the item `id`. A no-op when it is the last one left.
    pub fn remove_item(&mut self, id: u32) {
        let items = model::remove_item(&self.invoice.items, id);
        self.apply(InvoicePatch {
            items: Some(items),
            ..InvoicePatch::default()
        });
    }

    /// Derived financial values for the current model.
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.invoice)
    }

    /// Complete, internally consistent view for renderers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::build(&self.invoice)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
