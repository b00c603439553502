use serde::{Deserialize, Serialize};

/// One billable row on the invoice. The amount (quantity x price) is
/// derived at read time, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique within the sequence; assigned as max(existing) + 1 and never
    /// reused within a session.
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub price: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl LineItem {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            description: String::new(),
            quantity: 1.0,
            price: 0.0,
        }
    }

    pub fn amount(&self) -> f64 {
        self.quantity * self.price
    }
}

/// Editable fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Description,
    Quantity,
    Price,
}

/// Coerce free-form numeric input. Anything that is not a finite,
/// non-negative number becomes 0.
pub fn parse_number(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Next id for an appended item: max(existing ids) + 1, or 1 when empty.
pub fn next_id(items: &[LineItem]) -> u32 {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}

/// Sequence with a fresh default item appended.
pub fn append_item(items: &[LineItem]) -> Vec<LineItem> {
    let mut next = items.to_vec();
    next.push(LineItem::new(next_id(items)));
    next
}

/// Sequence with one field of the item `id` replaced. Quantity and price
/// go through `parse_number`; unknown ids leave the sequence unchanged.
pub fn update_item(items: &[LineItem], id: u32, field: ItemField, value: &str) -> Vec<LineItem> {
    items
        .iter()
        .map(|item| {
            if item.id != id {
                return item.clone();
            }
            let mut updated = item.clone();
            match field {
                ItemField::Description => updated.description = value.to_string(),
                ItemField::Quantity => updated.quantity = parse_number(value),
                ItemField::Price => updated.price = parse_number(value),
            }
            updated
        })
        .collect()
}

/// Sequence with the item `id` removed. Removing the last remaining item
/// is a no-op: the sequence may never become empty.
pub fn remove_item(items: &[LineItem], id: u32) -> Vec<LineItem> {
    if items.len() <= 1 {
        return items.to_vec();
    }
    items.iter().filter(|item| item.id != id).cloned().collect()
}
