pub mod error;
pub mod model;
pub mod render;
pub mod session;
pub mod totals;

pub use error::{BuilderError, Result};
pub use model::{BankDetails, Currency, Invoice, InvoicePatch, ItemField, LineItem, Party, PaymentMethods};
pub use render::{export_pdf, Snapshot};
pub use session::Session;
pub use totals::Totals;
