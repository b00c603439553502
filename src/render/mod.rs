mod snapshot;
mod typst;

pub use snapshot::{Snapshot, SnapshotItem};
pub use typst::export_pdf;
