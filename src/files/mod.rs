//! Export files: naming and payloads.

pub mod export;
pub mod filename;

pub use export::{summary_export, title_export, ExportError, ExportPayload};
