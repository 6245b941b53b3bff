//! Untrusted bundle extraction with raw-path sanitization.
//!
//! # Architecture
//!
//! - `format.rs` - Format detection and tar decompression codecs
//! - `sanitize.rs` - Entry-name validation (zip-slip prevention)
//! - `extract.rs` - Two-phase, all-or-nothing extraction
//!
//! Extraction is all-or-nothing: every entry's stored name is validated
//! before a single byte is written, so a rejected bundle leaves the
//! destination untouched.

pub use error::{Error, Result};
pub use extract::{ExtractSummary, extract_archive};
pub use format::{ArchiveFormat, Decoder, TarCompress, detect_format};
pub use sanitize::{sanitize_entry_name, sanitize_link_target};

mod error;
mod extract;
mod format;
mod sanitize;
