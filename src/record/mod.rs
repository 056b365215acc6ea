//! Record model and payload parsing.
//!
//! Records are flat mappings of field names to scalar values. The upstream
//! endpoint wraps them as `{"data": [...]}`; local files may hold either that
//! envelope or a bare array.

pub mod parser;
pub mod schema;

// Re-export main types
pub use parser::{normalize_records, parse_payload, parse_payload_str, Normalization};
pub use schema::{Field, FieldValue, Record};
