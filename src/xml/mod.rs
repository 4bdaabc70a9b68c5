//! XML plumbing for the agent dialect.
//!
//! The writer side produces indented documents from ordered field lists
//! with typed leaf values; the reader side extracts text content by dotted
//! element paths from response documents. Indentation is purely cosmetic
//! and never affects parsed semantics.

mod extract;
mod writer;

pub use extract::{extract_by_paths, flatten};
pub use writer::{format_decimal, format_money, wrap_with_element, write_fields, Value, XmlWriter};

use crate::core::SzamlazzError;

pub type XmlResult = Result<String, SzamlazzError>;
