//! Wire-level helpers: header handling, content-type classification, HTML
//! data islands and caret positioning.
//!
//! # Module Organization
//!
//! ```text
//! protocol/
//! ├── headers      - header names, Allow / If-Match parsing, media type normalisation
//! ├── content_type - ContentTypeFamily classifier
//! ├── island       - data island extraction from text/html
//! └── caret        - parser position to caret offset
//! ```

pub mod caret;
pub mod content_type;
pub mod headers;
pub mod island;

pub use caret::{caret_offset, line_end, line_start};
pub use content_type::ContentTypeFamily;
pub use headers::{format_allow, if_match_satisfied, media_type, parse_allow};
pub use island::{extract_data_island, DataIsland, ISLAND_TYPES};
