//! Heuristic normalization of a wide Schedule of Activities matrix.
//!
//! Parsing is keyword- and regex-driven, deliberately not a grammar: fields
//! that cannot be parsed are left empty rather than causing errors, and the
//! "first match wins" policies of the individual parsers are fixed behavior
//! that downstream consumers rely on.

pub mod category;
pub mod cell;
pub mod header;
pub mod matrix;
pub mod patterns;
pub mod rules;
pub mod window;

pub use category::classify_activity;
pub use cell::{NormalizedCell, normalize_cell};
pub use header::normalize_header;
pub use matrix::{MatrixRow, NormalizedStudy, SoaMatrix, normalize};
pub use patterns::{PatternMatch, detect_repeat_pattern};
pub use rules::{CellFragment, extract_rules};
pub use window::parse_window;
