//! Field-definition validation and normalization
//!
//! Both stages are pure functions of the current choice list and draft:
//! - `validation`: rule checks producing field-keyed errors
//! - `normalize`: trimmed, deduplicated and ordered payload with the
//!   selection re-derived against the new positions
//! - `collation`: ordering used for alphabetical display

mod collation;
mod normalize;
mod validation;

pub use normalize::{normalize, Normalization, NormalizedField};
pub use validation::{validate, ValidationError, ValidationReport};
