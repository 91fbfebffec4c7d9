//! Value object marker: equality by value, not identity.

/// Marker trait for immutable values compared by their attributes.
///
/// Records and summaries are created once per invocation and never mutated;
/// two records with the same columns are the same message.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
