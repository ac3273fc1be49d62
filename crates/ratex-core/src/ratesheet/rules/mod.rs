//! Rule-based field extractors for rate sheet text.

pub mod dates;
pub mod numbers;
pub mod patterns;

pub use dates::{format_for_identifier, DateExtractor, UNKNOWN_DATE};
pub use numbers::parse_rate;
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract all occurrences of the field, in order of appearance.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value matched in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T) -> Self {
        Self { value, position: None }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
