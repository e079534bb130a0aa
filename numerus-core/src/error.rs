//! Error types for sample collection

use thiserror::Error;

/// Errors raised while building, merging, or freezing samples
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A negative quantity was supplied where only non-negative ones are defined
    #[error("must not be negative: {value}")]
    NegativeValue {
        /// The rejected value as written
        value: String,
    },

    /// A literal could not be parsed as a decimal quantity
    #[error("invalid numeric literal '{literal}': {reason}")]
    InvalidLiteral {
        /// The literal as written
        literal: String,
        /// Why parsing failed
        reason: String,
    },

    /// The two ends of a range have different fraction-digit counts
    #[error("range ends differ in visible fraction digits: {start} vs {end}")]
    FractionDigitsMismatch {
        /// Fraction digits of the start
        start: u8,
        /// Fraction digits of the end
        end: u8,
    },

    /// An exponent-bearing sample was routed into a range
    #[error("exponent samples cannot be merged into ranges: {sample}")]
    ExponentInRange {
        /// The offending sample
        sample: String,
    },

    /// More fraction digits than the range buckets can hold
    #[error("{digits} visible fraction digits exceeds the maximum of {max}")]
    FractionDigitsOverflow {
        /// Requested fraction digits
        digits: u8,
        /// Supported maximum
        max: u8,
    },

    /// A sample was added after the category or collector was frozen
    #[error("cannot add {sample} after samples were frozen")]
    Frozen {
        /// The rejected sample
        sample: String,
    },

    /// The evaluator selected a keyword that its rule does not declare
    #[error("keyword '{keyword}' is not declared by the rule (declared: {declared})")]
    UnknownKeyword {
        /// The selected keyword
        keyword: String,
        /// Comma-separated declared keywords
        declared: String,
    },

    /// The evaluator's boundedness disagrees with the observed samples
    #[error("{0}")]
    BoundsMismatch(String),

    /// Invalid generator configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for sample collection
pub type Result<T> = std::result::Result<T, Error>;
