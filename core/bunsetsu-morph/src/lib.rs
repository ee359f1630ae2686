#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod lexicon;

use alloc::string::String;
use alloc::vec::Vec;

use bunsetsu_protocol::Morpheme;

use core::fmt;

pub use lexicon::LexiconAnalyzer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// `tokenize` was called before the analyzer finished initializing.
    NotInitialized,
    /// A compiled lexicon could not be validated or decoded.
    InvalidLexicon(String),
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerError::NotInitialized => write!(f, "morphological analyzer is not initialized"),
            AnalyzerError::InvalidLexicon(reason) => write!(f, "invalid lexicon archive: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AnalyzerError {}

/// The morphological analyzer seam. Implementations split text into morphemes.
///
/// Analyzers usually need a one-time (possibly slow) initialization before they can
/// tokenize; `is_ready` reports whether that has happened.
pub trait Analyzer {
    fn is_ready(&self) -> bool;

    fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError>;
}

impl<A: Analyzer + ?Sized> Analyzer for &A {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError> {
        (**self).tokenize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AnalyzerError::NotInitialized.to_string(),
            "morphological analyzer is not initialized"
        );
        assert!(AnalyzerError::InvalidLexicon("bad".into()).to_string().contains("bad"));
    }
}
