use bunsetsu_morph::AnalyzerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// `parse` was called before the morphological analyzer finished initializing.
    /// Retry once initialization completes.
    #[error("morphological analyzer is not ready; initialize it before parsing")]
    NotInitialized,

    #[error(transparent)]
    Analyzer(AnalyzerError),

    #[error(transparent)]
    Mecab(#[from] MecabError),
}

impl From<AnalyzerError> for ParseError {
    fn from(err: AnalyzerError) -> Self {
        match err {
            AnalyzerError::NotInitialized => ParseError::NotInitialized,
            other => ParseError::Analyzer(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MecabError {
    #[error("line {line}: malformed MeCab output {content:?}")]
    Malformed { line: usize, content: String },
}
