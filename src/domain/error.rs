// ============================================================
// Layer 3 - Domain Errors
// ============================================================
// Every failure the pipeline can raise from bad input data.
// None of these are recovered locally: a corpus that does not
// match its format, a prediction count that does not match the
// covered corpus, or an unknown language code all mean there is
// no sensible output to produce.
//
// An unfilled [STEM] placeholder is NOT an error. It is written
// straight into the prediction text so under-generation stays
// visible to whoever reads the output.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GlossError {
    /// A record violates the corpus format (too few lines, missing prefix)
    #[error("malformed record {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// Number of sentence predictions differs from the covered record count
    #[error("prediction count mismatch: {expected} covered records, {actual} predictions")]
    RecordCountMismatch { expected: usize, actual: usize },

    /// No corpus directory is configured for this language code
    #[error("unsupported language code '{0}'")]
    UnsupportedLanguage(String),

    /// The language map itself failed validation
    #[error("invalid language configuration: {0}")]
    InvalidConfig(String),
}

pub type GlossResult<T> = Result<T, GlossError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GlossError::MalformedRecord { index: 3, reason: "expected 3 lines, found 1".into() };
        assert_eq!(err.to_string(), "malformed record 3: expected 3 lines, found 1");

        let err = GlossError::RecordCountMismatch { expected: 4, actual: 5 };
        assert_eq!(
            err.to_string(),
            "prediction count mismatch: 4 covered records, 5 predictions"
        );

        let err = GlossError::UnsupportedLanguage("xyz".into());
        assert_eq!(err.to_string(), "unsupported language code 'xyz'");
    }

    #[test]
    fn test_error_converts_into_anyhow() {
        fn fails() -> anyhow::Result<()> {
            Err(GlossError::UnsupportedLanguage("abc".into()))?
        }
        let err = fails().unwrap_err();
        assert!(err.downcast_ref::<GlossError>().is_some());
    }
}
