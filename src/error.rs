use thiserror::Error;

/// Errors a single prediction request can produce.
///
/// `NoSymptoms` and `NoneRecognized` are user-facing validation failures;
/// `ShapeMismatch` means the classifier and label encoder disagree about the
/// number of classes, which only happens with mispaired artifacts and must
/// never be swallowed.
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("No symptoms provided.")]
    NoSymptoms,

    #[error("No valid symptoms recognized. Unrecognized: {}", unrecognized.join(", "))]
    NoneRecognized { unrecognized: Vec<String> },

    #[error("probability vector has {got} classes but the label encoder knows {expected}")]
    ShapeMismatch { got: usize, expected: usize },
}

impl PredictError {
    /// True for errors caused by the caller's input rather than by the
    /// model artifacts themselves.
    pub fn is_validation(&self) -> bool {
        !matches!(self, PredictError::ShapeMismatch { .. })
    }
}
