//! Feature-vector encoding: canonical tokens → fixed-width 0/1 vector.

use crate::error::PredictError;
use crate::vocab::SymptomVocabulary;
use ndarray::Array1;

/// One encoded prediction request: the binary feature vector plus the
/// partition of the input tokens into recognized and unrecognized names.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomQuery {
    pub vector: Array1<f64>,
    pub recognized: Vec<String>,
    pub unrecognized: Vec<String>,
}

/// Encodes canonical tokens against the vocabulary.
///
/// The vector width and column order come from the vocabulary, so they match
/// the training matrix exactly. Duplicate tokens set the same bit again, which
/// changes nothing. Fails if there are no tokens at all, or if none of them
/// are known symptoms; partial recognition succeeds and reports the leftovers
/// in `unrecognized`.
pub fn encode_query(
    tokens: &[String],
    vocab: &SymptomVocabulary,
) -> Result<SymptomQuery, PredictError> {
    if tokens.is_empty() {
        return Err(PredictError::NoSymptoms);
    }

    let mut vector = Array1::zeros(vocab.len());
    let mut recognized = Vec::new();
    let mut unrecognized = Vec::new();

    for token in tokens {
        match vocab.resolve(token) {
            Some(i) => {
                vector[i] = 1.0;
                recognized.push(token.clone());
            }
            None => unrecognized.push(token.clone()),
        }
    }

    if recognized.is_empty() {
        return Err(PredictError::NoneRecognized { unrecognized });
    }

    Ok(SymptomQuery {
        vector,
        recognized,
        unrecognized,
    })
}
