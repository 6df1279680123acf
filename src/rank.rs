//! Turning a class-probability vector into a ranked diagnosis report.

use crate::dataset::LabelEncoder;
use crate::error::PredictError;
use serde::Serialize;

/// One entry of the top-5 differential. `probability` is a percentage.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Candidate {
    pub disease: String,
    pub probability: f64,
}

/// The full result of one prediction request, ready for JSON or console
/// output. Built fresh per request and discarded afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Prediction {
    pub predicted_disease: String,
    pub confidence: f64,
    pub recognized_symptoms: Vec<String>,
    pub unrecognized_symptoms: Vec<String>,
    pub top5: Vec<Candidate>,
}

/// Index of the largest probability; the first-encountered maximum wins ties,
/// so equal probabilities resolve to the lowest class index.
fn argmax(probs: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in probs.iter().enumerate() {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}

/// Indices of the `k` largest probabilities in descending order.
///
/// A stable sort on descending probability keeps equal values in ascending
/// index order, matching the tie-break used by `argmax`.
fn top_k_indices(probs: &[f64], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..probs.len()).collect();
    indices.sort_by(|&a, &b| probs[b].partial_cmp(&probs[a]).unwrap_or(std::cmp::Ordering::Equal));
    indices.truncate(k);
    indices
}

/// Formats a per-class probability vector into a [`Prediction`].
///
/// Pure: no side effects, deterministic for a given input. The vector length
/// must equal the number of labels the encoder knows; anything else means the
/// artifacts are mispaired and the request fails with `ShapeMismatch`.
pub fn format_prediction(
    probs: &[f64],
    labels: &LabelEncoder,
    recognized: Vec<String>,
    unrecognized: Vec<String>,
) -> Result<Prediction, PredictError> {
    if probs.len() != labels.len() {
        return Err(PredictError::ShapeMismatch {
            got: probs.len(),
            expected: labels.len(),
        });
    }

    let top = argmax(probs).ok_or(PredictError::ShapeMismatch {
        got: 0,
        expected: labels.len(),
    })?;

    let decode = |i: usize| -> Result<String, PredictError> {
        labels
            .inverse(i)
            .map(str::to_string)
            .ok_or(PredictError::ShapeMismatch {
                got: probs.len(),
                expected: labels.len(),
            })
    };

    let top5 = top_k_indices(probs, 5)
        .into_iter()
        .map(|i| {
            Ok(Candidate {
                disease: decode(i)?,
                probability: probs[i] * 100.0,
            })
        })
        .collect::<Result<Vec<_>, PredictError>>()?;

    Ok(Prediction {
        predicted_disease: decode(top)?,
        confidence: probs[top] * 100.0,
        recognized_symptoms: recognized,
        unrecognized_symptoms: unrecognized,
        top5,
    })
}
