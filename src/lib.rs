//! # symptom2disease 🩺🧠
//!
//! Predict diseases from symptom sets using a Naive Bayes classifier.
//!
//! A raw CSV of symptom slots per disease case is cleaned and one-hot
//! encoded, a [`linfa-bayes`](https://crates.io/crates/linfa-bayes)
//! Multinomial Naive Bayes classifier is trained on it, and predictions come
//! back with a confidence score and a top-5 differential list. Free-text
//! input is matched against the training vocabulary case- and
//! spacing-insensitively.
//!
//! ## Features
//! - Raw-CSV preprocessing: typo fix-ups, placeholder removal, deterministic
//!   sorted symptom vocabulary
//! - One-hot feature encoding aligned to the training column order
//! - Label + probability prediction with a ranked top-5 differential
//! - Model persistence with `rmp-serde` (MessagePack), bundled with its
//!   vocabulary and label encoder
//! - Auto-retrain when the CSV is updated
//! - Benchmarkable with [Criterion](https://crates.io/crates/criterion)
//!
//! ## Example
//! ```rust,no_run
//! use std::path::Path;
//! use symptom2disease::DiseasePredictor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let model = DiseasePredictor::load_or_train_if_stale(
//!     Path::new("models/disease_model.msgpack"),
//!     Path::new("data/raw/dataset.csv"),
//!     0.2,
//! )?;
//! let prediction = model.predict_line("itching, skin_rash, fever")?;
//! println!(
//!     "{} ({:.2}% confidence)",
//!     prediction.predicted_disease, prediction.confidence
//! );
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod encode;
pub mod error;
pub mod model;
pub mod normalize;
pub mod rank;
pub mod vocab;

pub use dataset::{DatasetSplit, LabelEncoder, RawRecord, load_raw_records, train_test_split};
pub use encode::{SymptomQuery, encode_query};
pub use error::PredictError;
pub use model::DiseasePredictor;
pub use normalize::{canonical, parse_symptom_input};
pub use rank::{Candidate, Prediction, format_prediction};
pub use vocab::SymptomVocabulary;
