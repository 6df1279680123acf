//! The trained disease predictor: classifier, label encoder and vocabulary
//! bundled into one artifact so the column order can never desynchronize.

use crate::dataset::{LabelEncoder, RawRecord, encode_records, build_vocabulary};
use crate::encode::{SymptomQuery, encode_query};
use crate::error::PredictError;
use crate::normalize::{canonical, parse_symptom_input};
use crate::rank::{Prediction, format_prediction};
use crate::vocab::SymptomVocabulary;
use anyhow::{Context, Result};
use linfa::prelude::*;
use linfa_bayes::{MultinomialNb, NaiveBayes};
use ndarray::Axis;
use rmp_serde::{decode::from_read, encode::write_named};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::SystemTime;

/// Trained symptom-to-disease classifier and the preprocessing state it was
/// trained with. Immutable after construction; safe to share across threads.
#[derive(Serialize, Deserialize)]
pub struct DiseasePredictor {
    model: MultinomialNb<f64, usize>,
    labels: LabelEncoder,
    vocab: SymptomVocabulary,
    pub records: Vec<RawRecord>,
    symptom_freq: HashMap<String, usize>,
}

impl DiseasePredictor {
    /// Load a saved model if up-to-date, or retrain if the CSV is newer.
    pub fn load_or_train_if_stale(
        model_path: &Path,
        csv_path: &Path,
        test_ratio: f64,
    ) -> Result<Self> {
        let model_mtime = model_path
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let csv_mtime = csv_path
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let should_retrain = !model_path.exists() || csv_mtime > model_mtime;

        if should_retrain {
            println!("🧠 Training model (CSV is newer or model missing)...");
            let records = crate::dataset::load_raw_records(csv_path)?;
            let split = crate::dataset::train_test_split(&records, test_ratio);

            let model = DiseasePredictor::train_from_records(&split.train)?;
            let accuracy = model.evaluate_on(&split.test);
            println!("📊 Hold-out accuracy: {:.2}%", accuracy * 100.0);
            println!("💾 Saving model to {model_path:?}");
            model.save_to_file(model_path)?;
            Ok(model)
        } else {
            println!("📦 Loading model from {model_path:?} (up-to-date)");
            DiseasePredictor::load_from_file(model_path)
        }
    }

    /// Trains the classifier from cleaned dataset records.
    pub fn train_from_records(records: &[RawRecord]) -> Result<Self> {
        let vocab = build_vocabulary(records);
        let labels = LabelEncoder::fit(records.iter().map(|r| r.disease.clone()));

        let mut symptom_freq = HashMap::new();
        for record in records {
            for symptom in &record.symptoms {
                *symptom_freq.entry(canonical(symptom)).or_insert(0) += 1;
            }
        }

        let encoded = encode_records(records, &vocab, &labels)?;
        let dataset = Dataset::new(encoded.features, encoded.targets);

        let model = MultinomialNb::params()
            .fit(&dataset)
            .context("training failed")?;

        Ok(DiseasePredictor {
            model,
            labels,
            vocab,
            records: records.to_vec(),
            symptom_freq,
        })
    }

    pub fn vocab(&self) -> &SymptomVocabulary {
        &self.vocab
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    /// Predicts from a raw comma-separated input line.
    pub fn predict_line(&self, raw: &str) -> Result<Prediction, PredictError> {
        self.predict_tokens(&parse_symptom_input(raw))
    }

    /// Predicts from already-normalized tokens.
    pub fn predict_tokens(&self, tokens: &[String]) -> Result<Prediction, PredictError> {
        let query = encode_query(tokens, &self.vocab)?;
        let probs = self.class_probabilities(&query)?;
        format_prediction(&probs, &self.labels, query.recognized, query.unrecognized)
    }

    /// Runs the classifier and densifies its per-class probabilities into a
    /// vector indexed by label code.
    fn class_probabilities(&self, query: &SymptomQuery) -> Result<Vec<f64>, PredictError> {
        let input = query.vector.view().insert_axis(Axis(0));
        let (proba, classes) = self.model.predict_proba(input);

        if classes.len() != self.labels.len() {
            return Err(PredictError::ShapeMismatch {
                got: classes.len(),
                expected: self.labels.len(),
            });
        }

        let mut probs = vec![0.0; self.labels.len()];
        for (col, class) in classes.iter().enumerate() {
            let label = **class;
            if label >= probs.len() {
                return Err(PredictError::ShapeMismatch {
                    got: label + 1,
                    expected: self.labels.len(),
                });
            }
            probs[label] = proba[[0, col]];
        }
        Ok(probs)
    }

    /// Calculates classification accuracy on the given records. A record
    /// whose symptoms the vocabulary no longer recognizes counts as a miss.
    pub fn evaluate_on(&self, records: &[RawRecord]) -> f64 {
        if records.is_empty() {
            return 0.0;
        }

        let mut correct = 0;
        for record in records {
            let tokens: Vec<String> = record.symptoms.iter().map(|s| canonical(s)).collect();
            if let Ok(pred) = self.predict_tokens(&tokens) {
                if pred.predicted_disease == record.disease {
                    correct += 1;
                }
            }
        }

        correct as f64 / records.len() as f64
    }

    /// Displays the most frequent symptoms in the training data.
    pub fn show_top_symptoms(&self, n: usize) {
        println!("Most Common Training Symptoms:");

        let mut freq: Vec<(&String, &usize)> = self.symptom_freq.iter().collect();
        freq.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (symptom, count) in freq.iter().take(n) {
            println!("{symptom:>30} | rows: {count:>4}");
        }
    }

    /// Saves the model bundle to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create model directory {dir:?}"))?;
        }
        let file =
            File::create(path).with_context(|| format!("failed to create model file {path:?}"))?;
        let mut writer = BufWriter::new(file);
        write_named(&mut writer, self).context("failed to serialize model to MessagePack")
    }

    /// Loads the model bundle from a binary `.msgpack` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open model file {path:?}"))?;
        let reader = BufReader::new(file);
        from_read(reader).context("failed to deserialize model from MessagePack")
    }
}
