//! End-to-end pipeline tests against the bundled raw dataset.

use std::path::Path;
use symptom2disease::{DiseasePredictor, load_raw_records};

fn train_on_bundled_dataset() -> DiseasePredictor {
    let records = load_raw_records(Path::new("data/raw/dataset.csv")).unwrap();
    DiseasePredictor::train_from_records(&records).unwrap()
}

#[test]
fn dataset_cleaning_corrects_known_disease_typos() {
    let records = load_raw_records(Path::new("data/raw/dataset.csv")).unwrap();
    let diseases: Vec<&str> = records.iter().map(|r| r.disease.as_str()).collect();

    assert!(diseases.contains(&"Peptic ulcer disease"));
    assert!(diseases.contains(&"Diabetes"));
    assert!(!diseases.iter().any(|d| d.ends_with(' ')));
    assert!(!diseases.contains(&"Peptic ulcer diseae"));
}

#[test]
fn full_prediction_flow_from_free_text() {
    let model = train_on_bundled_dataset();
    let pred = model
        .predict_line("Itching, Skin Rash, nodal_skin_eruptions")
        .unwrap();

    assert_eq!(
        pred.recognized_symptoms,
        vec!["itching", "skin_rash", "nodal_skin_eruptions"]
    );
    assert!(pred.unrecognized_symptoms.is_empty());
    assert_eq!(pred.predicted_disease, "Fungal infection");
    assert_eq!(pred.top5.len(), 5);
    assert!(pred.confidence > 0.0 && pred.confidence <= 100.0);

    // top-5 probabilities are in descending order
    for pair in pred.top5.windows(2) {
        assert!(pair[0].probability >= pair[1].probability);
    }
}

#[test]
fn prediction_serializes_to_the_wire_contract() {
    let model = train_on_bundled_dataset();
    let pred = model.predict_line("headache, chest_pain").unwrap();

    let json = serde_json::to_value(&pred).unwrap();
    assert!(json["predicted_disease"].is_string());
    assert!(json["confidence"].is_f64());
    assert!(json["recognized_symptoms"].is_array());
    assert!(json["unrecognized_symptoms"].is_array());
    let top5 = json["top5"].as_array().unwrap();
    assert_eq!(top5.len(), 5);
    assert!(top5[0]["disease"].is_string());
    assert!(top5[0]["probability"].is_f64());
}

#[test]
fn saved_model_predicts_identically_after_reload() {
    let model = train_on_bundled_dataset();
    let mut path = std::env::temp_dir();
    path.push("symptom2disease_pipeline_test.msgpack");

    model.save_to_file(&path).unwrap();
    let reloaded = DiseasePredictor::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let before = model.predict_line("chills, high_fever, sweating").unwrap();
    let after = reloaded.predict_line("chills, high_fever, sweating").unwrap();
    assert_eq!(before, after);
}

#[test]
fn vocabulary_listing_is_sorted_and_complete() {
    let model = train_on_bundled_dataset();
    let names = model.vocab().sorted_names();

    assert_eq!(names.len(), model.vocab().len());
    for pair in names.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert!(names.contains(&"itching".to_string()));
    assert!(names.contains(&"runny_nose".to_string()));
}
