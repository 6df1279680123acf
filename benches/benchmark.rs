use criterion::{Criterion, criterion_group, criterion_main};
use std::path::Path;
use symptom2disease::DiseasePredictor;

fn load_model() -> DiseasePredictor {
    DiseasePredictor::load_or_train_if_stale(
        Path::new("models/disease_model.msgpack"),
        Path::new("data/raw/dataset.csv"),
        0.2,
    )
    .expect("model artifacts unavailable")
}

fn bench_predict_single(c: &mut Criterion) {
    let model = load_model();

    c.bench_function("predict itching+skin_rash", |b| {
        b.iter(|| {
            let _ = model.predict_line("itching, skin_rash");
        })
    });
}

fn bench_bulk_prediction(c: &mut Criterion) {
    let model = load_model();
    let queries: Vec<String> = model
        .records
        .iter()
        .take(1_000)
        .map(|r| r.symptoms.join(", "))
        .collect();

    c.bench_function("bulk predict 1k symptom sets", |b| {
        b.iter(|| {
            for query in &queries {
                let _ = model.predict_line(query);
            }
        });
    });
}

criterion_group!(benches, bench_predict_single, bench_bulk_prediction);
criterion_main!(benches);
