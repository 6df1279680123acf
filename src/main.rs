use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use symptom2disease::{DiseasePredictor, Prediction};

fn print_banner() {
    println!("\n{}", "=".repeat(50));
    println!("      DISEASE PREDICTION SYSTEM");
    println!("{}", "=".repeat(50));
    println!("Enter your symptoms separated by commas.");
    println!("Example: itching, skin_rash, fever\n");
    println!("Type \"list\" to see all available symptoms.");
    println!("Type \"exit\" to quit.");
    println!("{}\n", "=".repeat(50));
}

fn print_symptom_list(model: &DiseasePredictor) {
    println!("\nAvailable symptoms:");
    for (i, symptom) in model.vocab().sorted_names().iter().enumerate() {
        println!("  {:>3}. {symptom}", i + 1);
    }
}

fn print_report(pred: &Prediction) {
    if !pred.unrecognized_symptoms.is_empty() {
        println!(
            "\n⚠  Unrecognized symptom(s): {}",
            pred.unrecognized_symptoms.join(", ")
        );
        println!("   Tip: type 'list' to see valid symptom names.");
    }

    println!("\n{}", "=".repeat(50));
    println!("           PREDICTION RESULT");
    println!("{}", "=".repeat(50));
    println!("  Recognized Symptoms : {}", pred.recognized_symptoms.join(", "));
    println!("  Predicted Disease   : {}", pred.predicted_disease);
    println!("  Confidence Level    : {:.2}%", pred.confidence);

    if pred.confidence < 50.0 {
        println!("\n  ⚠  Low confidence — symptoms may match multiple diseases.");
    } else if pred.confidence < 75.0 {
        println!("\n  ℹ  Moderate confidence — consider reviewing top results.");
    }

    println!("\n  Top 5 Most Probable Diseases:");
    println!("  {:<6} {:<45} {:>12}", "Rank", "Disease", "Probability");
    println!("  {}", "-".repeat(65));
    for (rank, candidate) in pred.top5.iter().enumerate() {
        let bar = "█".repeat((candidate.probability / 5.0) as usize);
        println!(
            "  {:<6} {:<45} {:>10.2}%  {bar}",
            rank + 1,
            candidate.disease,
            candidate.probability
        );
    }

    println!("\n{}", "=".repeat(50));
    println!("  ⚕  DISCLAIMER: This tool is for educational");
    println!("     purposes only. Always consult a qualified");
    println!("     medical professional for diagnosis.");
    println!("{}", "=".repeat(50));
}

fn main() -> Result<()> {
    let model = DiseasePredictor::load_or_train_if_stale(
        Path::new("models/disease_model.msgpack"),
        Path::new("data/raw/dataset.csv"),
        0.2,
    )?;

    let train_acc = model.evaluate_on(&model.records);
    println!("✅ Accuracy: {:.2}%", train_acc * 100.0);
    model.show_top_symptoms(10);

    print_banner();

    loop {
        print!("Symptoms: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.eq_ignore_ascii_case("list") {
            print_symptom_list(&model);
            continue;
        }

        match model.predict_line(line) {
            Ok(pred) => print_report(&pred),
            Err(err) if err.is_validation() => println!("\n❌ {err}"),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
