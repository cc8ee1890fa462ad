//! End-to-end library tests: fixture model on disk, raw record in, grade out.

use std::path::Path;

use gradecast::model::{load_model, ModelError, Regressor};
use gradecast::{encode, PredictError, Predictor, RawInput};

const MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/linear_model.json");
const SWAPPED_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/swapped_model.json");

fn student(g1: i64, g2: i64) -> RawInput {
    let mut raw = RawInput::new()
        .with("school", "GP")
        .with("sex", "F")
        .with("age", 16)
        .with("address", "R")
        .with("famsize", "LE3")
        .with("Pstatus", "T")
        .with("Medu", 2)
        .with("Fedu", 1)
        .with("Mjob", "teacher")
        .with("Fjob", "at_home")
        .with("reason", "home")
        .with("guardian", "mother")
        .with("traveltime", 2)
        .with("studytime", 2)
        .with("failures", 0)
        .with("famrel", 5)
        .with("freetime", 2)
        .with("goout", 2)
        .with("Dalc", 1)
        .with("Walc", 1)
        .with("health", 4)
        .with("absences", 0)
        .with("G1", g1)
        .with("G2", g2);
    for flag in [
        "schoolsup",
        "famsup",
        "paid",
        "activities",
        "nursery",
        "higher",
        "internet",
        "romantic",
    ] {
        raw.insert(flag, "yes");
    }
    raw
}

#[test]
fn all_yes_student_scenario() {
    let raw = student(15, 16);
    let features = encode(&raw).unwrap();
    assert_eq!(features.get("school"), Some(1.0));
    assert_eq!(features.get("sex"), Some(1.0));
    assert_eq!(features.get("Mjob"), Some(3.0));
    assert_eq!(features.get("reason"), Some(1.0));
    assert_eq!(features.get("guardian"), Some(1.0));
    assert_eq!(features.get("schoolsup"), Some(1.0));
    assert_eq!(features.get("romantic"), Some(1.0));

    let predictor = Predictor::load(Path::new(MODEL)).unwrap();
    assert_eq!(predictor.model_name(), "linear");
    // -0.5 + 0.1 * 15 + 0.9 * 16 = 15.4
    assert_eq!(predictor.predict(&raw).unwrap().value(), 15);
}

#[test]
fn unknown_job_predicts_like_other() {
    let predictor = Predictor::load(Path::new(MODEL)).unwrap();
    let mut odd = student(11, 12);
    odd.insert("Mjob", "unknown_value");
    let mut other = student(11, 12);
    other.insert("Mjob", "other");
    assert_eq!(encode(&odd).unwrap(), encode(&other).unwrap());
    assert_eq!(
        predictor.predict(&odd).unwrap(),
        predictor.predict(&other).unwrap()
    );
}

#[test]
fn predictions_are_deterministic() {
    let predictor = Predictor::load(Path::new(MODEL)).unwrap();
    let raw = student(7, 9);
    let first = predictor.predict(&raw).unwrap();
    for _ in 0..10 {
        assert_eq!(predictor.predict(&raw).unwrap(), first);
    }
}

#[test]
fn swapped_columns_fail_at_inference() {
    let model = load_model(Path::new(SWAPPED_MODEL)).expect("swapped model still loads");
    let features = encode(&student(12, 12)).unwrap();
    assert!(matches!(
        model.predict(&features),
        Err(ModelError::SchemaMismatch(_))
    ));

    let predictor = Predictor::new(model);
    assert!(matches!(
        predictor.predict(&student(12, 12)),
        Err(PredictError::Model(ModelError::SchemaMismatch(_)))
    ));
}

#[test]
fn batch_matches_single_predictions() {
    let predictor = Predictor::load(Path::new(MODEL)).unwrap();
    let inputs: Vec<RawInput> = (0..=20).map(|g| student(g, 20 - g)).collect();
    let batch = predictor.predict_batch(&inputs);
    for (raw, result) in inputs.iter().zip(batch) {
        assert_eq!(result.unwrap(), predictor.predict(raw).unwrap());
    }
}
