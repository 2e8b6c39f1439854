mod common;

use spam_classifier::{
    artifact::{self, METADATA_FILE, MODEL_FILE},
    label::Label,
    nlp::classifier::ClassifierKind,
    SpamError,
};

#[test]
fn training_publishes_versioned_and_current_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = common::train_fixture(dir.path(), ClassifierKind::LogReg);

    let model_dir = dir.path().join("model");
    assert_eq!(outcome.artifact_path, model_dir.join("v1.0").join(MODEL_FILE));
    assert_eq!(outcome.metadata_path, model_dir.join("v1.0").join(METADATA_FILE));
    assert!(outcome.artifact_path.is_file());
    assert!(outcome.metadata_path.is_file());
    assert!(model_dir.join(MODEL_FILE).is_file());
    assert!(model_dir.join(METADATA_FILE).is_file());
    assert!(dir.path().join("reports/report_v1.0.json").is_file());

    let metadata = outcome.metadata;
    assert_eq!(metadata.version, "v1.0");
    assert_eq!(metadata.classifier, "LogisticRegression");
    assert!(metadata.created_at.ends_with('Z'));
    assert!(metadata.metrics.f1 > 0.5);
    let strength = metadata.best_params["clf__C"].as_f64().unwrap();
    assert_eq!(strength, outcome.search.best.strength);
    assert!(metadata.best_params.contains_key("tfidf__ngram_range"));
    assert!(metadata.best_params.contains_key("tfidf__min_df"));
    assert!(metadata.metrics.roc_auc.is_some());
    let support: usize = metadata.metrics.confusion_matrix.iter().flatten().sum();
    assert_eq!(support, outcome.split.test.len());
}

#[test]
fn split_is_stratified_and_blank_rows_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = common::train_fixture(dir.path(), ClassifierKind::LogReg);
    assert_eq!(outcome.split.train.len() + outcome.split.test.len(), 40);
    assert_eq!(outcome.split.test.len(), 8);
    let report = &outcome.metadata.metrics.classification_report;
    assert_eq!(report.spam.support, 4);
    assert_eq!(report.ham.support, 4);
}

#[test]
fn retraining_reproduces_split_and_selection() {
    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();
    let first = common::train_fixture(first_dir.path(), ClassifierKind::LogReg);
    let second = common::train_fixture(second_dir.path(), ClassifierKind::LogReg);

    assert_eq!(first.split, second.split);
    assert_eq!(first.metadata.best_params, second.metadata.best_params);
    assert_eq!(first.search.candidates.len(), 12);
    for (a, b) in first.search.candidates.iter().zip(&second.search.candidates) {
        assert_eq!(a.params, b.params);
        assert!(a.mean_f1 == b.mean_f1 || (a.mean_f1.is_nan() && b.mean_f1.is_nan()));
    }
}

#[test]
fn persisted_metadata_keeps_fixed_label_mapping() {
    let dir = tempfile::tempdir().unwrap();
    common::train_fixture(dir.path(), ClassifierKind::LogReg);

    let metadata = artifact::load_metadata(&dir.path().join("model"))
        .unwrap()
        .expect("metadata written");
    insta::assert_json_snapshot!(metadata.label_mapping, @r###"
    {
      "ham": 0,
      "spam": 1
    }
    "###);
    assert_eq!(metadata.label_mapping, Label::mapping());
}

#[test]
fn naive_bayes_variant_trains() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = common::train_fixture(dir.path(), ClassifierKind::NaiveBayes);
    assert_eq!(outcome.metadata.classifier, "MultinomialNB");
    let alpha = outcome.metadata.best_params["clf__alpha"].as_f64().unwrap();
    assert!([0.1, 0.5, 1.0].contains(&alpha));
    assert!(!outcome.metadata.best_params.contains_key("clf__C"));
}

#[test]
fn missing_columns_abort_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "message,category\nhello,ham\n").unwrap();

    let err = common::trainer(dir.path(), ClassifierKind::LogReg)
        .train(&path)
        .unwrap_err();
    assert!(matches!(err, SpamError::Dataset(_)));
    assert!(!dir.path().join("model").join(MODEL_FILE).exists());
}

#[test]
fn absent_dataset_is_dataset_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = common::trainer(dir.path(), ClassifierKind::LogReg)
        .train(&dir.path().join("missing.csv"))
        .unwrap_err();
    assert!(matches!(err, SpamError::Dataset(_)));
}

#[test]
fn dataset_too_small_to_hold_out_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.csv");
    std::fs::write(
        &path,
        "text,label\nWin a free prize,spam\nClaim cash now,spam\nSee you soon,ham\nLunch later?,ham\n",
    )
    .unwrap();

    let err = common::trainer(dir.path(), ClassifierKind::LogReg)
        .train(&path)
        .unwrap_err();
    assert!(matches!(err, SpamError::Dataset(_)));
    assert!(!dir.path().join("model").join(MODEL_FILE).exists());
    assert!(!dir.path().join("model/v1.0").exists());
    assert!(!dir.path().join("reports/report_v1.0.json").exists());
}

#[test]
fn unreadable_bytes_abort_as_dataset_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, b"text,label\nhello,ham\n\xff\xfe,spam\n").unwrap();

    let err = common::trainer(dir.path(), ClassifierKind::LogReg)
        .train(&path)
        .unwrap_err();
    assert!(matches!(err, SpamError::Dataset(_)));
    assert!(!dir.path().join("model").join(MODEL_FILE).exists());
}
