mod common;

use spam_classifier::{
    artifact::{self, METADATA_FILE},
    label::Label,
    nlp::{classifier::ClassifierKind, pipeline::SpamModel},
    InferenceService, SpamError,
};

struct KeywordModel;

impl SpamModel for KeywordModel {
    fn predict(&self, text: &str) -> Label {
        if text.to_lowercase().contains("spam") {
            Label::Spam
        } else {
            Label::Ham
        }
    }

    fn spam_probability(&self, text: &str) -> f64 {
        match self.predict(text) {
            Label::Spam => 0.95,
            Label::Ham => 0.05,
        }
    }
}

#[test]
fn mock_model_keyed_on_substring() {
    let service = InferenceService::new(KeywordModel, "mock");
    assert_eq!(service.predict("this is spam offer"), Label::Spam);
    assert_eq!(service.predict("hello friend"), Label::Ham);
}

#[test]
fn empty_directory_raises_artifact_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = InferenceService::load(dir.path()).unwrap_err();
    assert!(matches!(err, SpamError::ArtifactMissing(_)));
}

#[test]
fn trained_artifact_serves_predictions() {
    let dir = tempfile::tempdir().unwrap();
    common::train_fixture(dir.path(), ClassifierKind::LogReg);

    let service = InferenceService::load(&dir.path().join("model")).unwrap();
    assert_eq!(service.version(), "v1.0");

    let spam = service.predict_proba("WINNER! Claim your free voucher now");
    assert_eq!(spam.label, Label::Spam);
    assert!(spam.probability >= 0.5 && spam.probability <= 1.0);
    assert_eq!(spam.model_version, "v1.0");

    let ham = service.predict_proba("see you at lunch tomorrow");
    assert_eq!(ham.label, Label::Ham);
    assert_eq!(service.predict("see you at lunch tomorrow"), Label::Ham);
}

#[test]
fn missing_metadata_reports_unknown_version() {
    let dir = tempfile::tempdir().unwrap();
    common::train_fixture(dir.path(), ClassifierKind::NaiveBayes);
    let model_dir = dir.path().join("model");
    std::fs::remove_file(model_dir.join(METADATA_FILE)).unwrap();

    let service = InferenceService::load(&model_dir).unwrap();
    assert_eq!(service.version(), "unknown");
    assert_eq!(service.predict_proba("anything at all").model_version, "unknown");
}

#[test]
fn swapped_label_mapping_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = common::train_fixture(dir.path(), ClassifierKind::LogReg);
    let model_dir = dir.path().join("model");

    let mut metadata = outcome.metadata;
    metadata.label_mapping.insert("ham".to_string(), 1);
    metadata.label_mapping.insert("spam".to_string(), 0);
    artifact::write_json_atomic(&model_dir.join(METADATA_FILE), &metadata).unwrap();

    let err = InferenceService::load(&model_dir).unwrap_err();
    assert!(matches!(err, SpamError::LabelMappingMismatch));
}
