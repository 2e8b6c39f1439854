#![allow(dead_code)]

use std::path::{Path, PathBuf};

use spam_classifier::{
    artifact::ArtifactStore,
    nlp::classifier::ClassifierKind,
    training::{TrainOptions, TrainOutcome, Trainer},
};

const SPAM_ITEMS: &[&str] = &[
    "iphone", "holiday", "voucher", "ringtone", "car", "laptop", "cruise", "tv", "watch", "camera",
];
const HAM_THINGS: &[&str] = &[
    "lunch", "dinner", "the meeting", "coffee", "the game", "class", "practice", "the movie",
    "breakfast", "the call",
];

/// Writes a small, separable labelled CSV and returns its path.
pub fn write_dataset(dir: &Path) -> PathBuf {
    let mut csv = String::from("text,label\n");
    for (i, item) in SPAM_ITEMS.iter().enumerate() {
        csv.push_str(&format!(
            "\"WINNER! Claim your free {item} now, text WIN to 8{i}0{i}\",spam\n"
        ));
        csv.push_str(&format!(
            "\"Urgent: you have won a cash prize and a free {item}. Call now\",1\n"
        ));
    }
    for (i, thing) in HAM_THINGS.iter().enumerate() {
        csv.push_str(&format!(
            "\"Are we still meeting for {thing} tomorrow at {i} o'clock?\",ham\n"
        ));
        csv.push_str(&format!(
            "\"Sorry I'm late, see you at {thing} later with mum\",0\n"
        ));
    }
    csv.push_str("\"   \",spam\n");
    let path = dir.join("spam_dataset.csv");
    std::fs::write(&path, csv).expect("write dataset");
    path
}

pub fn trainer(root: &Path, kind: ClassifierKind) -> Trainer {
    Trainer::new(
        ArtifactStore::new(root.join("model")),
        root.join("reports"),
        TrainOptions::new(kind, "v1.0"),
    )
}

/// Trains a model under `root` on the fixture dataset.
pub fn train_fixture(root: &Path, kind: ClassifierKind) -> TrainOutcome {
    let dataset = write_dataset(root);
    trainer(root, kind).train(&dataset).expect("training succeeds")
}
