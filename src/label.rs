//! Binary message label and its fixed integer encoding.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Probability at or above which a message is reported as spam.
pub const SPAM_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham = 0,
    Spam = 1,
}

impl Label {
    /// Permissive dataset policy: `spam`, `1` and `true` are spam, anything else is ham.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "spam" | "1" | "true" => Self::Spam,
            _ => Self::Ham,
        }
    }

    pub fn from_index(index: usize) -> Self {
        if index == 1 {
            Self::Spam
        } else {
            Self::Ham
        }
    }

    pub fn from_probability(probability: f64) -> Self {
        if probability >= SPAM_THRESHOLD {
            Self::Spam
        } else {
            Self::Ham
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ham => "ham",
            Self::Spam => "spam",
        }
    }

    /// Wording shown on the HTML result page.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Ham => "Not Spam",
            Self::Spam => "Spam",
        }
    }

    /// The encoding written to every metadata file.
    pub fn mapping() -> BTreeMap<String, u8> {
        BTreeMap::from([
            (Self::Ham.as_str().to_string(), Self::Ham as u8),
            (Self::Spam.as_str().to_string(), Self::Spam as u8),
        ])
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
