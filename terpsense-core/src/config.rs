//! Keyword dictionaries used by the classifier.
//!
//! Dictionaries are ordered lists of `(label, keywords)` pairs. Order is part
//! of the configuration: the first label with a matching keyword wins, so the
//! TOML form uses arrays of tables (`[[categories]]`, `[[tones]]`), which keep
//! their declaration order.

use crate::{Category, ConfigError, CoreError, Tone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledKeywords<L> {
    pub label: L,
    #[serde(default)]
    pub keywords: Vec<String>,
}

pub type CategoryKeywords = LabeledKeywords<Category>;
pub type ToneKeywords = LabeledKeywords<Tone>;

impl<L> LabeledKeywords<L> {
    pub fn new(label: L, keywords: &[&str]) -> Self {
        Self {
            label,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    #[serde(default)]
    pub categories: Vec<CategoryKeywords>,
    #[serde(default)]
    pub misinformation: Vec<String>,
    #[serde(default)]
    pub tones: Vec<ToneKeywords>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                LabeledKeywords::new(Category::Humor, &["lol", "lmao", "haha", "joke", "funny"]),
                LabeledKeywords::new(Category::Random, &["idk", "random", "whatever"]),
                LabeledKeywords::new(
                    Category::News,
                    &["alert", "news", "update", "announcement", "diamondback", "report"],
                ),
                LabeledKeywords::new(
                    Category::Academics,
                    &[
                        "class", "classes", "exam", "professor", "grade", "gpa", "study",
                        "midterm", "final", "project", "homework",
                    ],
                ),
                LabeledKeywords::new(
                    Category::Advice,
                    &["recommend", "tips", "help", "should i", "question", "advice"],
                ),
                LabeledKeywords::new(
                    Category::Social,
                    &["party", "hangout", "movie", "homecoming", "game", "event"],
                ),
            ],
            misinformation: [
                "rumor",
                "unconfirmed",
                "heard",
                "confirmed??",
                "sources say",
                "reportedly",
                "breaking",
                "shocking",
                "can't believe",
                "conspiracy",
                "fake news",
                "scam",
                "hoax",
                "allegedly",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            tones: vec![
                LabeledKeywords::new(Tone::Anger, &["!", "angry", "hate", "worst", "terrible"]),
                LabeledKeywords::new(Tone::Sarcasm, &["yeah right", "sure", "totally"]),
                LabeledKeywords::new(Tone::Humor, &["lol", "funny", "haha"]),
                LabeledKeywords::new(Tone::Uncertainty, &["maybe", "not sure", "idk", "perhaps"]),
            ],
        }
    }
}

impl KeywordConfig {
    /// Parse a TOML document and normalize it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: KeywordConfig = toml::from_str(source)?;
        config.normalized()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::Config(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }),
            _ => CoreError::Io(e),
        })?;

        let config = Self::from_toml_str(&source)?;
        info!(
            "Loaded keyword configuration from {} ({} categories, {} tones, {} misinformation keywords)",
            path.display(),
            config.categories.len(),
            config.tones.len(),
            config.misinformation.len()
        );
        Ok(config)
    }

    /// Lowercase and trim every keyword, then validate the tables.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        for entry in &mut self.categories {
            normalize_keywords(&mut entry.keywords, entry.label)?;
        }
        for entry in &mut self.tones {
            normalize_keywords(&mut entry.keywords, entry.label)?;
        }
        normalize_keywords(&mut self.misinformation, "misinformation")?;

        check_labels(&self.categories, "categories", Category::Unclassified)?;
        check_labels(&self.tones, "tones", Tone::Neutral)?;

        debug!(
            "Keyword configuration validated: {} category keywords, {} tone cues",
            self.categories.iter().map(|c| c.keywords.len()).sum::<usize>(),
            self.tones.iter().map(|t| t.keywords.len()).sum::<usize>()
        );
        Ok(self)
    }

    pub fn category_keywords(&self, category: Category) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|entry| entry.label == category)
            .map(|entry| entry.keywords.as_slice())
    }

    pub fn tone_cues(&self, tone: Tone) -> Option<&[String]> {
        self.tones
            .iter()
            .find(|entry| entry.label == tone)
            .map(|entry| entry.keywords.as_slice())
    }
}

fn normalize_keywords(keywords: &mut [String], owner: impl Display) -> Result<(), ConfigError> {
    for keyword in keywords.iter_mut() {
        let normalized = keyword.trim().to_lowercase();
        // An empty trigger is a substring of every text
        if normalized.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: format!("empty keyword in '{}'", owner),
            });
        }
        *keyword = normalized;
    }
    Ok(())
}

fn check_labels<L>(
    entries: &[LabeledKeywords<L>],
    table: &str,
    fallback: L,
) -> Result<(), ConfigError>
where
    L: Copy + Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.label == fallback {
            return Err(ConfigError::InvalidValue {
                field: format!("{}.label", table),
                value: entry.label.to_string(),
            });
        }
        if !seen.insert(entry.label) {
            return Err(ConfigError::DuplicateLabel {
                table: table.to_string(),
                label: entry.label.to_string(),
            });
        }
    }
    Ok(())
}
