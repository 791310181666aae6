use serde_json::{Map, Value};
use terpsense_core::{
    BatchPolicy, Category, ClassificationHints, ClassificationResult, ConfigError, CoreError,
    ErrorRecovery, KeywordConfig, LabeledKeywords, Post, Tone,
};
use tracing::{debug, trace};


/// Lowercases and trims text before matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Rule-based tagger over fixed, ordered keyword dictionaries.
///
/// Every operation is a pure function of the input and the configuration the
/// classifier was built with, so one instance can be shared freely between
/// threads.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    config: KeywordConfig,
}

impl KeywordClassifier {
    /// Keywords are matched as given. Use [`KeywordClassifier::try_new`] for
    /// hand-written tables that may not be lowercase and trimmed yet.
    pub fn new(config: KeywordConfig) -> Self {
        debug!(
            "Keyword classifier ready with {} categories and {} tones",
            config.categories.len(),
            config.tones.len()
        );
        Self { config }
    }

    /// Normalizes and validates `config` before building the classifier.
    pub fn try_new(config: KeywordConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.normalized()?))
    }

    /// First category, in declaration order, with a keyword inside `text`.
    pub fn classify_category(&self, text: &str) -> Category {
        first_match(&normalize(text), &self.config.categories).unwrap_or(Category::Unclassified)
    }

    pub fn detect_misinformation(&self, text: &str) -> bool {
        contains_any(&normalize(text), &self.config.misinformation)
    }

    /// First tone, in declaration order, with a cue inside `text`.
    pub fn classify_tone(&self, text: &str) -> Tone {
        first_match(&normalize(text), &self.config.tones).unwrap_or(Tone::Neutral)
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classify_with_hints(text, &ClassificationHints::none())
    }

    /// Classify `text`, taking category and tone from `hints` where given.
    pub fn classify_with_hints(
        &self,
        text: &str,
        hints: &ClassificationHints,
    ) -> ClassificationResult {
        let normalized = normalize(text);

        let category = hints.category.unwrap_or_else(|| {
            first_match(&normalized, &self.config.categories).unwrap_or(Category::Unclassified)
        });
        let tone = hints.tone.unwrap_or_else(|| {
            first_match(&normalized, &self.config.tones).unwrap_or(Tone::Neutral)
        });
        let is_misinformation = contains_any(&normalized, &self.config.misinformation);

        trace!(
            "Classified {} chars as category={} tone={} misinformation={}",
            normalized.len(),
            category,
            tone,
            is_misinformation
        );

        ClassificationResult {
            category,
            is_misinformation,
            tone,
        }
    }

    pub fn classify_post(&self, post: &Post) -> ClassificationResult {
        self.classify_with_hints(&post.content(), &post.hints())
    }

    /// Classify a dynamically typed value.
    ///
    /// Strings are classified as-is. Objects are read as post payloads: the
    /// `title` and `text` (or `selftext`) fields are joined, and `category` /
    /// `tone` fields act as hints. Any other shape is rejected with
    /// [`CoreError::InvalidInput`].
    pub fn classify_value(&self, value: &Value) -> Result<ClassificationResult, CoreError> {
        match value {
            Value::String(text) => Ok(self.classify(text)),
            Value::Object(fields) => {
                let text = post_text(fields)?;
                let hints = post_hints(fields)?;
                Ok(self.classify_with_hints(&text, &hints))
            }
            other => Err(CoreError::invalid_input(format!(
                "expected a string or post object, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// Classify every value, handling invalid items according to `policy`.
    ///
    /// Skipped items are reported as `None` so positions line up with the input.
    pub fn classify_batch(
        &self,
        values: &[Value],
        policy: BatchPolicy,
    ) -> Result<Vec<Option<ClassificationResult>>, CoreError> {
        let results = values
            .iter()
            .map(|value| {
                ErrorRecovery::apply_policy(policy, || self.classify_value(value)).into_result()
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Classified batch of {} items ({} skipped)",
            values.len(),
            results.iter().filter(|r| r.is_none()).count()
        );
        Ok(results)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(KeywordConfig::default())
    }
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

fn first_match<L: Copy>(text: &str, entries: &[LabeledKeywords<L>]) -> Option<L> {
    entries
        .iter()
        .find(|entry| contains_any(text, &entry.keywords))
        .map(|entry| entry.label)
}

fn post_text(fields: &Map<String, Value>) -> Result<String, CoreError> {
    let title = string_field(fields, "title")?;
    let body = match string_field(fields, "text")? {
        Some(text) => Some(text),
        None => string_field(fields, "selftext")?,
    };

    let parts: Vec<&str> = title.into_iter().chain(body).collect();
    if parts.is_empty() {
        return Err(CoreError::invalid_input(
            "post object has no 'title', 'text' or 'selftext' string",
        ));
    }
    Ok(parts.join(" "))
}

/// A string field, with absent and null both read as `None`.
fn string_field<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, CoreError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(CoreError::invalid_input(format!(
            "post field '{}' must be a string, got {}",
            key,
            json_type_name(other)
        ))),
    }
}

fn post_hints(fields: &Map<String, Value>) -> Result<ClassificationHints, CoreError> {
    Ok(ClassificationHints {
        category: hint_field(fields, "category")?,
        tone: hint_field(fields, "tone")?,
    })
}

fn hint_field<T>(fields: &Map<String, Value>, key: &str) -> Result<Option<T>, CoreError>
where
    T: std::str::FromStr<Err = CoreError>,
{
    string_field(fields, key)?.map(str::parse).transpose()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
