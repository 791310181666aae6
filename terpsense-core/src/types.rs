use crate::CoreError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content category of a post.
///
/// `Unclassified` is the "no keyword matched" outcome and is never a
/// dictionary label. It is distinct from `Random`, which is a real category
/// with its own keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Humor,
    Random,
    News,
    Academics,
    Advice,
    Social,
    Unclassified,
}

impl Category {
    /// Categories that can carry keywords, in the reference declaration order.
    pub const KEYWORD_CATEGORIES: [Category; 6] = [
        Category::Humor,
        Category::Random,
        Category::News,
        Category::Academics,
        Category::Advice,
        Category::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Humor => "humor",
            Category::Random => "random",
            Category::News => "news",
            Category::Academics => "academics",
            Category::Advice => "advice",
            Category::Social => "social",
            Category::Unclassified => "unclassified",
        }
    }

    pub fn is_unclassified(&self) -> bool {
        matches!(self, Category::Unclassified)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "humor" => Ok(Category::Humor),
            "random" => Ok(Category::Random),
            "news" => Ok(Category::News),
            "academics" => Ok(Category::Academics),
            "advice" => Ok(Category::Advice),
            "social" => Ok(Category::Social),
            "unclassified" => Ok(Category::Unclassified),
            other => Err(CoreError::invalid_input(format!(
                "unknown category '{}'",
                other
            ))),
        }
    }
}

/// Tone of a post. `Neutral` is the "no cue matched" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Anger,
    Sarcasm,
    #[serde(alias = "humorous")]
    Humor,
    #[serde(alias = "uncertain")]
    Uncertainty,
    Neutral,
}

impl Tone {
    /// Tones that can carry cues, in the reference declaration order.
    pub const CUE_TONES: [Tone; 4] = [Tone::Anger, Tone::Sarcasm, Tone::Humor, Tone::Uncertainty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Anger => "anger",
            Tone::Sarcasm => "sarcasm",
            Tone::Humor => "humor",
            Tone::Uncertainty => "uncertainty",
            Tone::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anger" => Ok(Tone::Anger),
            "sarcasm" => Ok(Tone::Sarcasm),
            "humor" | "humorous" => Ok(Tone::Humor),
            "uncertainty" | "uncertain" => Ok(Tone::Uncertainty),
            "neutral" => Ok(Tone::Neutral),
            other => Err(CoreError::invalid_input(format!("unknown tone '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub is_misinformation: bool,
    pub tone: Tone,
}

impl ClassificationResult {
    /// The category, with `Unclassified` replaced by the caller's default.
    pub fn category_or(&self, default: Category) -> Category {
        if self.category.is_unclassified() {
            default
        } else {
            self.category
        }
    }
}

/// Pre-assigned labels that bypass inference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationHints {
    pub category: Option<Category>,
    pub tone: Option<Tone>,
}

impl ClassificationHints {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PostRecord")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub text: String,
    pub username: String,
    pub upvotes: u32,
    pub comments: u32,
    pub views: u32,
    pub category: Option<Category>,
    pub tone: Option<Tone>,
    pub is_misinformation: bool,
    pub created_utc: DateTime<Utc>,
    pub url: String,
    pub post_hint: String,
}

impl Post {
    /// Title and body joined into the text that gets classified.
    pub fn content(&self) -> String {
        format!("{} {}", self.title, self.text)
    }

    pub fn hints(&self) -> ClassificationHints {
        ClassificationHints {
            category: self.category,
            tone: self.tone,
        }
    }

    pub fn total_interactions(&self) -> u64 {
        u64::from(self.upvotes) + u64::from(self.comments)
    }
}

/// Accepted input shape for [`Post`].
///
/// Besides the serialized form it takes the sample generator's older records:
/// no `id`, the body under `selftext` as well as (or instead of) `text`, an
/// `is_disinformation` flag, and a naive `created_utc` taken to be UTC.
#[derive(Deserialize)]
struct PostRecord {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    selftext: Option<String>,
    username: String,
    upvotes: u32,
    comments: u32,
    views: u32,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    tone: Option<Tone>,
    #[serde(default, alias = "is_disinformation")]
    is_misinformation: bool,
    #[serde(deserialize_with = "deserialize_created_utc")]
    created_utc: DateTime<Utc>,
    url: String,
    #[serde(default = "default_post_hint")]
    post_hint: String,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        let id = record.id.unwrap_or_else(|| {
            record
                .url
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string()
        });

        Post {
            id,
            title: record.title,
            text: record.text.or(record.selftext).unwrap_or_default(),
            username: record.username,
            upvotes: record.upvotes,
            comments: record.comments,
            views: record.views,
            category: record.category,
            tone: record.tone,
            is_misinformation: record.is_misinformation,
            created_utc: record.created_utc,
            url: record.url,
            post_hint: record.post_hint,
        }
    }
}

fn default_post_hint() -> String {
    "text".to_string()
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn deserialize_created_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| de::Error::custom(format!("invalid created_utc timestamp '{}'", raw)))
}
