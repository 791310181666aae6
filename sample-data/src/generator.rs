//! Synthetic posts for exercising the analysis pipeline.
//!
//! All randomness goes through one [`fastrand::Rng`] and all dates are
//! relative to a fixed "now", so a seeded generator reproduces the same posts.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use terpsense_core::{Category, KeywordConfig, Post, Tone};
use tracing::debug;

pub const UMD_TOPICS: [&str; 15] = [
    "dining hall",
    "testudo",
    "mckeldin",
    "stamp",
    "parking",
    "dorm",
    "schedule",
    "registration",
    "tuition",
    "football",
    "basketball",
    "housing",
    "library",
    "gym",
    "campus",
];

pub const SAMPLE_USERNAMES: [&str; 12] = [
    "terp_student",
    "umd_alum",
    "testudo_fan",
    "study_buddy",
    "campus_explorer",
    "dining_critic",
    "game_watcher",
    "library_regular",
    "class_helper",
    "advice_seeker",
    "news_poster",
    "event_organizer",
];

const ACADEMIC_TITLES: [&str; 4] = [
    "CMSC351 exam tips?",
    "Best study spot on campus?",
    "Professor recommendations for INST326?",
    "Finals week schedule help",
];

const ACADEMIC_TEXTS: [&str; 4] = [
    "Anyone have advice for the upcoming midterm?",
    "Looking for a quiet place to study this week",
    "Which professor would you recommend?",
    "How are you all managing your finals schedule?",
];

const HUMOR_TITLES: [&str; 4] = [
    "Dining hall food hits different at 2am lol",
    "When you see Testudo on the way to your exam haha",
    "Me trying to find parking be like...",
    "POV: You forgot about your project due at midnight",
];

const MISINFORMATION_TITLES: [&str; 4] = [
    "BREAKING: Unconfirmed reports about campus",
    "Rumor: Huge announcement coming soon",
    "I heard from sources that...",
    "Allegedly something shocking happened",
];

/// Fields to pin on a generated post. Anything left unset is randomized.
#[derive(Debug, Clone, Default)]
pub struct SamplePostSpec {
    pub title: Option<String>,
    pub text: Option<String>,
    pub username: Option<String>,
    pub upvotes: Option<u32>,
    pub comments: Option<u32>,
    pub category: Option<Category>,
    pub tone: Option<Tone>,
    pub is_misinformation: bool,
    pub created_utc: Option<DateTime<Utc>>,
}

impl SamplePostSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn upvotes(mut self, upvotes: u32) -> Self {
        self.upvotes = Some(upvotes);
        self
    }

    pub fn comments(mut self, comments: u32) -> Self {
        self.comments = Some(comments);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn misinformation(mut self, is_misinformation: bool) -> Self {
        self.is_misinformation = is_misinformation;
        self
    }

    pub fn created_utc(mut self, created_utc: DateTime<Utc>) -> Self {
        self.created_utc = Some(created_utc);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TestSuite {
    pub academic_posts: Vec<Post>,
    pub humor_posts: Vec<Post>,
    pub misinformation_posts: Vec<Post>,
    pub mixed_posts: Vec<Post>,
    pub weekly_posts: Vec<Post>,
    pub semester_posts: Vec<Post>,
}

impl TestSuite {
    pub fn sections(&self) -> [(&'static str, &[Post]); 6] {
        [
            ("academic_posts", self.academic_posts.as_slice()),
            ("humor_posts", self.humor_posts.as_slice()),
            ("misinformation_posts", self.misinformation_posts.as_slice()),
            ("mixed_posts", self.mixed_posts.as_slice()),
            ("weekly_posts", self.weekly_posts.as_slice()),
            ("semester_posts", self.semester_posts.as_slice()),
        ]
    }

    pub fn len(&self) -> usize {
        self.sections().iter().map(|(_, posts)| posts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct SampleGenerator {
    rng: fastrand::Rng,
    now: DateTime<Utc>,
}

impl SampleGenerator {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            now: Utc::now(),
        }
    }

    /// A reproducible generator: same seed and `now`, same posts.
    pub fn with_seed(seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            now,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn sample_post(&mut self, spec: SamplePostSpec) -> Post {
        let username = spec
            .username
            .unwrap_or_else(|| self.pick(&SAMPLE_USERNAMES).to_string());
        let title = spec
            .title
            .unwrap_or_else(|| format!("Sample post about {}", self.pick(&UMD_TOPICS)));
        let text = spec.text.unwrap_or_else(|| {
            format!(
                "This is a sample post discussing {}. What do you all think?",
                self.pick(&UMD_TOPICS)
            )
        });
        let upvotes = spec.upvotes.unwrap_or_else(|| self.rng.u32(0..=100));
        let comments = spec.comments.unwrap_or_else(|| self.rng.u32(0..=50));
        let views = upvotes
            .saturating_add(comments)
            .saturating_add(self.rng.u32(50..=200));

        Post {
            id: self.next_id(),
            title,
            text,
            username,
            upvotes,
            comments,
            views,
            category: spec.category,
            tone: spec.tone,
            is_misinformation: spec.is_misinformation,
            created_utc: spec.created_utc.unwrap_or(self.now),
            url: format!("https://reddit.com/r/UMD/post_{}", self.rng.u32(1000..=9999)),
            post_hint: "text".to_string(),
        }
    }

    /// Posts over the last 30 days, each built around a keyword of a random category.
    pub fn sample_posts(&mut self, config: &KeywordConfig, count: usize) -> Vec<Post> {
        let base_date = self.now - Duration::days(30);

        (0..count)
            .map(|_| {
                let created = base_date + Duration::days(self.rng.i64(0..=30));
                let topic = self.pick(&UMD_TOPICS);

                let mut spec = SamplePostSpec::new().created_utc(created);
                if config.categories.is_empty() {
                    spec = spec.text(format!("Post about {}", topic));
                } else {
                    let entry = &config.categories[self.rng.usize(..config.categories.len())];
                    let text = match self.pick_string(&entry.keywords) {
                        Some(keyword) => format!("Post about {} and {}", keyword, topic),
                        None => format!("Post about {}", topic),
                    };
                    spec = spec.text(text).category(entry.label);
                }
                self.sample_post(spec)
            })
            .collect()
    }

    pub fn academic_post(&mut self) -> Post {
        let title = self.pick(&ACADEMIC_TITLES);
        let text = self.pick(&ACADEMIC_TEXTS);
        self.sample_post(
            SamplePostSpec::new()
                .title(title)
                .text(text)
                .category(Category::Academics)
                .tone(Tone::Neutral),
        )
    }

    pub fn humor_post(&mut self) -> Post {
        let title = self.pick(&HUMOR_TITLES);
        self.sample_post(
            SamplePostSpec::new()
                .title(title)
                .text("lol this is so funny")
                .category(Category::Humor)
                .tone(Tone::Humor),
        )
    }

    pub fn misinformation_post(&mut self, config: &KeywordConfig) -> Post {
        let title = self.pick(&MISINFORMATION_TITLES);
        let keyword = self
            .pick_string(&config.misinformation)
            .unwrap_or_else(|| "rumor".to_string());
        self.sample_post(
            SamplePostSpec::new()
                .title(title)
                .text(format!("{} about campus news", keyword))
                .misinformation(true)
                .tone(Tone::Uncertainty),
        )
    }

    pub fn user_posts(&mut self, username: &str, count: usize) -> Vec<Post> {
        (0..count)
            .map(|_| self.sample_post(SamplePostSpec::new().username(username)))
            .collect()
    }

    /// Two to five posts for each of the last seven days.
    pub fn weekly_posts(&mut self) -> Vec<Post> {
        let mut posts = Vec::new();
        for day in 0..7 {
            let post_date = self.now - Duration::days(day);
            let num_posts = self.rng.usize(2..=5);
            for _ in 0..num_posts {
                posts.push(self.sample_post(SamplePostSpec::new().created_utc(post_date)));
            }
        }
        posts
    }

    /// Ten to thirty posts per week over a fifteen-week semester.
    pub fn semester_posts(&mut self) -> Vec<Post> {
        let mut posts = Vec::new();
        let start_date = self.now - Duration::weeks(15);
        for week in 0..15 {
            let week_date = start_date + Duration::weeks(week);
            let num_posts = self.rng.usize(10..=30);
            for _ in 0..num_posts {
                let post_date = week_date + Duration::days(self.rng.i64(0..=6));
                posts.push(self.sample_post(SamplePostSpec::new().created_utc(post_date)));
            }
        }
        posts
    }

    pub fn test_suite(&mut self, config: &KeywordConfig) -> TestSuite {
        let suite = TestSuite {
            academic_posts: (0..3).map(|_| self.academic_post()).collect(),
            humor_posts: (0..3).map(|_| self.humor_post()).collect(),
            misinformation_posts: (0..2).map(|_| self.misinformation_post(config)).collect(),
            mixed_posts: self.sample_posts(config, 10),
            weekly_posts: self.weekly_posts(),
            semester_posts: self.semester_posts(),
        };
        debug!("Generated test suite with {} posts", suite.len());
        suite
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.usize(..items.len())]
    }

    fn pick_string(&mut self, items: &[String]) -> Option<String> {
        if items.is_empty() {
            None
        } else {
            Some(items[self.rng.usize(..items.len())].clone())
        }
    }

    fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
