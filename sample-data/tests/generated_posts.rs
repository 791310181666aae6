use chrono::{Duration, TimeZone, Utc};
use keyword_classifier::KeywordClassifier;
use sample_data::{
    format_date_display, SampleGenerator, SamplePostSpec, SAMPLE_USERNAMES, UMD_TOPICS,
};
use terpsense_core::{Category, KeywordConfig, Post, Tone};

fn generator(seed: u64) -> SampleGenerator {
    SampleGenerator::with_seed(seed, Utc.with_ymd_and_hms(2024, 11, 23, 10, 30, 0).unwrap())
}

#[test]
fn test_seeded_generators_are_reproducible() {
    let config = KeywordConfig::default();
    let first = generator(7).test_suite(&config);
    let second = generator(7).test_suite(&config);

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn test_default_sample_post() {
    let mut generator = generator(1);
    let post = generator.sample_post(SamplePostSpec::new());

    assert!(SAMPLE_USERNAMES.contains(&post.username.as_str()));
    assert!(post.title.starts_with("Sample post about "));
    assert!(UMD_TOPICS.iter().any(|topic| post.text.contains(topic)));
    assert!(post.upvotes <= 100);
    assert!(post.comments <= 50);
    assert!(u64::from(post.views) >= post.total_interactions() + 50);
    assert!(u64::from(post.views) <= post.total_interactions() + 200);
    assert_eq!(post.created_utc, generator.now());
    assert!(post.url.starts_with("https://reddit.com/r/UMD/post_"));
    assert_eq!(post.post_hint, "text");
    assert_eq!(post.category, None);
    assert_eq!(post.tone, None);
    assert!(!post.is_misinformation);
}

#[test]
fn test_pinned_fields_are_kept() {
    let created = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
    let post = generator(2).sample_post(
        SamplePostSpec::new()
            .title("Finals Week Tips")
            .text("study hard")
            .username("terp_student")
            .upvotes(42)
            .comments(15)
            .category(Category::Academics)
            .created_utc(created),
    );

    assert_eq!(post.title, "Finals Week Tips");
    assert_eq!(post.upvotes, 42);
    assert_eq!(post.comments, 15);
    assert!((107..=257).contains(&post.views));
    assert_eq!(post.category, Some(Category::Academics));
    assert_eq!(
        format_date_display(&post.created_utc.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string()),
        "January 15, 2024"
    );
}

#[test]
fn test_suite_shape() {
    let config = KeywordConfig::default();
    let mut generator = generator(3);
    let now = generator.now();
    let suite = generator.test_suite(&config);

    assert_eq!(suite.academic_posts.len(), 3);
    assert_eq!(suite.humor_posts.len(), 3);
    assert_eq!(suite.misinformation_posts.len(), 2);
    assert_eq!(suite.mixed_posts.len(), 10);
    assert!((14..=35).contains(&suite.weekly_posts.len()));
    assert!((150..=450).contains(&suite.semester_posts.len()));

    for post in &suite.mixed_posts {
        assert!(post.category.is_some());
        assert!(post.created_utc >= now - Duration::days(30));
        assert!(post.created_utc <= now);
    }
    for post in &suite.weekly_posts {
        assert!(post.created_utc > now - Duration::days(7));
    }
}

#[test]
fn test_themed_posts_classify_as_labelled() {
    let config = KeywordConfig::default();
    let classifier = KeywordClassifier::new(config.clone());
    let mut generator = generator(4);

    for _ in 0..20 {
        let academic = generator.academic_post();
        assert_eq!(classifier.classify(&academic.content()).category, Category::Academics);

        let humor = generator.humor_post();
        let result = classifier.classify(&humor.content());
        assert_eq!(result.category, Category::Humor);
        assert_eq!(humor.tone, Some(Tone::Humor));

        let misinformation = generator.misinformation_post(&config);
        assert!(misinformation.is_misinformation);
        assert!(classifier.detect_misinformation(&misinformation.text));
    }
}

#[test]
fn test_mixed_posts_always_match_some_category() {
    let config = KeywordConfig::default();
    let classifier = KeywordClassifier::new(config.clone());
    let posts = generator(5).sample_posts(&config, 50);

    for post in &posts {
        assert_ne!(classifier.classify(&post.text).category, Category::Unclassified);
    }
}

#[test]
fn test_user_posts() {
    let posts = generator(6).user_posts("dining_critic", 4);
    assert_eq!(posts.len(), 4);
    assert!(posts.iter().all(|post| post.username == "dining_critic"));
}

#[test]
fn test_post_json_interop() {
    let post: Post = serde_json::from_value(serde_json::json!({
        "id": "abc",
        "title": "When you see Testudo on the way to your exam haha",
        "selftext": "lol this is so funny",
        "username": "testudo_fan",
        "upvotes": 10,
        "comments": 2,
        "views": 80,
        "category": "humor",
        "tone": "humorous",
        "is_misinformation": false,
        "created_utc": "2024-11-23T10:30:00Z",
        "url": "https://reddit.com/r/UMD/post_1234",
        "post_hint": "text"
    }))
    .unwrap();

    assert_eq!(post.text, "lol this is so funny");
    assert_eq!(post.tone, Some(Tone::Humor));

    let classifier = KeywordClassifier::default();
    let value = serde_json::to_value(&post).unwrap();
    let result = classifier.classify_value(&value).unwrap();
    assert_eq!(result, classifier.classify_post(&post));
    assert_eq!(result.category, Category::Humor);
}
