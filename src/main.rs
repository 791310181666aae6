use anyhow::Context;
use keyword_classifier::KeywordClassifier;
use sample_data::{
    format_classification_display, format_date_display, format_engagement_display,
    SampleGenerator,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use terpsense_core::{Category, ClassificationResult, CoreError, ErrorReporter, KeywordConfig};
use tracing_subscriber::EnvFilter;

const KEYWORDS_ENV: &str = "TERPSENSE_KEYWORDS";

#[derive(Debug, Default)]
struct SectionReport {
    posts: usize,
    categories: BTreeMap<String, usize>,
    tones: BTreeMap<String, usize>,
    misinformation: usize,
    label_mismatches: usize,
}

impl SectionReport {
    fn record(&mut self, labelled: Option<Category>, result: &ClassificationResult) {
        self.posts += 1;
        *self
            .categories
            .entry(result.category.to_string())
            .or_default() += 1;
        *self.tones.entry(result.tone.to_string()).or_default() += 1;
        if result.is_misinformation {
            self.misinformation += 1;
        }
        if labelled.is_some_and(|label| label != result.category) {
            self.label_mismatches += 1;
        }
    }
}

fn load_config() -> Result<KeywordConfig, CoreError> {
    match std::env::var(KEYWORDS_ENV) {
        Ok(path) => KeywordConfig::from_file(path),
        Err(_) => {
            tracing::info!("{} not set, using built-in keyword tables", KEYWORDS_ENV);
            Ok(KeywordConfig::default())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("terpsense=info,keyword_classifier=info")),
        )
        .init();

    tracing::info!("Starting Terpsense - sample post classification");

    let config = load_config()
        .map_err(|e| {
            ErrorReporter::new().report_error(&e);
            e
        })
        .context("failed to load keyword configuration")?;

    let mut generator = SampleGenerator::new();
    let suite = generator.test_suite(&config);
    let classifier = Arc::new(KeywordClassifier::new(config));

    let mut handles = Vec::new();
    for (name, posts) in suite.sections() {
        let classifier = Arc::clone(&classifier);
        let posts = posts.to_vec();
        handles.push(tokio::spawn(async move {
            let mut report = SectionReport::default();
            for post in &posts {
                // Inferred labels are compared with the generator's labels
                let inferred = classifier.classify(&post.content());
                report.record(post.category, &inferred);
                tracing::debug!(
                    "{} | {} | {} | {}",
                    post.title,
                    format_classification_display(&inferred),
                    format_engagement_display(post.upvotes, post.comments),
                    format_date_display(&post.created_utc.to_rfc3339())
                );
            }
            (name, report)
        }));
    }

    for handle in handles {
        let (name, report) = handle.await.context("classification task failed")?;
        tracing::info!(
            "{}: {} posts, {} flagged as misinformation, {} differ from their label",
            name,
            report.posts,
            report.misinformation,
            report.label_mismatches
        );
        tracing::info!("  categories: {:?}", report.categories);
        tracing::info!("  tones: {:?}", report.tones);
    }

    tracing::info!("Classified {} posts", suite.len());
    Ok(())
}
