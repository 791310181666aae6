use crate::validation::parse_iso_datetime;
use terpsense_core::ClassificationResult;

/// `"42 upvotes, 15 comments (57 total interactions)"`
pub fn format_engagement_display(upvotes: u32, comments: u32) -> String {
    let total = u64::from(upvotes) + u64::from(comments);
    format!(
        "{} upvotes, {} comments ({} total interactions)",
        upvotes, comments, total
    )
}

/// `"2024-11-23T10:30:00"` becomes `"November 23, 2024"`. Unparseable input is
/// returned unchanged.
pub fn format_date_display(date_string: &str) -> String {
    match parse_iso_datetime(date_string) {
        Some(dt) => dt.format("%B %d, %Y").to_string(),
        None => date_string.to_string(),
    }
}

pub fn format_classification_display(result: &ClassificationResult) -> String {
    format!(
        "category: {}, tone: {}, misinformation: {}",
        result.category,
        result.tone,
        if result.is_misinformation { "yes" } else { "no" }
    )
}
