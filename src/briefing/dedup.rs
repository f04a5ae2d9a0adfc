use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use super::data_types::ArticleRecord;

/// Articles, conjunctions and common prepositions carry no signal for
/// telling two headlines apart.
const STOPWORDS: [&str; 30] = [
    "the", "and", "but", "nor", "for", "yet", "not", "with", "from", "into", "onto", "about",
    "after", "before", "over", "under", "between", "through", "during", "against", "above",
    "below", "off", "out", "was", "are", "has", "had", "its", "this",
];

/// Lowercase, tokenize, and drop stopwords and tokens of length <= 2.
#[must_use]
pub fn normalize_title(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() > 2 && !STOPWORDS.contains(word))
        .map(std::string::ToString::to_string)
        .collect()
}

/// Overlap ratio of two normalized token sets: shared tokens over the
/// smaller set. Empty sets never match anything.
#[must_use]
pub fn title_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = shared as f64 / a.len().min(b.len()) as f64;
    ratio
}

/// De-duplicate by exact URL and by title similarity. Input is sorted
/// newest-first (unknown timestamps last) before scanning, so the freshest
/// copy of each duplicate cluster is the one kept; the returned list keeps
/// that order.
#[must_use]
pub fn deduplicate(mut records: Vec<ArticleRecord>, threshold: f64) -> Vec<ArticleRecord> {
    records.sort_by(|a, b| match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut kept_titles: Vec<HashSet<String>> = Vec::new();
    let mut unique: Vec<ArticleRecord> = Vec::new();

    for record in records {
        if !seen_urls.insert(record.url.clone()) {
            debug!(url = %record.url, title = %record.title, "duplicate URL dropped");
            continue;
        }

        let tokens = normalize_title(&record.title);
        if kept_titles
            .iter()
            .any(|kept| title_similarity(&tokens, kept) > threshold)
        {
            debug!(title = %record.title, "near-duplicate title dropped");
            continue;
        }

        kept_titles.push(tokens);
        unique.push(record);
    }

    unique
}
