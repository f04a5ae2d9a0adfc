use chrono::{DateTime, NaiveDate, Utc};

use super::data_types::ArticleRecord;
use super::freshness::{Freshness, FreshnessWindows};
use super::personas::Persona;

const MISSION: &str = "You are a content discovery specialist evaluating true crime and \
stranger-than-fiction stories for premium development opportunities. For each case below, \
assess the narrative hook, the characters involved, and the documentary production \
potential. Only use the source material provided; do not invent cases.";

const OUTPUT_FORMAT: &str = "For every case produce: a headline, a three-sentence summary, \
why it is compelling now, and a one-line format recommendation (feature documentary, \
limited series, or podcast). Rank the cases by development priority.";

/// Assemble the full briefing prompt. Pure text construction; the caller
/// decides what to do with it.
#[must_use]
pub fn build_briefing_prompt(
    persona: &Persona,
    date: NaiveDate,
    desired_cases: usize,
    articles: &[ArticleRecord],
    now: DateTime<Utc>,
    windows: FreshnessWindows,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(MISSION);
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Write today's briefing ({date}) in the voice of {name}: {style}.\n\n",
        name = persona.name,
        style = persona.style,
    ));

    if articles.len() < desired_cases {
        // Shortfall is disclosed, never padded with stale content
        prompt.push_str(&format!(
            "Note: only {available} of the {desired_cases} requested fresh cases are \
             available today. State this shortfall plainly at the top of the briefing \
             and cover what is here; do not invent or pad.\n\n",
            available = articles.len(),
        ));
    }

    prompt.push_str(&format!(
        "Source material ({count} articles, newest first):\n",
        count = articles.len()
    ));
    for (index, article) in articles.iter().enumerate() {
        let age = Freshness::classify(article.published_at, now, windows).describe();
        prompt.push_str(&format!(
            "{n}. {title} [{source}, {age}]\n   {url}\n",
            n = index + 1,
            title = article.title,
            source = article.source,
            url = article.url,
        ));
        if let Some(description) = &article.description {
            prompt.push_str(&format!("   {}\n", trim_description(description)));
        }
    }

    prompt.push('\n');
    prompt.push_str(OUTPUT_FORMAT);
    prompt
}

/// Keep context lines bounded; feed descriptions can run to whole paragraphs.
fn trim_description(description: &str) -> String {
    const MAX_LEN: usize = 280;
    let collapsed: String = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_LEN {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(MAX_LEN).collect();
    format!("{truncated}...")
}
