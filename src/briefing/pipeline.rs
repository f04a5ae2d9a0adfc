use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, info, warn};
use url::Url;

use super::config::AppConfig;
use super::data_types::ArticleRecord;
use super::dates::parse_published;
use super::dedup::deduplicate;
use super::fetcher::{NewsApiFetcher, RssFetcher, SourceFetcher};
use super::filter::Filters;
use super::freshness::Freshness;
use super::model::ModelClient;
use super::personas::select_persona;
use super::prompt::build_briefing_prompt;

/// Result of the filtering stages. An empty survivor set is a
/// distinguishable condition, not an empty-but-successful list.
#[derive(Debug, PartialEq)]
pub enum FilterOutcome {
    Briefing(Vec<ArticleRecord>),
    NoFreshContent,
}

pub enum RunOutcome {
    Delivered { cases: usize },
    NoFreshContent,
}

/// Runs one briefing end to end: fetch all sources sequentially, annotate
/// and filter, dedupe, build the prompt, call the model, deliver.
pub struct Pipeline {
    config: AppConfig,
    filters: Vec<Regex>,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: &AppConfig) -> Pipeline {
        Self {
            config: config.clone(),
            filters: Filters::compile(&config.filters),
        }
    }

    fn sources(&self) -> Vec<SourceFetcher> {
        let mut sources = Vec::new();
        if let Some(newsapi) = &self.config.newsapi {
            sources.push(SourceFetcher::NewsApi(NewsApiFetcher::new(newsapi)));
        }
        for rss in &self.config.rss_sources {
            sources.push(SourceFetcher::Rss(RssFetcher::new(rss)));
        }
        sources
    }

    /// Query every source in turn. A failing source contributes nothing and
    /// the run continues; the delay between calls is rate-limit courtesy.
    async fn fetch_all(&self) -> Vec<ArticleRecord> {
        let mut fetched = Vec::new();
        for (index, source) in self.sources().iter().enumerate() {
            if index > 0 && self.config.source_delay_secs > 0 {
                tokio::time::sleep(std::time::Duration::from_secs(
                    self.config.source_delay_secs,
                ))
                .await;
            }
            match source.fetch().await {
                Ok(mut records) => {
                    info!(source = source.label(), count = records.len(), "source fetched");
                    fetched.append(&mut records);
                }
                Err(e) => {
                    warn!(source = source.label(), error = %e, "source fetch failed, continuing without it");
                }
            }
        }
        fetched
    }

    /// Keep an item if it matches any focus filter. No filters configured
    /// means everything is in focus.
    fn keep_title(&self, title: &str) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        self.filters.iter().any(|filter| filter.is_match(title))
    }

    /// Check if a URL's domain is in the blacklist
    fn is_blacklisted(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }

        match Url::parse(url) {
            Ok(parsed_url) => match parsed_url.domain() {
                Some(domain) => self
                    .config
                    .blacklisted_domains
                    .iter()
                    .any(|blacklisted| domain == blacklisted),
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Stages 4.1 through 4.3: annotate each record with a parsed timestamp,
    /// drop stale and undated records, then dedupe the survivors.
    #[must_use]
    pub fn filter_and_dedupe(
        &self,
        records: Vec<ArticleRecord>,
        now: DateTime<Utc>,
    ) -> FilterOutcome {
        let windows = self.config.windows();
        let total = records.len();
        let mut fresh = Vec::new();

        for mut record in records {
            if self.is_blacklisted(&record.url) {
                debug!(url = %record.url, "blacklisted domain dropped");
                continue;
            }
            if !self.keep_title(&record.title) {
                continue;
            }

            record.published_at = parse_published(&record.published_raw, &record.source, now);
            let freshness = Freshness::classify(record.published_at, now, windows);
            if freshness.is_fresh() {
                fresh.push(record);
            } else {
                debug!(
                    title = %record.title,
                    age = %freshness.describe(),
                    "record excluded"
                );
            }
        }

        let unique = deduplicate(fresh, self.config.similarity_threshold);
        info!(total, surviving = unique.len(), "filtering complete");

        if unique.is_empty() {
            FilterOutcome::NoFreshContent
        } else {
            FilterOutcome::Briefing(unique)
        }
    }

    /// Run the whole pipeline once. With `dry_run` the briefing is printed
    /// instead of delivered.
    pub async fn run(&self, dry_run: bool) -> Result<RunOutcome, Box<dyn std::error::Error>> {
        let now = Utc::now();
        let fetched = self.fetch_all().await;

        let FilterOutcome::Briefing(articles) = self.filter_and_dedupe(fetched, now) else {
            warn!("no fresh content after filtering; skipping model call and delivery");
            return Ok(RunOutcome::NoFreshContent);
        };

        let date = now.date_naive();
        let persona = select_persona(&self.config.personas, date);
        let prompt = build_briefing_prompt(
            &persona,
            date,
            self.config.desired_cases,
            &articles,
            now,
            self.config.windows(),
        );

        let briefing = ModelClient::new(&self.config.llm).complete(&prompt).await?;
        let cases = articles.len().min(self.config.desired_cases);
        let subject = format!("Daily Content Discovery Briefing - {date}");

        if dry_run {
            println!("{subject}\n\n{briefing}");
        } else {
            self.config.get_sender().deliver(&subject, &briefing).await?;
        }

        Ok(RunOutcome::Delivered { cases })
    }
}
