use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A normalized news article, one per fetched item. Built fresh on every run,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_raw: String,
    pub published_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

impl ArticleRecord {
    /// Validate a raw fetch row into a record. Rows without a usable title
    /// or URL are rejected at this boundary.
    pub fn from_raw(raw: RawArticle) -> Option<ArticleRecord> {
        let title = raw.title.trim().to_string();
        let url = raw.url.trim().to_string();
        if title.is_empty() || url.is_empty() {
            return None;
        }

        let description = raw
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Some(ArticleRecord {
            title,
            url,
            source: raw.source,
            published_raw: raw.published_raw,
            published_at: None,
            description,
        })
    }
}

/// An article row as it comes off the wire, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawArticle {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_raw: String,
    pub description: Option<String>,
}

impl RawArticle {
    pub fn from_feed_item(item: &rss::Item, source_name: &str) -> RawArticle {
        let url = match item.link() {
            Some(link) => link.to_string(),
            None => item
                .guid()
                .map(|g| g.value().to_string())
                .unwrap_or_default(),
        };

        RawArticle {
            title: item.title().unwrap_or("").to_string(),
            url,
            source: source_name.to_string(),
            published_raw: item.pub_date().unwrap_or("").to_string(),
            description: item.description().map(std::string::ToString::to_string),
        }
    }
}

/// Response envelope of a NewsAPI-style `/everything` endpoint.
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: NewsApiSource,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiSource {
    pub name: Option<String>,
}

impl NewsApiArticle {
    pub fn as_raw_article(&self) -> RawArticle {
        RawArticle {
            title: self.title.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
            source: self.source.name.clone().unwrap_or_default(),
            published_raw: self.published_at.clone().unwrap_or_default(),
            description: self.description.clone(),
        }
    }
}
