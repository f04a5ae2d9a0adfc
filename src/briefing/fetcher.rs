use rss::Channel;

use super::config::{NewsApiConfig, RssSourceConfig};
use super::data_types::{ArticleRecord, NewsApiResponse, RawArticle};

/// A configured article source. The pipeline treats every variant the
/// same way: a label for diagnostics and a fetch that yields records.
pub enum SourceFetcher {
    NewsApi(NewsApiFetcher),
    Rss(RssFetcher),
}

impl SourceFetcher {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            SourceFetcher::NewsApi(fetcher) => fetcher.label(),
            SourceFetcher::Rss(fetcher) => fetcher.label(),
        }
    }

    pub async fn fetch(&self) -> Result<Vec<ArticleRecord>, Box<dyn std::error::Error>> {
        match self {
            SourceFetcher::NewsApi(fetcher) => fetcher.fetch().await,
            SourceFetcher::Rss(fetcher) => fetcher.fetch().await,
        }
    }
}

pub struct NewsApiFetcher {
    config: NewsApiConfig,
    api_base_url: String,
}

impl NewsApiFetcher {
    #[must_use]
    pub fn new(config: &NewsApiConfig) -> NewsApiFetcher {
        const API_BASE_URL: &str = "https://newsapi.org/v2";
        Self {
            config: config.clone(),
            api_base_url: API_BASE_URL.to_string(),
        }
    }

    #[allow(dead_code)]
    fn with_base_url(&mut self, base_url: String) -> &mut Self {
        self.api_base_url = base_url;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        "newsapi"
    }

    /// Query the `/everything` endpoint and validate each row into a record.
    pub async fn fetch(&self) -> Result<Vec<ArticleRecord>, Box<dyn std::error::Error>> {
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/everything", self.api_base_url))
            .header("X-Api-Key", &self.config.api_key)
            .query(&[
                ("q", self.config.query.as_str()),
                ("pageSize", &self.config.page_size.to_string()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<NewsApiResponse>()
            .await?;

        if response.status != "ok" {
            return Err(format!("newsapi returned status {}", response.status).into());
        }

        let records = response
            .articles
            .iter()
            .filter_map(|article| ArticleRecord::from_raw(article.as_raw_article()))
            .collect();

        Ok(records)
    }
}

pub struct RssFetcher {
    config: RssSourceConfig,
}

impl RssFetcher {
    #[must_use]
    pub fn new(config: &RssSourceConfig) -> RssFetcher {
        Self {
            config: config.clone(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.config.name
    }

    /// Pull the feed and validate each item into a record.
    pub async fn fetch(&self) -> Result<Vec<ArticleRecord>, Box<dyn std::error::Error>> {
        let content = reqwest::get(&self.config.url).await?.bytes().await?;
        let channel = Channel::read_from(&content[..])?;

        let records = channel
            .items()
            .iter()
            .map(|item| RawArticle::from_feed_item(item, &self.config.name))
            .filter_map(ArticleRecord::from_raw)
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod test {
    use super::{NewsApiFetcher, RssFetcher};
    use crate::briefing::config::{NewsApiConfig, RssSourceConfig};
    use tokio::test;

    #[test]
    async fn test_newsapi_fetch() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let everything_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/everything")
                .header("X-Api-Key", "test-key")
                .query_param("q", "cold case")
                .query_param("sortBy", "publishedAt");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "status": "ok",
                        "totalResults": 3,
                        "articles": [
                            {
                                "source": {"id": null, "name": "Example Wire"},
                                "title": "Cold case reopened after DNA hit",
                                "url": "https://example.com/cold-case",
                                "publishedAt": "2025-08-19T09:00:00Z",
                                "description": "Detectives reopened the 1994 case."
                            },
                            {
                                "source": {"id": null, "name": "Example Wire"},
                                "title": "[Removed]",
                                "url": "",
                                "publishedAt": null,
                                "description": null
                            },
                            {
                                "source": {"id": null, "name": "Example Wire"},
                                "title": null,
                                "url": "https://example.com/untitled",
                                "publishedAt": "2025-08-19T10:00:00Z",
                                "description": null
                            }
                        ]
                    }"#,
                );
        });

        let config = NewsApiConfig {
            api_key: "test-key".to_string(),
            query: "cold case".to_string(),
            page_size: 50,
        };
        let mut fetcher = NewsApiFetcher::new(&config);
        let fetcher = fetcher.with_base_url(format!("http://127.0.0.1:{}", server.port()));

        let records = fetcher.fetch().await.unwrap();
        everything_mock.assert();

        // rows without a title or url never leave the boundary
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Cold case reopened after DNA hit");
        assert_eq!(records[0].source, "Example Wire");
        assert_eq!(records[0].published_raw, "2025-08-19T09:00:00Z");
        assert!(records[0].published_at.is_none());
    }

    #[test]
    async fn test_newsapi_error_status() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/everything");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status": "error", "articles": []}"#);
        });

        let config = NewsApiConfig {
            api_key: "test-key".to_string(),
            query: "cold case".to_string(),
            page_size: 50,
        };
        let mut fetcher = NewsApiFetcher::new(&config);
        let fetcher = fetcher.with_base_url(format!("http://127.0.0.1:{}", server.port()));
        assert!(fetcher.fetch().await.is_err());
    }

    #[test]
    async fn test_rss_fetch() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let feed_mock = server.mock(|when, then| {
            when.method(GET).path("/oddities.rss");
            then.status(200)
                .header("content-type", "application/rss+xml")
                .body(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
                    <rss version="2.0">
                      <channel>
                        <title>Oddities</title>
                        <link>https://example.com</link>
                        <description>Strange stories</description>
                        <item>
                          <title>Town mystified by midnight bell ringer</title>
                          <link>https://example.com/bell</link>
                          <pubDate>Tue, 19 Aug 2025 09:00:00 GMT</pubDate>
                          <description>Nobody owns the bell.</description>
                        </item>
                        <item>
                          <title></title>
                          <link>https://example.com/empty</link>
                        </item>
                      </channel>
                    </rss>"#,
                );
        });

        let config = RssSourceConfig {
            name: "oddities".to_string(),
            url: format!("http://127.0.0.1:{}/oddities.rss", server.port()),
        };
        let records = RssFetcher::new(&config).fetch().await.unwrap();
        feed_mock.assert();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Town mystified by midnight bell ringer");
        assert_eq!(records[0].source, "oddities");
        assert_eq!(records[0].published_raw, "Tue, 19 Aug 2025 09:00:00 GMT");
    }
}
