use serde::{Deserialize, Serialize};

use super::filter::ItemFilter;
use super::freshness::FreshnessWindows;
use super::personas::Persona;
use super::github::GithubSender;
use super::sender::{ConsoleSender, Sender, SmtpSender};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub from: String,
    pub to: Vec<String>,
    pub host: String,
    pub password: String,
    pub port: u16,
    pub subject: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    pub token: String,
    /// `owner/name` of the repository receiving the briefing files
    pub repo: String,
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    /// Also open a discussion issue for each briefing
    #[serde(default)]
    pub open_issue: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsApiConfig {
    pub api_key: String,
    pub query: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RssSourceConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub newsapi: Option<NewsApiConfig>,
    #[serde(default)]
    pub rss_sources: Vec<RssSourceConfig>,
    #[serde(default = "default_preferred_window_hours")]
    pub preferred_window_hours: i64,
    #[serde(default = "default_max_window_hours")]
    pub max_window_hours: i64,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_desired_cases")]
    pub desired_cases: usize,
    #[serde(default = "default_source_delay_secs")]
    pub source_delay_secs: u64,
    #[serde(default)]
    pub filters: Vec<ItemFilter>,
    #[serde(default)]
    pub blacklisted_domains: Vec<String>,
    #[serde(default)]
    pub personas: Vec<Persona>,
    pub llm: LlmConfig,
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
    #[serde(default)]
    pub github: Option<GithubConfig>,
}

fn default_path_prefix() -> String {
    String::from("briefings")
}

fn default_llm_base_url() -> String {
    String::from("https://api.openai.com/v1")
}

fn default_llm_timeout_secs() -> u64 {
    60
}

fn default_page_size() -> u32 {
    50
}

fn default_preferred_window_hours() -> i64 {
    24
}

fn default_max_window_hours() -> i64 {
    48
}

fn default_similarity_threshold() -> f64 {
    0.7
}

fn default_desired_cases() -> usize {
    5
}

fn default_source_delay_secs() -> u64 {
    1
}

impl AppConfig {
    pub fn from_file(file_name: &String) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(file_name)?;
        Self::from_str(&contents)
    }

    pub fn from_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: AppConfig = serde_json::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    /// Missing credentials for a configured channel are a startup-time
    /// fatal condition, not something to discover mid-run.
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.llm.api_key.is_empty() {
            return Err("llm.api_key must not be empty".into());
        }
        if let Some(smtp) = &self.smtp {
            if smtp.username.is_empty() || smtp.password.is_empty() || smtp.to.is_empty() {
                return Err("smtp requires username, password and at least one recipient".into());
            }
        }
        if let Some(github) = &self.github {
            if github.token.is_empty() || !github.repo.contains('/') {
                return Err("github requires a token and an owner/name repo".into());
            }
        }
        if let Some(newsapi) = &self.newsapi {
            if newsapi.api_key.is_empty() {
                return Err("newsapi.api_key must not be empty".into());
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn windows(&self) -> FreshnessWindows {
        FreshnessWindows {
            preferred_hours: self.preferred_window_hours,
            max_hours: self.max_window_hours,
        }
    }

    #[must_use]
    pub fn get_sender(&self) -> Sender {
        if let Some(config) = &self.smtp {
            Sender::Smtp(SmtpSender::new(config))
        } else if let Some(config) = &self.github {
            Sender::Github(GithubSender::new(config))
        } else {
            Sender::Console(ConsoleSender {})
        }
    }
}

#[cfg(test)]
mod test {
    use super::AppConfig;

    const MINIMAL: &str = r#"{
        "llm": {"api_key": "sk-test", "model": "gpt-4o-mini"}
    }"#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = AppConfig::from_str(MINIMAL).unwrap();
        assert_eq!(config.preferred_window_hours, 24);
        assert_eq!(config.max_window_hours, 48);
        assert!((config.similarity_threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.desired_cases, 5);
        assert_eq!(config.source_delay_secs, 1);
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.timeout_secs, 60);
        assert!(config.smtp.is_none());
        assert!(config.github.is_none());
        assert!(config.rss_sources.is_empty());
    }

    #[test]
    fn empty_llm_key_is_fatal() {
        let result = AppConfig::from_str(r#"{"llm": {"api_key": "", "model": "m"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn smtp_without_recipients_is_fatal() {
        let result = AppConfig::from_str(
            r#"{
                "llm": {"api_key": "sk-test", "model": "m"},
                "smtp": {
                    "from": "bot@example.com", "to": [], "host": "smtp.example.com",
                    "password": "pw", "port": 587, "subject": "Daily Briefing",
                    "username": "bot"
                }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn github_repo_must_be_owner_name() {
        let result = AppConfig::from_str(
            r#"{
                "llm": {"api_key": "sk-test", "model": "m"},
                "github": {"token": "ghp_x", "repo": "just-a-name"}
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn full_config_parses() {
        let config = AppConfig::from_str(
            r#"{
                "newsapi": {"api_key": "key", "query": "true crime OR cold case"},
                "rss_sources": [
                    {"name": "AP Oddities", "url": "https://example.com/oddities.rss"}
                ],
                "max_window_hours": 72,
                "filters": [{"title": "Focus", "value": "cold case,arrest"}],
                "blacklisted_domains": ["tabloid.example.com"],
                "personas": [{"name": "M. Rivera", "style": "spare and procedural"}],
                "llm": {"api_key": "sk-test", "model": "gpt-4o-mini"},
                "github": {"token": "ghp_x", "repo": "acme/briefings", "open_issue": true}
            }"#,
        )
        .unwrap();
        assert_eq!(config.windows().max_hours, 72);
        assert_eq!(config.newsapi.unwrap().page_size, 50);
        assert_eq!(config.github.unwrap().path_prefix, "briefings");
        assert_eq!(config.personas.len(), 1);
    }
}
