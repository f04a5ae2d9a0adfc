use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;
use tracing::info;

use super::config::GithubConfig;
use super::sender::DeliverBriefing;

/// Publishes the briefing as a dated markdown file in a repository, with an
/// optional discussion issue pointing at it.
pub struct GithubSender {
    config: GithubConfig,
    api_base_url: String,
}

impl GithubSender {
    #[must_use]
    pub fn new(config: &GithubConfig) -> Self {
        const API_BASE_URL: &str = "https://api.github.com";
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

    fn client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().user_agent("casewire").build()
    }

    fn briefing_path(&self) -> String {
        let date = chrono::Utc::now().date_naive();
        format!("{}/briefing-{date}.md", self.config.path_prefix)
    }

    /// Look up the current blob sha of the target path, if the file exists.
    /// Updating an existing file requires it.
    async fn existing_sha(
        &self,
        client: &reqwest::Client,
        path: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let response = client
            .get(format!(
                "{}/repos/{}/contents/{path}",
                self.api_base_url, self.config.repo
            ))
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: serde_json::Value = response.json().await?;
        Ok(body
            .get("sha")
            .and_then(serde_json::Value::as_str)
            .map(std::string::ToString::to_string))
    }

    async fn put_file(
        &self,
        client: &reqwest::Client,
        path: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut payload = json!({
            "message": subject,
            "content": BASE64.encode(body),
        });
        if let Some(sha) = self.existing_sha(client, path).await? {
            payload["sha"] = json!(sha);
        }

        client
            .put(format!(
                "{}/repos/{}/contents/{path}",
                self.api_base_url, self.config.repo
            ))
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn open_issue(
        &self,
        client: &reqwest::Client,
        subject: &str,
        path: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        client
            .post(format!(
                "{}/repos/{}/issues",
                self.api_base_url, self.config.repo
            ))
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .json(&json!({
                "title": subject,
                "body": format!("Today's briefing: [{path}]({path})"),
            }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

impl DeliverBriefing for GithubSender {
    async fn deliver(
        &self,
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let client = self.client()?;
        let path = self.briefing_path();

        self.put_file(&client, &path, subject, body).await?;
        info!(repo = %self.config.repo, path = %path, "briefing committed");

        if self.config.open_issue {
            self.open_issue(&client, subject, &path).await?;
        }

        Ok(())
    }
}
