use lettre::message::SinglePart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use tracing::info;

use super::config::SmtpConfig;
use super::github::GithubSender;

pub enum Sender {
    Console(ConsoleSender),
    Smtp(SmtpSender),
    Github(GithubSender),
}

impl Sender {
    pub async fn deliver(
        &self,
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Sender::Console(sender) => sender.deliver(subject, body).await,
            Sender::Smtp(sender) => sender.deliver(subject, body).await,
            Sender::Github(sender) => sender.deliver(subject, body).await,
        }
    }
}

pub trait DeliverBriefing {
    async fn deliver(&self, subject: &str, body: &str)
        -> Result<(), Box<dyn std::error::Error>>;
}

pub struct ConsoleSender {}

pub struct SmtpSender {
    config: SmtpConfig,
}

impl SmtpSender {
    #[must_use]
    pub fn new(config: &SmtpConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl DeliverBriefing for ConsoleSender {
    async fn deliver(
        &self,
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        println!("{subject}\n\n{body}");
        Ok(())
    }
}

impl DeliverBriefing for SmtpSender {
    async fn deliver(
        &self,
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut builder = lettre::Message::builder()
            .from(self.config.from.parse()?)
            .subject(format!("{} {subject}", self.config.subject));
        for recipient in &self.config.to {
            builder = builder.to(recipient.parse()?);
        }
        // the receiving relay chokes on non-ASCII
        let email = builder.singlepart(SinglePart::plain(sanitize_ascii(body)))?;

        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());
        let mailer = SmtpTransport::relay(&self.config.host)?
            .port(self.config.port)
            .credentials(creds)
            .build();

        mailer.send(&email)?;
        info!(recipients = self.config.to.len(), "briefing email sent");

        Ok(())
    }
}

/// Map typographic punctuation onto ASCII and drop anything else outside the
/// ASCII range.
#[must_use]
pub fn sanitize_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{2032}' => out.push('\''),
            '\u{201c}' | '\u{201d}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2015}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00a0}' => out.push(' '),
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::sanitize_ascii;

    #[test]
    fn maps_typographic_punctuation() {
        assert_eq!(
            sanitize_ascii("\u{201c}It\u{2019}s over\u{201d} \u{2014} detective"),
            "\"It's over\" - detective"
        );
        assert_eq!(sanitize_ascii("wait\u{2026}"), "wait...");
    }

    #[test]
    fn drops_other_non_ascii() {
        assert_eq!(sanitize_ascii("caf\u{e9} r\u{e9}sum\u{e9}"), "caf rsum");
        assert_eq!(sanitize_ascii("plain ascii stays"), "plain ascii stays");
    }
}
