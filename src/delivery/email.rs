use std::{fs, path::PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::blocking::Client;
use serde::Serialize;

use crate::{
    errors::{StatementError, StatementResult},
    http::{client, ensure_success},
    traits::ArtifactMailer,
};

pub const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";
pub const DEFAULT_SENDER: &str = "noreply@example.com";

const SERVICE: &str = "SendGrid";
const BODY_HTML: &str = "Please find attached your bank statements.";

/// Splits a comma-separated recipient list, trimming entries and dropping empty ones.
pub fn parse_recipients(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    mime_type: &'static str,
    value: &'static str,
}

#[derive(Debug, Serialize)]
struct Attachment {
    content: String,
    filename: String,
    #[serde(rename = "type")]
    mime_type: &'static str,
    disposition: &'static str,
}

#[derive(Debug, Serialize)]
struct SendGridMail<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content>,
    attachments: Vec<Attachment>,
}

pub struct SendGridMailer {
    http: Client,
    api_key: String,
    sender: String,
    recipients: Vec<String>,
}

impl SendGridMailer {
    pub fn new(
        api_key: impl Into<String>,
        sender: impl Into<String>,
        recipients: Vec<String>,
    ) -> StatementResult<Self> {
        if recipients.is_empty() {
            return Err(StatementError::MissingRecipients);
        }

        Ok(Self {
            http: client()?,
            api_key: api_key.into(),
            sender: sender.into(),
            recipients,
        })
    }

    fn payload<'a>(
        &'a self,
        subject: &'a str,
        attachments: &[PathBuf],
    ) -> StatementResult<SendGridMail<'a>> {
        let attachments = attachments
            .iter()
            .map(|path| -> StatementResult<Attachment> {
                Ok(Attachment {
                    content: STANDARD.encode(fs::read(path)?),
                    filename: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    mime_type: "application/octet-stream",
                    disposition: "attachment",
                })
            })
            .collect::<StatementResult<Vec<_>>>()?;

        Ok(SendGridMail {
            personalizations: vec![Personalization {
                to: self.recipients.iter().map(|email| Address { email: email.as_str() }).collect(),
            }],
            from: Address {
                email: self.sender.as_str(),
            },
            subject,
            content: vec![Content {
                mime_type: "text/html",
                value: BODY_HTML,
            }],
            attachments,
        })
    }
}

impl ArtifactMailer for SendGridMailer {
    fn send(&self, subject: &str, attachments: &[PathBuf]) -> StatementResult<()> {
        let payload = self.payload(subject, attachments)?;

        tracing::info!(
            recipients = %self.recipients.join(", "),
            attachments = attachments.len(),
            "sending email via SendGrid"
        );
        let response = self
            .http
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()?;
        ensure_success(SERVICE, response)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::tempdir;

    #[rstest]
    #[case("a@x.com", vec!["a@x.com"])]
    #[case("a@x.com, b@y.com", vec!["a@x.com", "b@y.com"])]
    #[case(" a@x.com ,,b@y.com, ", vec!["a@x.com", "b@y.com"])]
    #[case("", vec![])]
    #[case(" , ", vec![])]
    fn test_parse_recipients(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse_recipients(input), expected);
    }

    #[test]
    fn test_new_requires_recipients() {
        let result = SendGridMailer::new("key", DEFAULT_SENDER, vec![]);
        assert!(matches!(result, Err(StatementError::MissingRecipients)));
    }

    #[test]
    fn test_payload() {
        let dir = tempdir().unwrap();
        let ofx = dir.path().join("2024-03-01-2024-03-31.ofx");
        fs::write(&ofx, "OFX").unwrap();

        let mailer = SendGridMailer::new(
            "key",
            DEFAULT_SENDER,
            vec!["a@x.com".to_string(), "b@y.com".to_string()],
        )
        .unwrap();
        let payload = mailer.payload("Extrato 2024-03-01 - 2024-03-31", &[ofx]).unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "personalizations": [{"to": [{"email": "a@x.com"}, {"email": "b@y.com"}]}],
                "from": {"email": "noreply@example.com"},
                "subject": "Extrato 2024-03-01 - 2024-03-31",
                "content": [{"type": "text/html", "value": "Please find attached your bank statements."}],
                "attachments": [{
                    "content": "T0ZY",
                    "filename": "2024-03-01-2024-03-31.ofx",
                    "type": "application/octet-stream",
                    "disposition": "attachment"
                }]
            })
        );
    }

    #[test]
    fn test_payload_missing_attachment() {
        let dir = tempdir().unwrap();
        let mailer =
            SendGridMailer::new("key", DEFAULT_SENDER, vec!["a@x.com".to_string()]).unwrap();
        let result = mailer.payload("s", &[dir.path().join("missing.pdf")]);
        assert!(matches!(result, Err(StatementError::Io(_))));
    }
}
