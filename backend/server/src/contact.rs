//! # Contact form
//!
//! ## Request
//! JSON or form-encoded body with `full_name`, `email`, `phone`, `subject`, `message`.
//! JSON numbers and booleans are taken as their text, other shapes are malformed.
//!
//! ## Response
//! Always `{ "success": bool, "message": string }`.
//!
//! | Case | Status |
//! |---|---|
//! | Sent | 200 |
//! | Name, email or message missing | 400 |
//! | Email malformed | 400 |
//! | Mail not delivered | 500 |
use std::path::PathBuf;

use catalog::render::fragments::escape_html;
use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{
    error::AppError,
    mailer::{MailError, OutgoingMail, mailbox},
    utils::{header_safe, is_valid_email, sanitize_input},
};

pub const SITE_NAME: &str = "The Banner Company";
pub const THANKS: &str = "Thanks! We’ll get back to you shortly.";

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "scalar_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    pub success: bool,
    pub message: String,
}

impl ContactReply {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: THANKS.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enquiry {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactForm {
    pub fn validate(self) -> Result<Enquiry, AppError> {
        let (Some(full_name), Some(email), Some(message)) = (
            sanitize_input(self.full_name),
            sanitize_input(self.email),
            sanitize_input(self.message),
        ) else {
            return Err(AppError::MissingFields);
        };

        if !is_valid_email(&email) {
            return Err(AppError::InvalidEmail);
        }

        Ok(Enquiry {
            full_name,
            email,
            phone: sanitize_input(self.phone),
            subject: sanitize_input(self.subject),
            message,
        })
    }
}

impl Enquiry {
    pub fn to_mail(&self, from_email: &str, to_email: &str) -> Result<OutgoingMail, MailError> {
        let name = header_safe(&self.full_name);

        let subject = match &self.subject {
            Some(subject) => format!("[{}] New enquiry from {name}", header_safe(subject)),
            None => format!("New enquiry from {name}"),
        };

        let message = escape_html(&self.message).replace("\r\n", "\n").replace('\n', "<br>");

        let html = format!(
            "<h2>New Contact Form Submission</h2>\n\
             <p><b>Name:</b> {}</p>\n\
             <p><b>Email:</b> {}</p>\n\
             <p><b>Phone:</b> {}</p>\n\
             <p><b>Subject:</b> {}</p>\n\
             <p><b>Message:</b><br>{message}</p>\n",
            escape_html(&self.full_name),
            escape_html(&self.email),
            self.phone.as_deref().map_or_else(|| "-".to_string(), escape_html),
            self.subject.as_deref().map_or_else(|| "-".to_string(), escape_html),
        );

        Ok(OutgoingMail {
            from: mailbox(Some(SITE_NAME), from_email)?,
            to: mailbox(None, to_email)?,
            reply_to: mailbox(Some(name.as_str()), &self.email)?,
            subject,
            html,
        })
    }

    pub fn log_line(&self, at: DateTime<Local>) -> String {
        format!(
            "{} - {} ({}) - {}\n",
            at.format("%Y-%m-%d %H:%M:%S"),
            header_safe(&self.full_name),
            self.email,
            self.subject.as_deref().map_or_else(|| "-".to_string(), header_safe),
        )
    }
}

/// Append-only record of delivered enquiries.
#[derive(Debug, Clone)]
pub struct SubmissionLog {
    path: PathBuf,
}

impl SubmissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn record(&self, enquiry: &Enquiry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(enquiry.log_line(Local::now()).as_bytes()).await
    }
}
