//! # Mail transport
//!
//! Contact enquiries leave the server through a [`Mailer`].
//!
//! - [`SmtpMailer`] delivers over SMTP with STARTTLS on the configured port
//! - [`LogMailer`] only logs it, used when no SMTP host is configured
use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    address::AddressError,
    message::{Mailbox, header::ContentType},
    transport::smtp::{self, authentication::Credentials},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SmtpSettings;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] AddressError),

    #[error("Message rejected: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP failed: {0}")]
    Transport(#[from] smtp::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub reply_to: Mailbox,
    pub subject: String,
    pub html: String,
}

impl OutgoingMail {
    pub fn to_message(&self) -> Result<Message, MailError> {
        Ok(Message::builder()
            .from(self.from.clone())
            .reply_to(self.reply_to.clone())
            .to(self.to.clone())
            .subject(self.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(self.html.clone())?)
    }
}

pub fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, MailError> {
    Ok(Mailbox::new(
        name.map(str::to_string),
        address.parse::<Address>()?,
    ))
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?.port(settings.port);

        if let Some(user) = &settings.user {
            if settings.pass.is_none() {
                warn!("SMTP_USER set without SMTP_PASS secret");
            }

            builder = builder.credentials(Credentials::new(
                user.clone(),
                settings.pass.clone().unwrap_or_default(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        self.transport.send(mail.to_message()?).await?;

        info!("Mailed enquiry to {}", mail.to.email);
        Ok(())
    }
}

pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        info!(
            to = %mail.to,
            reply_to = %mail.reply_to,
            subject = %mail.subject,
            "No SMTP host configured, enquiry logged only"
        );

        Ok(())
    }
}
