//! SMTP delivery via the `lettre` async transport.
//!
//! [`Mailer::deliver`] makes exactly one delivery attempt per call: no
//! retries, no queuing. Callers own failure policy.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (connection, authentication, timeout).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Sends multipart (plain + HTML) emails over SMTP.
pub struct Mailer {
    config: SmtpConfig,
}

impl Mailer {
    /// Create a new mailer with the given transport configuration.
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Deliver one email. Transport errors are returned, never retried.
    pub async fn deliver(
        &self,
        to_email: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), MailError> {
        let from_address: Address = self.config.from_email.parse()?;
        let to_address: Address = to_email.parse()?;

        let email = Message::builder()
            .from(Mailbox::new(
                Some(self.config.from_name.clone()),
                from_address,
            ))
            .to(Mailbox::new(None, to_address))
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text_body.to_string(),
                html_body.to_string(),
            ))
            .map_err(|e| MailError::Build(e.to_string()))?;

        let mut builder = if self.config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.host)
        };
        builder = builder.port(self.config.port);

        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let transport = builder.build();
        transport.send(email).await?;

        tracing::info!(to = to_email, subject, "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mail_error_display_build() {
        let err = MailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn mail_error_display_address() {
        let addr_err: Result<Address, _> = "not-an-email".parse();
        let err = MailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
