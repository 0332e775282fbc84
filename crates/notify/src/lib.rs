//! Email notification delivery for the platform.
//!
//! Building blocks, leaf-first:
//!
//! - [`SmtpConfig`] — transport configuration from environment variables.
//! - [`Mailer`] — thin `lettre` SMTP wrapper; one attempt per call, no
//!   retries or queuing.
//! - [`TemplateStore`] — cached named (HTML, text) template pairs with a
//!   built-in default fallback.
//! - [`EmailGateway`] — the preference-gated, delivery-logged send path
//!   used by every workflow, including bulk sends with per-recipient
//!   isolation.

pub mod config;
pub mod gateway;
pub mod mailer;
pub mod template;

pub use config::SmtpConfig;
pub use gateway::{BulkRecipient, BulkSendReport, EmailGateway, SendOutcome};
pub use mailer::{MailError, Mailer};
pub use template::TemplateStore;
