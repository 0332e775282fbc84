//! SMTP transport configuration.

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM_EMAIL` is not set.
const DEFAULT_FROM_EMAIL: &str = "noreply@ez2hire.com";

/// Default sender display name when `SMTP_FROM_NAME` is not set.
const DEFAULT_FROM_NAME: &str = "Ez2Hire Platform";

/// Configuration for the SMTP email transport, read once at service
/// construction.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port (defaults to 587).
    pub port: u16,
    /// Optional SMTP username.
    pub username: Option<String>,
    /// Optional SMTP password.
    pub password: Option<String>,
    /// Whether to negotiate STARTTLS (on by default).
    pub use_tls: bool,
    /// RFC 5322 "From" address.
    pub from_email: String,
    /// Sender display name.
    pub from_name: String,
}

impl SmtpConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable          | Required | Default               |
    /// |-------------------|----------|-----------------------|
    /// | `SMTP_HOST`       | no       | `smtp.gmail.com`      |
    /// | `SMTP_PORT`       | no       | `587`                 |
    /// | `SMTP_USERNAME`   | no       | —                     |
    /// | `SMTP_PASSWORD`   | no       | —                     |
    /// | `SMTP_USE_TLS`    | no       | `true`                |
    /// | `SMTP_FROM_EMAIL` | no       | `noreply@ez2hire.com` |
    /// | `SMTP_FROM_NAME`  | no       | `Ez2Hire Platform`    |
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            username: std::env::var("SMTP_USERNAME").ok().filter(|v| !v.is_empty()),
            password: std::env::var("SMTP_PASSWORD").ok().filter(|v| !v.is_empty()),
            use_tls: std::env::var("SMTP_USE_TLS")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            from_email: std::env::var("SMTP_FROM_EMAIL")
                .unwrap_or_else(|_| DEFAULT_FROM_EMAIL.to_string()),
            from_name: std::env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| DEFAULT_FROM_NAME.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        for var in [
            "SMTP_HOST",
            "SMTP_PORT",
            "SMTP_USERNAME",
            "SMTP_PASSWORD",
            "SMTP_USE_TLS",
            "SMTP_FROM_EMAIL",
            "SMTP_FROM_NAME",
        ] {
            std::env::remove_var(var);
        }
        let config = SmtpConfig::from_env();
        assert_eq!(config.host, "smtp.gmail.com");
        assert_eq!(config.port, DEFAULT_SMTP_PORT);
        assert!(config.use_tls, "TLS must be on by default");
        assert!(config.username.is_none());
        assert_eq!(config.from_email, DEFAULT_FROM_EMAIL);
    }
}
