//! Optional email delivery of rendered kits over SMTP via lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};

use crate::error::DeliveryError;

/// Default sender when `EMAIL_FROM` is unset.
pub const DEFAULT_FROM: &str = "no-reply@brandkit.local";

/// Port that selects implicit TLS instead of STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

// ── Configuration ───────────────────────────────────────────────────

/// SMTP delivery configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
    pub to_address: String,
}

impl MailConfig {
    fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(Credentials::new(user.clone(), pass.clone())),
            _ => None,
        }
    }
}

// ── Envelope ────────────────────────────────────────────────────────

/// Everything the mail collaborator needs to send one kit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailEnvelope {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Subject line for a kit email.
pub fn kit_subject(display_name: &str) -> String {
    format!("Brand Kit - {display_name}")
}

// ── Mailer ──────────────────────────────────────────────────────────

/// Delivers a finished HTML document.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sender address used for outgoing mail.
    fn from_address(&self) -> &str;

    /// Recipient address used for outgoing mail.
    fn to_address(&self) -> &str;

    async fn send(&self, envelope: &MailEnvelope) -> Result<(), DeliveryError>;
}

/// lettre-backed SMTP mailer.
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn build_message(envelope: &MailEnvelope) -> Result<Message, DeliveryError> {
        Message::builder()
            .from(envelope.from.parse().map_err(|e| DeliveryError::InvalidAddress {
                field: "from",
                reason: format!("{e}"),
            })?)
            .to(envelope.to.parse().map_err(|e| DeliveryError::InvalidAddress {
                field: "to",
                reason: format!("{e}"),
            })?)
            .subject(envelope.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(envelope.html.clone())
            .map_err(|e| DeliveryError::Build(e.to_string()))
    }

    /// Implicit TLS on 465; anywhere else STARTTLS is used when the server
    /// offers it and plaintext otherwise, so local relays keep working.
    fn transport(config: &MailConfig) -> Result<SmtpTransport, DeliveryError> {
        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            SmtpTransport::relay(&config.smtp_host)
                .map_err(|e| DeliveryError::Transport(format!("SMTP relay error: {e}")))?
        } else {
            let tls = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| DeliveryError::Transport(format!("SMTP TLS setup error: {e}")))?;
            SmtpTransport::builder_dangerous(&config.smtp_host).tls(Tls::Opportunistic(tls))
        }
        .port(config.smtp_port);

        let builder = match config.credentials() {
            Some(creds) => builder.credentials(creds),
            None => builder,
        };
        Ok(builder.build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn from_address(&self) -> &str {
        &self.config.from_address
    }

    fn to_address(&self) -> &str {
        &self.config.to_address
    }

    async fn send(&self, envelope: &MailEnvelope) -> Result<(), DeliveryError> {
        let message = Self::build_message(envelope)?;
        let config = self.config.clone();

        // lettre's SmtpTransport blocks; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            let transport = Self::transport(&config)?;
            transport
                .send(&message)
                .map(|_| ())
                .map_err(|e| DeliveryError::Transport(e.to_string()))
        })
        .await
        .map_err(|e| DeliveryError::Transport(format!("SMTP task panicked: {e}")))??;

        tracing::info!(to = %envelope.to, subject = %envelope.subject, "Brand kit email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(port: u16, user: Option<&str>, pass: Option<&str>) -> MailConfig {
        MailConfig {
            smtp_host: "smtp.test.com".into(),
            smtp_port: port,
            username: user.map(String::from),
            password: pass.map(String::from),
            from_address: DEFAULT_FROM.into(),
            to_address: "owner@test.com".into(),
        }
    }

    fn envelope(from: &str, to: &str) -> MailEnvelope {
        MailEnvelope {
            from: from.into(),
            to: to.into(),
            subject: kit_subject("Acme"),
            html: "<p>kit</p>".into(),
        }
    }

    #[test]
    fn subject_includes_name() {
        assert_eq!(kit_subject("Acme Prints"), "Brand Kit - Acme Prints");
    }

    #[test]
    fn credentials_require_user_and_password() {
        assert!(config(587, Some("u"), Some("p")).credentials().is_some());
        assert!(config(587, Some("u"), None).credentials().is_none());
        assert!(config(587, None, Some("p")).credentials().is_none());
    }

    #[test]
    fn build_message_accepts_valid_addresses() {
        let message = SmtpMailer::build_message(&envelope(DEFAULT_FROM, "owner@test.com"));
        assert!(message.is_ok());
        let raw = String::from_utf8(message.unwrap().formatted()).unwrap();
        assert!(raw.contains("Subject: Brand Kit - Acme"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn build_message_rejects_bad_recipient() {
        let err = SmtpMailer::build_message(&envelope(DEFAULT_FROM, "not an address")).unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidAddress { field: "to", .. }));
    }

    #[test]
    fn transport_builds_for_both_tls_modes() {
        let _ = rustls::crypto::ring::default_provider().install_default();
        assert!(SmtpMailer::transport(&config(465, None, None)).is_ok());
        assert!(SmtpMailer::transport(&config(587, Some("u"), Some("p"))).is_ok());
    }

    #[test]
    fn transport_builds_for_plaintext_relay_ports() {
        let _ = rustls::crypto::ring::default_provider().install_default();
        let mut local = config(1025, None, None);
        local.smtp_host = "localhost".into();
        assert!(SmtpMailer::transport(&local).is_ok());
        assert!(SmtpMailer::transport(&config(25, None, None)).is_ok());
    }

    #[tokio::test]
    async fn plaintext_relay_delivers_without_starttls() {
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

        // Minimal SMTP server that never advertises STARTTLS.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();
            write.write_all(b"220 localhost ESMTP\r\n").await.unwrap();
            let mut in_data = false;
            let mut body = String::new();
            while let Some(line) = lines.next_line().await.unwrap() {
                if in_data {
                    if line == "." {
                        in_data = false;
                        write.write_all(b"250 queued\r\n").await.unwrap();
                    } else {
                        body.push_str(&line);
                        body.push('\n');
                    }
                    continue;
                }
                let command = line.to_ascii_uppercase();
                let reply: &[u8] = if command.starts_with("EHLO") {
                    b"250 localhost\r\n"
                } else if command.starts_with("DATA") {
                    in_data = true;
                    b"354 go ahead\r\n"
                } else if command.starts_with("QUIT") {
                    write.write_all(b"221 bye\r\n").await.unwrap();
                    break;
                } else {
                    b"250 ok\r\n"
                };
                write.write_all(reply).await.unwrap();
            }
            body
        });

        let _ = rustls::crypto::ring::default_provider().install_default();
        let mut local = config(port, None, None);
        local.smtp_host = "127.0.0.1".into();
        let mailer = SmtpMailer::new(local);
        mailer
            .send(&envelope(DEFAULT_FROM, "owner@test.com"))
            .await
            .unwrap();

        let body = server.await.unwrap();
        assert!(body.contains("Subject: Brand Kit - Acme"));
    }

    #[test]
    fn mailer_exposes_addresses() {
        let mailer = SmtpMailer::new(config(587, None, None));
        assert_eq!(mailer.from_address(), DEFAULT_FROM);
        assert_eq!(mailer.to_address(), "owner@test.com");
    }
}
