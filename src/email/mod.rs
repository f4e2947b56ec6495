use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::{Config, SmtpConfig};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("smtp error: {0}")]
    Transport(String),
}

/// Event fields rendered into the confirmation email.
#[derive(Debug, Clone)]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
}

/// Outbound notification sender. Callers treat delivery as fire-and-forget;
/// a failure here is logged by the caller and never surfaced to the client.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_registration_confirmation(
        &self,
        to: &str,
        event: &EventDetails,
    ) -> Result<(), NotifyError>;
}

/// Real SMTP delivery via lettre.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|err| NotifyError::Transport(err.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_registration_confirmation(
        &self,
        to: &str,
        event: &EventDetails,
    ) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|err| NotifyError::Address(format!("from: {err}")))?,
            )
            .to(to
                .parse()
                .map_err(|err| NotifyError::Address(format!("to: {err}")))?)
            .subject("Event Registration Confirmation")
            .multipart(MultiPart::alternative_plain_html(
                plain_body(event),
                html_body(event),
            ))
            .map_err(|err| NotifyError::Message(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|err| NotifyError::Transport(err.to_string()))
    }
}

/// Fallback when SMTP is unconfigured: the notification is written to the
/// log instead of being delivered.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_registration_confirmation(
        &self,
        to: &str,
        event: &EventDetails,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            to = %to,
            title = %event.title,
            date = %event.date,
            time = %event.time,
            "registration confirmation (email delivery not configured)"
        );
        Ok(())
    }
}

pub fn notifier_from_config(config: &Config) -> Arc<dyn Notifier> {
    match &config.smtp {
        Some(smtp) => match SmtpNotifier::new(smtp) {
            Ok(notifier) => {
                tracing::info!(host = %smtp.host, "email: SMTP transport configured");
                Arc::new(notifier)
            }
            Err(err) => {
                tracing::warn!(error = %err, "email: SMTP setup failed, logging notifications instead");
                Arc::new(LogNotifier)
            }
        },
        None => {
            tracing::info!("email: SMTP not configured, notifications will be logged");
            Arc::new(LogNotifier)
        }
    }
}

fn plain_body(event: &EventDetails) -> String {
    let description = if event.description.is_empty() {
        "N/A"
    } else {
        &event.description
    };

    format!(
        "Event Registration Confirmed!\n\n\
         You have successfully registered for the following event:\n\n\
         Title: {}\n\
         Date: {}\n\
         Time: {}\n\
         Description: {}\n\n\
         We look forward to seeing you at the event!",
        event.title, event.date, event.time, description
    )
}

fn html_body(event: &EventDetails) -> String {
    let description = if event.description.is_empty() {
        "N/A"
    } else {
        &event.description
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Event Registration Confirmed!</h2>
  <p>You have successfully registered for the following event:</p>
  <div style="background-color: #f5f5f5; padding: 20px; border-radius: 5px;">
    <h3 style="margin-top: 0;">{}</h3>
    <p><strong>Date:</strong> {}</p>
    <p><strong>Time:</strong> {}</p>
    <p><strong>Description:</strong> {}</p>
  </div>
  <p>We look forward to seeing you at the event!</p>
</div>"#,
        event.title, event.date, event.time, description
    )
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Captures sends instead of delivering them.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<(String, EventDetails)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_registration_confirmation(
            &self,
            to: &str,
            event: &EventDetails,
        ) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), event.clone()));
            Ok(())
        }
    }

    /// Always fails, for asserting that delivery errors are swallowed.
    pub struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send_registration_confirmation(
            &self,
            _to: &str,
            _event: &EventDetails,
        ) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("connection refused".to_string()))
        }
    }
}
