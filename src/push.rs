//! Queued push-notification delivery.
//!
//! The HTTP request that marks a notification as sent returns immediately;
//! delivery happens on a spawned task. Each attempt runs under a timeout
//! and is retried a fixed number of times. Exhausted sends are logged and
//! never retried again, since the originating request has long completed.

use crate::app_config;
use crate::db::get_db_pool;
use crate::orm::notifications;
use async_trait::async_trait;
use sea_orm::EntityTrait;
use serde::Serialize;
use std::time::Duration;

/// Delivery errors from the provider seam.
#[derive(Debug)]
pub enum PushError {
    /// Provider rejected or could not be reached
    Gateway(String),
    /// Attempt exceeded the configured timeout
    Timeout,
}

impl std::fmt::Display for PushError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushError::Gateway(msg) => write!(f, "Gateway error: {}", msg),
            PushError::Timeout => write!(f, "Delivery attempt timed out"),
        }
    }
}

impl std::error::Error for PushError {}

/// Payload handed to the delivery provider.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// Recipient topics/device groups
    pub recipients: Vec<String>,
}

/// Seam for the external delivery provider.
#[async_trait]
pub trait PushProvider: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError>;
}

/// HTTP gateway provider. Posts the message as JSON to the configured
/// endpoint with the API key as a bearer credential.
pub struct HttpGateway {
    client: reqwest::Client,
    gateway_url: String,
    api_key: String,
}

impl HttpGateway {
    pub fn from_config() -> Self {
        let push = app_config::push();
        Self {
            client: reqwest::Client::new(),
            gateway_url: push.gateway_url,
            api_key: push.api_key,
        }
    }
}

#[async_trait]
impl PushProvider for HttpGateway {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        let response = self
            .client
            .post(&self.gateway_url)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| PushError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PushError::Gateway(format!(
                "Provider returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Run the attempt/retry loop for one message against a provider.
/// Returns the number of attempts used on success.
pub async fn deliver_with_retries(
    provider: &dyn PushProvider,
    message: &PushMessage,
    max_attempts: u32,
    attempt_timeout: Duration,
) -> Result<u32, PushError> {
    let mut last_error = PushError::Gateway("No attempts made".to_string());

    for attempt in 1..=max_attempts.max(1) {
        match tokio::time::timeout(attempt_timeout, provider.send(message)).await {
            Ok(Ok(())) => return Ok(attempt),
            Ok(Err(e)) => {
                log::warn!("Push attempt {}/{} failed: {}", attempt, max_attempts, e);
                last_error = e;
            }
            Err(_) => {
                log::warn!("Push attempt {}/{} timed out", attempt, max_attempts);
                last_error = PushError::Timeout;
            }
        }
    }

    Err(last_error)
}

fn message_for(notification: &notifications::Model) -> PushMessage {
    let recipients = notification
        .recipients
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|r| r.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    PushMessage {
        title: notification.title.clone(),
        body: notification.message.clone(),
        recipients,
    }
}

/// Queue delivery of a notification. Fire-and-forget relative to the
/// triggering request.
pub fn queue_push(notification_id: i32) {
    let push = app_config::push();
    if !push.enabled {
        log::info!(
            "Push delivery disabled, dropping send for notification #{}",
            notification_id
        );
        return;
    }

    actix_web::rt::spawn(async move {
        let notification = match notifications::Entity::find_by_id(notification_id)
            .one(get_db_pool())
            .await
        {
            Ok(Some(notification)) => notification,
            Ok(None) => {
                log::warn!(
                    "Notification #{} vanished before push dispatch",
                    notification_id
                );
                return;
            }
            Err(e) => {
                log::error!(
                    "Failed to load notification #{} for push dispatch: {}",
                    notification_id,
                    e
                );
                return;
            }
        };

        let provider = HttpGateway::from_config();
        let message = message_for(&notification);
        match deliver_with_retries(
            &provider,
            &message,
            push.max_attempts,
            Duration::from_secs(push.attempt_timeout_seconds),
        )
        .await
        {
            Ok(attempts) => {
                log::info!(
                    "Notification #{} delivered to gateway after {} attempt(s)",
                    notification_id,
                    attempts
                );
            }
            Err(e) => {
                log::error!(
                    "Notification #{} failed after {} attempt(s), giving up: {}",
                    notification_id,
                    push.max_attempts,
                    e
                );
            }
        }
    });
}
