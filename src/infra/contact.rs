//! Contact form relay backed by a hosted form-submission service.

use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use reqwest::{Client, multipart::Form};
use serde::Deserialize;
use tracing::{error, info, warn};
use url::Url;

use crate::{config::ContactSettings, infra::error::InfraError};

const SOURCE: &str = "folio::contact";
const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

pub const SENT_NOTICE: &str = "Message sent successfully! I'll get back to you soon.";
pub const GENERIC_FAILURE_NOTICE: &str = "Something went wrong. Please try again.";
pub const NETWORK_FAILURE_NOTICE: &str =
    "Network error. Please check your connection and try again.";
pub const DISABLED_NOTICE: &str =
    "The contact form is currently unavailable. Please reach out through the links on this page.";
pub const INCOMPLETE_NOTICE: &str = "Please fill in your name, email and message.";

/// Fields posted by the contact form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    Rejected(Option<String>),
    NetworkError,
    Incomplete,
    Disabled,
}

impl ContactOutcome {
    /// Text shown to the visitor above the form.
    pub fn notice(&self) -> &str {
        match self {
            Self::Sent => SENT_NOTICE,
            Self::Rejected(Some(message)) => message,
            Self::Rejected(None) => GENERIC_FAILURE_NOTICE,
            Self::NetworkError => NETWORK_FAILURE_NOTICE,
            Self::Incomplete => INCOMPLETE_NOTICE,
            Self::Disabled => DISABLED_NOTICE,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Rejected(_) => "rejected",
            Self::NetworkError => "network_error",
            Self::Incomplete => "incomplete",
            Self::Disabled => "disabled",
        }
    }
}

#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn submit(&self, message: &ContactMessage) -> ContactOutcome;
}

#[derive(Debug, Deserialize)]
struct RelayReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Forwards submissions as multipart form posts carrying the configured access key.
#[derive(Clone)]
pub struct FormRelay {
    http: Client,
    endpoint: Url,
    access_key: Option<String>,
}

impl FormRelay {
    pub fn new(settings: &ContactSettings) -> Result<Self, InfraError> {
        let http = Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
            .map_err(|err| InfraError::http_client("contact relay", err))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            access_key: settings.access_key.clone(),
        })
    }

    async fn forward(&self, access_key: &str, message: &ContactMessage) -> ContactOutcome {
        let form = Form::new()
            .text("access_key", access_key.to_string())
            .text("name", message.name.trim().to_string())
            .text("email", message.email.trim().to_string())
            .text("message", message.message.trim().to_string());

        let response = match self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(target = SOURCE, error = %err, "contact relay unreachable");
                return ContactOutcome::NetworkError;
            }
        };

        let status = response.status();
        match response.json::<RelayReply>().await {
            Ok(reply) if reply.success => ContactOutcome::Sent,
            Ok(reply) => {
                warn!(
                    target = SOURCE,
                    status = status.as_u16(),
                    message = reply.message.as_deref().unwrap_or_default(),
                    "contact relay rejected submission"
                );
                ContactOutcome::Rejected(reply.message.filter(|text| !text.is_empty()))
            }
            Err(err) => {
                warn!(
                    target = SOURCE,
                    status = status.as_u16(),
                    error = %err,
                    "contact relay returned an unreadable reply"
                );
                ContactOutcome::Rejected(None)
            }
        }
    }
}

#[async_trait]
impl ContactRelay for FormRelay {
    async fn submit(&self, message: &ContactMessage) -> ContactOutcome {
        let outcome = match self.access_key.as_deref() {
            None => ContactOutcome::Disabled,
            Some(_) if !message.is_complete() => ContactOutcome::Incomplete,
            Some(key) => self.forward(key, message).await,
        };

        counter!("folio_contact_submissions_total", "outcome" => outcome.label()).increment(1);
        info!(target = SOURCE, outcome = outcome.label(), "contact form handled");
        outcome
    }
}
