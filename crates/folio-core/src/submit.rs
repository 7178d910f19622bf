use crate::form::{FormValues, display_name};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/Your-ID";

const REJECTED: &str = "Failed to send message. Please try again.";
const NETWORK: &str = "Network error. Please try again or use the Email Client button.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
}

impl ContactPayload {
    pub fn from_values(values: &FormValues) -> Self {
        Self {
            name: values.name.clone(),
            email: values.email.clone(),
            message: values.message.clone(),
            subject: format!("New message from {}", display_name(&values.name)),
            reply_to: values.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    /// Non-success response, with whatever messages the relay supplied.
    Rejected(Vec<String>),
    Network,
}

impl SubmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    pub fn message(&self) -> String {
        match self {
            Self::Delivered => crate::form::SENT.to_owned(),
            Self::Rejected(messages) if !messages.is_empty() => messages.join(" "),
            Self::Rejected(_) => REJECTED.to_owned(),
            Self::Network => NETWORK.to_owned(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct RelayError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    #[serde(default)]
    errors: Vec<RelayError>,
}

/// Extracts `errors[].message` from a relay response body. Anything
/// unparseable yields no messages.
pub fn rejection_messages(body: &str) -> Vec<String> {
    serde_json::from_str::<RelayErrorBody>(body)
        .map(|b| b.errors.into_iter().map(|e| e.message).collect())
        .unwrap_or_default()
}

/// Posts contact payloads to a form relay. Never retries.
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn submit(&self, payload: &ContactPayload) -> SubmitOutcome {
        match self.post(payload).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Contact submission to {} failed: {}", self.endpoint, e);
                SubmitOutcome::Network
            }
        }
    }

    async fn post(&self, payload: &ContactPayload) -> Result<SubmitOutcome, SubmitError> {
        let res = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(SubmitOutcome::Delivered);
        }

        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        log::warn!("Contact relay rejected submission with {}", status);
        Ok(SubmitOutcome::Rejected(rejection_messages(&body)))
    }
}
