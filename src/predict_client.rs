use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::http_client::http_client;

pub const PREDICT_PATH: &str = "/predict";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn toggle(self) -> Self {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Venue::Home => "Home",
            Venue::Away => "Away",
        }
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub team: String,
    pub opponent: String,
    pub venue: Venue,
    pub time: String,
    pub day: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    High,
    Medium,
    Low,
}

impl Category {
    /// Anything other than `high`/`medium` falls into the red bucket.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "high" => Category::High,
            "medium" => Category::Medium,
            _ => Category::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::High => "high",
            Category::Medium => "medium",
            Category::Low => "low",
        }
    }

    pub fn interpretation(self, team: &str) -> String {
        match self {
            Category::High => format!("Strong chance of {team} winning"),
            Category::Medium => "Match could go either way".to_string(),
            Category::Low => format!("Lower chance of {team} winning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Win probability in percent, 0..=100.
    pub probability: f64,
    pub category: Category,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResponse {
    Success(Prediction),
    Failure { error: String },
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    success: bool,
    #[serde(default)]
    probability: Option<f64>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub fn parse_prediction_response_json(raw: &str) -> Result<PredictionResponse> {
    let wire: WireResponse =
        serde_json::from_str(raw.trim()).context("invalid prediction json")?;
    if !wire.success {
        return Ok(PredictionResponse::Failure {
            error: wire.error.unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    let probability = wire
        .probability
        .context("prediction response missing probability")?;
    let category = wire
        .category
        .as_deref()
        .map(Category::from_wire)
        .context("prediction response missing category")?;
    let message = wire
        .message
        .context("prediction response missing message")?;

    Ok(PredictionResponse::Success(Prediction {
        probability: probability.clamp(0.0, 100.0),
        category,
        message,
    }))
}

/// Anything that can answer a prediction request.
pub trait PredictionBackend: Send + 'static {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse>;
}

pub struct HttpBackend {
    client: Client,
    url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = http_client(timeout)?.clone();
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: predict_url(base_url),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PredictionBackend for HttpBackend {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        // `.json` declares `Content-Type: application/json`.
        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;

        // The backend reports failures in-band, so parse before judging the status.
        match parse_prediction_response_json(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => {
                Err(anyhow::anyhow!("http {}: {}", status, body.trim()))
            }
            Err(err) => Err(err),
        }
    }
}

pub fn predict_url(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    if base.ends_with(PREDICT_PATH) {
        return base.to_string();
    }
    format!("{base}{PREDICT_PATH}")
}
