// Advice service
// Asks a hosted language model to review a day's schedule. Never fails:
// every problem degrades to a fixed message.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::settings::{AdviceSettings, Settings};
use crate::models::shift::{DayShift, Position};
use crate::models::staff::Roster;
use crate::models::timeline::Timeline;
use crate::utils::date::date_key;

pub const MISSING_KEY_MESSAGE: &str =
    "API Key is missing. Please check your environment configuration.";
pub const UNAVAILABLE_MESSAGE: &str = "AI Service is currently unavailable.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "No advice generated.";

const NO_SHIFTS_LINE: &str = "No shifts assigned yet.";

/// Sends one prompt and returns the generated text.
#[cfg_attr(test, mockall::automock)]
pub trait AdviceTransport {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// `generateContent` client for the Gemini REST API.
pub struct GeminiTransport {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiTransport {
    pub fn new(settings: &AdviceSettings, api_key: impl Into<String>) -> Result<Self> {
        if !settings.endpoint.starts_with("https://") {
            return Err(anyhow!("Advice endpoint must use HTTPS"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build advice HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: api_key.into(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl AdviceTransport for GeminiTransport {
    fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .context("Network error during advice request")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Advice request failed with HTTP status {}", status));
        }

        let parsed: GenerateResponse = response
            .json()
            .context("Advice response is not valid JSON")?;
        Ok(parsed.text())
    }
}

enum Backend<T> {
    Ready(T),
    MissingKey,
    Unavailable,
}

/// Front door for advice requests.
pub struct AdviceService<T> {
    backend: Backend<T>,
    operating_hours: Timeline,
}

impl<T: AdviceTransport> AdviceService<T> {
    pub fn new(transport: T, operating_hours: Timeline) -> Self {
        Self {
            backend: Backend::Ready(transport),
            operating_hours,
        }
    }

    /// A service with no credential; every request answers with
    /// [`MISSING_KEY_MESSAGE`].
    pub fn without_credentials(operating_hours: Timeline) -> Self {
        Self {
            backend: Backend::MissingKey,
            operating_hours,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Advice text for one day's schedule. Always returns displayable text.
    pub fn request_advice(&self, date: NaiveDate, shifts: &[DayShift], roster: &Roster) -> String {
        let transport = match &self.backend {
            Backend::Ready(transport) => transport,
            Backend::MissingKey => return MISSING_KEY_MESSAGE.to_string(),
            Backend::Unavailable => return UNAVAILABLE_MESSAGE.to_string(),
        };

        let prompt = build_prompt(date, shifts, roster, self.operating_hours);
        match transport.generate(&prompt) {
            Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_MESSAGE.to_string(),
            Ok(text) => text,
            Err(e) => {
                log::warn!("Advice request for {} failed: {:#}", date_key(date), e);
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }
}

impl AdviceService<GeminiTransport> {
    /// Build from settings, reading the key from the configured environment
    /// variable.
    pub fn from_settings(settings: &Settings) -> Self {
        let operating_hours = settings.timeline().unwrap_or_default();
        let advice = &settings.advice;

        let api_key = match std::env::var(&advice.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                log::info!("{} is not set; advice is disabled", advice.api_key_env);
                return Self::without_credentials(operating_hours);
            }
        };

        match GeminiTransport::new(advice, api_key) {
            Ok(transport) => Self::new(transport, operating_hours),
            Err(e) => {
                log::warn!("Advice transport unavailable: {:#}", e);
                Self {
                    backend: Backend::Unavailable,
                    operating_hours,
                }
            }
        }
    }
}

/// Prompt text for one day's schedule.
pub fn build_prompt(
    date: NaiveDate,
    shifts: &[DayShift],
    roster: &Roster,
    operating_hours: Timeline,
) -> String {
    let assignments = shifts
        .iter()
        .map(|shift| {
            let staff_id = &shift.row_key.staff_id;
            let name = roster
                .get(staff_id)
                .map(|staff| staff.name.as_str())
                .unwrap_or(staff_id.0.as_str());
            format!("{} : {} ({})", shift.span(), name, shift.row_key.position.label())
        })
        .collect::<Vec<_>>();
    let assignments = if assignments.is_empty() {
        NO_SHIFTS_LINE.to_string()
    } else {
        assignments.join("\n")
    };

    let positions = Position::ALL
        .iter()
        .map(|position| format!("- {} ({})", position.label(), position.description()))
        .collect::<Vec<_>>()
        .join("\n");

    let (open_h, open_m) = operating_hours.open().hour_minute();
    let (close_h, close_m) = operating_hours.close().hour_minute();

    format!(
        "You are an expert store manager assistant for a Bento/Food shop.\n\
         Analyze the following shift schedule for {date}.\n\n\
         Positions available:\n{positions}\n\n\
         Operating Hours: {open_h:02}:{open_m:02} to {close_h:02}:{close_m:02}.\n\n\
         Current Assignments:\n{assignments}\n\n\
         Please provide a brief, bulleted list of advice.\n\
         Focus on:\n\
         1. Coverage gaps (e.g., is the kitchen covered during peak hours?).\n\
         2. Staff workload balance between the {count} distinct positions.\n\
         3. Suggestions for improvement.\n\n\
         Keep it concise and professional (Japanese).\n",
        date = date_key(date),
        count = Position::ALL.len(),
    )
}

/// Loading flag for the advice button: one request at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdviceGate {
    loading: bool,
}

impl AdviceGate {
    /// Mark a request as outstanding. False if one already is.
    pub fn try_begin(&mut self) -> bool {
        if self.loading {
            log::debug!("Advice request already in flight");
            return false;
        }
        self.loading = true;
        true
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
