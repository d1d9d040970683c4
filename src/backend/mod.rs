//! Client for an Ollama-style `/api/generate` endpoint.

mod prompt;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BackendConfig;

pub use prompt::{design_prompt, plan_prompt};

#[derive(Debug, Error)]
pub enum BackendError {
	#[error(
		"Model backend at {url} is unreachable. Please ensure Ollama is running and OLLAMA_ORIGINS='*' is set."
	)]
	Connection {
		url: String,
		#[source]
		source: reqwest::Error,
	},
	#[error("Model server error ({status}): {body}")]
	Status { status: u16, body: String },
	#[error("Model server returned an unreadable response: {0}")]
	Decode(#[source] reqwest::Error),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
	model: &'a str,
	prompt: &'a str,
	stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
	response: String,
}

#[derive(Clone, Debug)]
pub struct ModelClient {
	http: reqwest::Client,
	config: BackendConfig,
}

impl ModelClient {
	pub fn new(config: BackendConfig) -> Self {
		Self {
			http: reqwest::Client::new(),
			config,
		}
	}

	/// Sends one non-streaming generate request and returns the generated text.
	pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
		let request = GenerateRequest {
			model: &self.config.model,
			prompt,
			stream: false,
		};
		let response = self
			.http
			.post(&self.config.url)
			.json(&request)
			.send()
			.await
			.map_err(|source| BackendError::Connection {
				url: self.config.url.clone(),
				source,
			})?;

		let status = response.status();
		if !status.is_success() {
			let body = response
				.text()
				.await
				.unwrap_or_else(|_| "Unknown".to_owned());
			return Err(BackendError::Status {
				status: status.as_u16(),
				body,
			});
		}

		let payload: GenerateResponse = response.json().await.map_err(BackendError::Decode)?;
		debug!(
			"model {} returned {} bytes",
			self.config.model,
			payload.response.len()
		);
		Ok(payload.response)
	}
}
