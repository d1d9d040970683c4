use thiserror::Error;

/// Why no JSON payload could be pulled out of a model response.
#[derive(Debug, Error)]
pub enum ExtractError {
	#[error("no JSON payload found in model response")]
	NoJsonFound,
	#[error("model response contains malformed JSON: {0}")]
	MalformedJson(#[from] serde_json::Error),
	#[error("expected a JSON array or object, found {0}")]
	UnexpectedShape(&'static str),
}

#[derive(Debug, Error)]
pub enum NormalizeError {
	#[error("component record {index} is not a JSON object")]
	InvalidRecord { index: usize },
}

#[derive(Debug, Error)]
pub enum DesignError {
	#[error("AI failed to generate valid components. Please try again.")]
	EmptyDesign,
}
