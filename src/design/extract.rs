//! Pulls the JSON payload out of free-form model output.
//!
//! Models rarely answer with bare JSON even when told to. The payload may sit
//! inside a fenced code block, be preceded by a sentence of prose, or be a
//! single component object instead of a list. Candidates are tried in a fixed
//! order: the first fenced block, then the outermost bracketed span. Whatever
//! is found is parsed once; there is no partial recovery.

use serde_json::{Map, Value};

use super::error::ExtractError;

const FENCE: &str = "```";

/// The top-level shape of a parsed payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Extracted {
	/// The payload was the component list itself.
	Array(Vec<Value>),
	/// An object carrying a `components` array.
	ObjectWithComponents(Vec<Value>),
	/// A lone object, treated as a one-component design.
	SingleObject(Map<String, Value>),
}

impl Extracted {
	/// Raw component records in payload order.
	pub fn into_records(self) -> Vec<Value> {
		match self {
			Extracted::Array(records) | Extracted::ObjectWithComponents(records) => records,
			Extracted::SingleObject(object) => vec![Value::Object(object)],
		}
	}
}

pub fn extract(text: &str) -> Result<Extracted, ExtractError> {
	let candidate = fenced_block(text)
		.or_else(|| bracketed_span(text))
		.ok_or(ExtractError::NoJsonFound)?;
	let value: Value = serde_json::from_str(candidate)?;
	classify(value)
}

fn fenced_block(text: &str) -> Option<&str> {
	let open = text.find(FENCE)? + FENCE.len();
	let rest = &text[open..];
	let close = rest.find(FENCE)?;
	Some(strip_language_tag(&rest[..close]).trim())
}

// ```json, ```JSON or a bare info-string on its own line.
fn strip_language_tag(body: &str) -> &str {
	let tag_end = body
		.find(|c: char| !c.is_ascii_alphanumeric())
		.unwrap_or(body.len());
	let (tag, rest) = body.split_at(tag_end);
	let is_info_string =
		tag.starts_with(|c: char| c.is_ascii_alphabetic()) && rest.starts_with(['\n', '\r']);
	if tag.eq_ignore_ascii_case("json") || is_info_string {
		rest
	} else {
		body
	}
}

fn bracketed_span(text: &str) -> Option<&str> {
	let start = text.find(['{', '['])?;
	let close = if text.as_bytes()[start] == b'{' { '}' } else { ']' };
	let end = text.rfind(close)?;
	(end > start).then(|| &text[start..=end])
}

fn classify(value: Value) -> Result<Extracted, ExtractError> {
	match value {
		Value::Array(records) => Ok(Extracted::Array(records)),
		Value::Object(mut object) => match object.remove("components") {
			Some(Value::Array(records)) => Ok(Extracted::ObjectWithComponents(records)),
			Some(other) => {
				object.insert("components".to_owned(), other);
				Ok(Extracted::SingleObject(object))
			}
			None => Ok(Extracted::SingleObject(object)),
		},
		Value::Null => Err(ExtractError::UnexpectedShape("null")),
		Value::Bool(_) => Err(ExtractError::UnexpectedShape("boolean")),
		Value::Number(_) => Err(ExtractError::UnexpectedShape("number")),
		Value::String(_) => Err(ExtractError::UnexpectedShape("string")),
	}
}
