//! Turns raw component records into validated [`Component`]s.
//!
//! Every record gets a lowercase type, an id that is unique ignoring case,
//! numeric coordinates and a list of connections that name a target. Unknown
//! fields ride along untouched in [`Component::extra`] and [`Connection::extra`].

use std::collections::HashSet;

use log::{debug, warn};
use serde_json::{Map, Value};

use super::error::NormalizeError;
use super::types::{Component, Connection};

/// Type given to records that name none.
pub const UNKNOWN_KIND: &str = "unknown";

/// Records without coordinates are spread over a grid this many columns wide.
pub const DEFAULT_COLUMNS: usize = 3;
pub const DEFAULT_COLUMN_STEP: f64 = 100.0;
pub const DEFAULT_ROW_STEP: f64 = 80.0;

/// Ids handed out so far, compared case-insensitively.
#[derive(Debug, Default)]
pub struct IdRegistry {
	seen: HashSet<String>,
}

impl IdRegistry {
	pub fn contains(&self, id: &str) -> bool {
		self.seen.contains(&id.to_lowercase())
	}

	/// Reserves `candidate`, or the first free `candidate_N` for N >= 2.
	pub fn claim(&mut self, candidate: &str) -> String {
		let mut id = candidate.to_owned();
		let mut suffix = 2;
		while self.contains(&id) {
			id = format!("{candidate}_{suffix}");
			suffix += 1;
		}
		if id != candidate {
			debug!("component id {candidate:?} collides, renamed to {id:?}");
		}
		self.seen.insert(id.to_lowercase());
		id
	}
}

pub fn normalize(records: Vec<Value>) -> Result<Vec<Component>, NormalizeError> {
	let mut ids = IdRegistry::default();
	records
		.into_iter()
		.enumerate()
		.map(|(index, record)| normalize_record(index, record, &mut ids))
		.collect()
}

/// Like [`normalize`], but a bad record yields an empty design instead of an error.
pub fn normalize_lenient(records: Vec<Value>) -> Vec<Component> {
	normalize(records).unwrap_or_else(|err| {
		warn!("discarding design: {err}");
		Vec::new()
	})
}

/// Coordinates for a record at `index` that did not supply its own.
pub fn default_position(index: usize) -> (f64, f64) {
	(
		(index % DEFAULT_COLUMNS) as f64 * DEFAULT_COLUMN_STEP,
		(index / DEFAULT_COLUMNS) as f64 * DEFAULT_ROW_STEP,
	)
}

fn normalize_record(
	index: usize,
	record: Value,
	ids: &mut IdRegistry,
) -> Result<Component, NormalizeError> {
	let Value::Object(mut fields) = record else {
		return Err(NormalizeError::InvalidRecord { index });
	};

	let kind = take_kind(&mut fields);
	let candidate = take_id(&mut fields).unwrap_or_else(|| synthesized_id(&kind, index));
	let id = ids.claim(&candidate);

	let (default_x, default_y) = default_position(index);
	let x = take_number(&mut fields, "x").unwrap_or(default_x);
	let y = take_number(&mut fields, "y").unwrap_or(default_y);

	let connections = match fields.remove("connections") {
		Some(Value::Array(entries)) => entries
			.into_iter()
			.filter_map(|entry| match parse_connection(entry) {
				Ok(connection) => Some(connection),
				Err(rejected) => {
					debug!("{id}: dropping malformed connection {rejected}");
					None
				}
			})
			.collect(),
		_ => Vec::new(),
	};

	Ok(Component {
		id,
		kind,
		x,
		y,
		connections,
		extra: fields,
	})
}

// `component_type` wins over `type`; both are consumed.
fn take_kind(fields: &mut Map<String, Value>) -> String {
	let component_type = fields.remove("component_type");
	let kind = fields.remove("type");
	[component_type, kind]
		.into_iter()
		.flatten()
		.find_map(|value| match value {
			Value::String(s) if !s.is_empty() => Some(s.to_lowercase()),
			_ => None,
		})
		.unwrap_or_else(|| UNKNOWN_KIND.to_owned())
}

fn take_id(fields: &mut Map<String, Value>) -> Option<String> {
	match fields.remove("id")? {
		Value::String(s) if !s.is_empty() => Some(s),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

fn take_number(fields: &mut Map<String, Value>, key: &str) -> Option<f64> {
	fields.remove(key)?.as_f64()
}

fn synthesized_id(kind: &str, index: usize) -> String {
	let initial: String = kind.chars().next().into_iter().flat_map(char::to_uppercase).collect();
	format!("{initial}{}", index + 1)
}

// Only `target` is required; every other key of the entry is kept.
fn parse_connection(entry: Value) -> Result<Connection, Value> {
	let mut fields = match entry {
		Value::Object(fields) => fields,
		other => return Err(other),
	};
	let target = match fields.remove("target") {
		Some(Value::String(s)) => s,
		Some(Value::Number(n)) => n.to_string(),
		other => {
			if let Some(value) = other {
				fields.insert("target".to_owned(), value);
			}
			return Err(Value::Object(fields));
		}
	};
	let kind = match fields.remove("type") {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(s)) => s,
		Some(other) => other.to_string(),
	};
	Ok(Connection {
		target,
		kind,
		extra: fields,
	})
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn records(value: Value) -> Vec<Value> {
		match value {
			Value::Array(items) => items,
			_ => panic!("test input must be an array"),
		}
	}

	#[test]
	fn keeps_unique_ids_verbatim() {
		let nodes = normalize(records(json!([
			{"id": "MCU", "type": "ESP32", "x": 10, "y": 20},
			{"id": "bme", "type": "sensor", "x": 300.5, "y": 20},
		])))
		.unwrap();
		assert_eq!(nodes[0].id, "MCU");
		assert_eq!(nodes[0].kind, "esp32");
		assert_eq!((nodes[0].x, nodes[0].y), (10.0, 20.0));
		assert_eq!(nodes[1].id, "bme");
		assert_eq!(nodes[1].x, 300.5);
	}

	#[test]
	fn renames_case_insensitive_collisions() {
		let nodes = normalize(records(json!([
			{"id": "U1"},
			{"id": "u1"},
			{"id": "U1"},
			{"id": "u1_2"},
		])))
		.unwrap();
		let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["U1", "u1_2", "U1_3", "u1_2_2"]);
	}

	#[test]
	fn synthesizes_ids_from_type_and_position() {
		let nodes = normalize(records(json!([
			{},
			{"component_type": "Sensor", "type": "ignored"},
			{"id": "", "type": "led"},
		])))
		.unwrap();
		assert_eq!(nodes[0].id, "U1");
		assert_eq!(nodes[0].kind, UNKNOWN_KIND);
		assert_eq!(nodes[1].id, "S2");
		assert_eq!(nodes[1].kind, "sensor");
		assert_eq!(nodes[2].id, "L3");
	}

	#[test]
	fn synthesized_id_can_collide_with_supplied_one() {
		let nodes = normalize(records(json!([
			{"id": "s2"},
			{"type": "sensor"},
		])))
		.unwrap();
		assert_eq!(nodes[1].id, "S2_2");
	}

	#[test]
	fn missing_or_non_numeric_coordinates_default_by_index() {
		let input: Vec<Value> = (0..7).map(|_| json!({"x": "left"})).collect();
		let nodes = normalize(input).unwrap();
		let positions: Vec<_> = nodes.iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(
			positions,
			[
				(0.0, 0.0),
				(100.0, 0.0),
				(200.0, 0.0),
				(0.0, 80.0),
				(100.0, 80.0),
				(200.0, 80.0),
				(0.0, 160.0),
			]
		);
	}

	#[test]
	fn connections_default_to_empty_and_drop_malformed_entries() {
		let nodes = normalize(records(json!([
			{"id": "A", "connections": "B"},
			{"id": "B", "connections": [
				{"target": "A", "type": "I2C"},
				{"target": 7},
				{"type": "power"},
				"A",
			]},
		])))
		.unwrap();
		assert!(nodes[0].connections.is_empty());
		assert_eq!(
			nodes[1].connections,
			[Connection::new("A", "I2C"), Connection::new("7", "")]
		);
	}

	#[test]
	fn preserves_unknown_fields() {
		let nodes = normalize(records(json!([
			{"id": "C1", "type": "capacitor", "value": "10uF", "package": {"size": "0805"}},
		])))
		.unwrap();
		assert_eq!(nodes[0].extra.get("value"), Some(&json!("10uF")));
		assert_eq!(nodes[0].extra.get("package"), Some(&json!({"size": "0805"})));
		assert!(!nodes[0].extra.contains_key("type"));
	}

	#[test]
	fn connection_entries_keep_extra_keys_and_scalar_labels() {
		let nodes = normalize(records(json!([
			{"id": "A", "connections": [
				{"target": "B", "type": "I2C", "pins": [21, 22]},
				{"target": "B", "type": 5},
				{"target": "B", "type": true, "type_hint": null},
			]},
		])))
		.unwrap();
		let connections = &nodes[0].connections;
		assert_eq!(connections[0].kind, "I2C");
		assert_eq!(connections[0].extra.get("pins"), Some(&json!([21, 22])));
		assert_eq!(connections[1].kind, "5");
		assert!(connections[1].extra.is_empty());
		assert_eq!(connections[2].kind, "true");
		assert_eq!(connections[2].extra.get("type_hint"), Some(&Value::Null));

		let serialized = serde_json::to_value(&nodes[0]).unwrap();
		assert_eq!(
			serialized["connections"][0],
			json!({"target": "B", "type": "I2C", "pins": [21, 22]})
		);
	}

	#[test]
	fn non_object_record_fails_and_lenient_path_degrades_to_empty() {
		let input = records(json!([{"id": "A"}, null]));
		assert!(matches!(
			normalize(input.clone()),
			Err(NormalizeError::InvalidRecord { index: 1 })
		));
		assert!(normalize_lenient(input).is_empty());
		assert!(normalize_lenient(Vec::new()).is_empty());
	}
}
