use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A link a component declares towards another component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
	pub target: String,
	#[serde(rename = "type", default)]
	pub kind: String,
	/// Keys of the entry other than `target` and `type`, such as pin lists.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Connection {
	pub fn new(target: impl Into<String>, kind: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			kind: kind.into(),
			extra: Map::new(),
		}
	}
}

/// One PCB part on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
	pub id: String,
	/// Lowercase category such as `esp32` or `sensor`.
	#[serde(rename = "type")]
	pub kind: String,
	pub x: f64,
	pub y: f64,
	#[serde(default)]
	pub connections: Vec<Connection>,
	/// Fields of the model's record that the pipeline does not interpret.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Component {
	pub fn new(id: impl Into<String>, kind: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			kind: kind.into(),
			x,
			y,
			connections: Vec::new(),
			extra: Map::new(),
		}
	}

	pub fn with_connection(mut self, target: impl Into<String>, kind: impl Into<String>) -> Self {
		self.connections.push(Connection::new(target, kind));
		self
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	pub from: String,
	pub to: String,
	pub label: String,
}

/// A complete board: the components and the edges flattened out of them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Design {
	pub components: Vec<Component>,
	pub connections: Vec<Edge>,
}
