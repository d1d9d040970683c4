//! Model response → board graph.
//!
//! [`extract`] isolates the JSON payload, [`normalize`] validates the
//! component records, [`edges`] flattens their connections and [`layout`]
//! places them on a grid on demand. Nothing in here touches the browser.

pub mod edges;
pub mod error;
pub mod extract;
pub mod layout;
pub mod normalize;
mod types;

use log::{debug, info, warn};

pub use edges::{dangling_edges, synthesize_edges};
pub use error::{DesignError, ExtractError, NormalizeError};
pub use extract::{Extracted, extract};
pub use layout::auto_layout;
pub use normalize::{normalize, normalize_lenient};
pub use types::{Component, Connection, Design, Edge};

/// Parses a model response into components. Any failure yields an empty list.
pub fn parse_design(text: &str) -> Vec<Component> {
	match extract(text) {
		Ok(extracted) => normalize_lenient(extracted.into_records()),
		Err(err) => {
			warn!("no design in model response: {err}");
			Vec::new()
		}
	}
}

/// Parses a model response into a loadable [`Design`].
pub fn build_design(text: &str) -> Result<Design, DesignError> {
	let components = parse_design(text);
	if components.is_empty() {
		return Err(DesignError::EmptyDesign);
	}
	let connections = synthesize_edges(&components);
	let dangling = dangling_edges(&components, &connections).len();
	if dangling > 0 {
		debug!("{dangling} edge(s) point at unknown components");
	}
	info!(
		"parsed design with {} components and {} connections",
		components.len(),
		connections.len()
	);
	Ok(Design {
		components,
		connections,
	})
}
