//! Deterministic grid placement.
//!
//! Positions depend only on a node's index and the node count, so running the
//! layout twice on the same list gives the same board.

use super::types::Component;

pub const SPACING_X: f64 = 250.0;
pub const SPACING_Y: f64 = 180.0;
pub const MIN_COLUMNS: usize = 2;
pub const MAX_COLUMNS: usize = 4;

/// `ceil(sqrt(1.5 n))`, kept within `MIN_COLUMNS..=MAX_COLUMNS`.
pub fn column_count(node_count: usize) -> usize {
	let ideal = (node_count as f64 * 1.5).sqrt().ceil() as usize;
	ideal.clamp(MIN_COLUMNS, MAX_COLUMNS)
}

pub fn grid_position(index: usize, columns: usize) -> (f64, f64) {
	let (col, row) = (index % columns, index / columns);
	(col as f64 * SPACING_X, row as f64 * SPACING_Y)
}

/// Moves every node onto the grid. Returns `false` when there was nothing to place.
pub fn auto_layout(nodes: &mut [Component]) -> bool {
	if nodes.is_empty() {
		return false;
	}
	let columns = column_count(nodes.len());
	for (index, node) in nodes.iter_mut().enumerate() {
		(node.x, node.y) = grid_position(index, columns);
	}
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn column_count_is_clamped() {
		assert_eq!(column_count(1), 2);
		assert_eq!(column_count(2), 2);
		assert_eq!(column_count(4), 3);
		assert_eq!(column_count(6), 3);
		assert_eq!(column_count(7), 4);
		assert_eq!(column_count(11), 4);
		assert_eq!(column_count(50), 4);
	}

	#[test]
	fn places_nodes_row_major() {
		let mut nodes: Vec<_> = (0..5)
			.map(|i| Component::new(format!("N{i}"), "unknown", -1.0, -1.0))
			.collect();
		assert!(auto_layout(&mut nodes));
		let positions: Vec<_> = nodes.iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(
			positions,
			[
				(0.0, 0.0),
				(250.0, 0.0),
				(500.0, 0.0),
				(0.0, 180.0),
				(250.0, 180.0),
			]
		);
		assert_eq!(nodes[4].id, "N4");
	}

	#[test]
	fn empty_list_is_untouched() {
		assert!(!auto_layout(&mut []));
	}
}
