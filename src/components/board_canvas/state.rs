use crate::store::BoardStore;

/// Board-space size of a drawn component; `(x, y)` is its top-left corner.
pub const NODE_WIDTH: f64 = 60.0;
pub const NODE_HEIGHT: f64 = 40.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pointer interaction and canvas size. Board content lives in [`BoardStore`].
#[derive(Clone, Debug)]
pub struct CanvasState {
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
}

impl Default for CanvasState {
	fn default() -> Self {
		Self {
			drag: DragState::default(),
			pan: PanState::default(),
			width: 800.0,
			height: 600.0,
		}
	}
}

impl CanvasState {
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn is_active(&self) -> bool {
		self.drag.node_id.is_some() || self.pan.active
	}

	pub fn is_dragging(&self, id: &str) -> bool {
		self.drag.node_id.as_deref() == Some(id)
	}

	/// Grabs the node under the pointer, or starts panning the board.
	pub fn pointer_down(&mut self, store: &BoardStore, sx: f64, sy: f64) {
		match node_at_position(store, sx, sy).and_then(|id| store.node(&id)) {
			Some(node) => {
				self.drag = DragState {
					node_id: Some(node.id.clone()),
					start_x: sx,
					start_y: sy,
					node_start_x: node.x,
					node_start_y: node.y,
				};
			}
			None => {
				let view = store.view();
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: view.x,
					transform_start_y: view.y,
				};
			}
		}
	}

	pub fn pointer_move(&self, store: &mut BoardStore, sx: f64, sy: f64) {
		let k = store.view().k;
		if let Some(id) = &self.drag.node_id {
			let (dx, dy) = ((sx - self.drag.start_x) / k, (sy - self.drag.start_y) / k);
			store.update_node_pos(id, self.drag.node_start_x + dx, self.drag.node_start_y + dy);
		} else if self.pan.active {
			store.view_mut().pan_to(
				self.pan.transform_start_x + (sx - self.pan.start_x),
				self.pan.transform_start_y + (sy - self.pan.start_y),
			);
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}
}

/// Id of the topmost node under a screen point.
pub fn node_at_position(store: &BoardStore, sx: f64, sy: f64) -> Option<String> {
	let (bx, by) = store.view().screen_to_board(sx, sy);
	store
		.nodes()
		.iter()
		.rev()
		.find(|node| {
			(node.x..=node.x + NODE_WIDTH).contains(&bx)
				&& (node.y..=node.y + NODE_HEIGHT).contains(&by)
		})
		.map(|node| node.id.clone())
}
