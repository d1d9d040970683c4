//! The single source of truth every view reads from.
//!
//! [`BoardStore`] owns the node and edge lists, the pan/zoom transform and
//! the session workflow. All changes go through named operations so that a
//! design is only ever swapped in whole.

mod workflow;

use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;
use crate::design::{self, Component, Design, DesignError, Edge};

pub use workflow::{Workflow, WorkflowStep};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
pub const ZOOM_IN_STEP: f64 = 1.2;
pub const ZOOM_OUT_STEP: f64 = 0.8;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("a component with id {0:?} already exists")]
	DuplicateId(String),
	#[error("a request is already in flight ({0})")]
	Busy(WorkflowStep),
	#[error("cannot {action} while {step}")]
	InvalidStep {
		step: WorkflowStep,
		action: &'static str,
	},
	#[error("describe the board first")]
	EmptyInput,
}

/// Why a model reply was not applied.
#[derive(Debug, Error)]
pub enum GenerationError {
	#[error(transparent)]
	Backend(#[from] BackendError),
	#[error(transparent)]
	Design(#[from] DesignError),
	/// The reply arrived when no matching request was outstanding.
	#[error(transparent)]
	Store(#[from] StoreError),
}

/// Pan offset `(x, y)` in screen pixels and zoom factor `k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub const INITIAL: Self = Self::new(0.0, 0.0, 1.0);
	/// Applied whenever a new design is loaded.
	pub const LOADED: Self = Self::new(150.0, 150.0, 0.7);
	/// Applied after auto-layout.
	pub const LAID_OUT: Self = Self::new(150.0, 150.0, 0.75);

	pub const fn new(x: f64, y: f64, k: f64) -> Self {
		Self { x, y, k }
	}

	pub fn screen_to_board(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn zoom_by(&mut self, factor: f64) {
		self.k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
	}

	/// Zooms while keeping the board point under `(sx, sy)` in place.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		self.x = x;
		self.y = y;
	}
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::INITIAL
	}
}

#[derive(Serialize)]
struct DesignSnapshot<'a> {
	components: &'a [Component],
	connections: &'a [Edge],
}

#[derive(Clone, Debug, Default)]
pub struct BoardStore {
	nodes: Vec<Component>,
	edges: Vec<Edge>,
	view: ViewTransform,
	workflow: Workflow,
}

impl BoardStore {
	pub fn nodes(&self) -> &[Component] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&Component> {
		self.nodes.iter().find(|node| node.id == id)
	}

	pub fn view(&self) -> ViewTransform {
		self.view
	}

	pub fn view_mut(&mut self) -> &mut ViewTransform {
		&mut self.view
	}

	pub fn zoom_by(&mut self, factor: f64) {
		self.view.zoom_by(factor);
	}

	pub fn workflow(&self) -> &Workflow {
		&self.workflow
	}

	/// Replaces the whole graph and reframes the view.
	pub fn load_design(&mut self, design: Design) {
		info!(
			"loading design: {} components, {} connections",
			design.components.len(),
			design.connections.len()
		);
		self.nodes = design.components;
		self.edges = design.connections;
		self.view = ViewTransform::LOADED;
	}

	/// Adds one node. Ids stay unique ignoring case.
	pub fn add_node(&mut self, node: Component) -> Result<(), StoreError> {
		let lowered = node.id.to_lowercase();
		if self.nodes.iter().any(|n| n.id.to_lowercase() == lowered) {
			return Err(StoreError::DuplicateId(node.id));
		}
		self.nodes.push(node);
		Ok(())
	}

	/// Moves the node with exactly this id. Returns `false` if there is none.
	pub fn update_node_pos(&mut self, id: &str, x: f64, y: f64) -> bool {
		match self.nodes.iter_mut().find(|node| node.id == id) {
			Some(node) => {
				(node.x, node.y) = (x, y);
				true
			}
			None => false,
		}
	}

	/// Grid-places every node and reframes the view. No-op on an empty board.
	pub fn auto_layout(&mut self) -> bool {
		if !design::auto_layout(&mut self.nodes) {
			return false;
		}
		info!("auto-layout placed {} components", self.nodes.len());
		self.view = ViewTransform::LAID_OUT;
		true
	}

	pub fn begin_plan(&mut self, request: &str) -> Result<String, StoreError> {
		self.workflow.begin_plan(request)
	}

	pub fn finish_plan(
		&mut self,
		result: Result<String, BackendError>,
	) -> Result<(), GenerationError> {
		self.workflow.finish_plan(result)
	}

	pub fn begin_design(&mut self) -> Result<String, StoreError> {
		self.workflow.begin_design()
	}

	/// Loads the model's design response. On any failure the graph is left as it was.
	pub fn finish_design(
		&mut self,
		result: Result<String, BackendError>,
	) -> Result<(), GenerationError> {
		self.workflow.ensure_pending(WorkflowStep::Designing, "load a design")?;
		let outcome = result
			.map_err(GenerationError::from)
			.and_then(|text| design::build_design(&text).map_err(GenerationError::from));
		match outcome {
			Ok(design) => {
				self.load_design(design);
				self.workflow.complete_design();
				Ok(())
			}
			Err(err) => {
				self.workflow.fail_design(err.to_string());
				Err(err)
			}
		}
	}

	/// Clears the plan and step. The graph is kept.
	pub fn reset(&mut self) -> Result<(), StoreError> {
		self.workflow.reset()
	}

	pub fn export_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(&DesignSnapshot {
			components: &self.nodes,
			connections: &self.edges,
		})
	}
}
