use std::fmt;

use log::{info, warn};

use crate::backend::{BackendError, design_prompt, plan_prompt};

use super::{GenerationError, StoreError};

/// Phase of the chat-driven design session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorkflowStep {
	#[default]
	Idle,
	Planning,
	Review,
	Designing,
	Complete,
}

impl WorkflowStep {
	pub fn as_str(self) -> &'static str {
		match self {
			WorkflowStep::Idle => "idle",
			WorkflowStep::Planning => "planning",
			WorkflowStep::Review => "review",
			WorkflowStep::Designing => "designing",
			WorkflowStep::Complete => "complete",
		}
	}
}

impl fmt::Display for WorkflowStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Transient session state: current step, the plan under review and the last
/// user-visible error. At most one model request is outstanding at a time.
#[derive(Clone, Debug, Default)]
pub struct Workflow {
	step: WorkflowStep,
	plan: String,
	generating: bool,
	last_error: Option<String>,
}

impl Workflow {
	pub fn step(&self) -> WorkflowStep {
		self.step
	}

	pub fn plan(&self) -> &str {
		&self.plan
	}

	pub fn is_generating(&self) -> bool {
		self.generating
	}

	pub fn last_error(&self) -> Option<&str> {
		self.last_error.as_deref()
	}

	/// Starts plan generation and returns the prompt to send.
	pub fn begin_plan(&mut self, request: &str) -> Result<String, StoreError> {
		self.ensure_idle_request()?;
		let request = request.trim();
		if request.is_empty() {
			return Err(StoreError::EmptyInput);
		}
		if !matches!(self.step, WorkflowStep::Idle | WorkflowStep::Complete) {
			return Err(StoreError::InvalidStep {
				step: self.step,
				action: "generate a plan",
			});
		}
		self.start(WorkflowStep::Planning);
		Ok(plan_prompt(request))
	}

	/// Settles the plan request. A reply nobody is waiting for is refused untouched.
	pub fn finish_plan(
		&mut self,
		result: Result<String, BackendError>,
	) -> Result<(), GenerationError> {
		self.ensure_pending(WorkflowStep::Planning, "accept a plan")?;
		self.generating = false;
		match result {
			Ok(plan) => {
				info!("plan received ({} bytes)", plan.len());
				self.plan = plan;
				self.step = WorkflowStep::Review;
				Ok(())
			}
			Err(err) => {
				self.fail(WorkflowStep::Idle, err.to_string());
				Err(err.into())
			}
		}
	}

	/// Starts design generation from the reviewed plan and returns the prompt to send.
	pub fn begin_design(&mut self) -> Result<String, StoreError> {
		self.ensure_idle_request()?;
		if self.step != WorkflowStep::Review {
			return Err(StoreError::InvalidStep {
				step: self.step,
				action: "generate a design",
			});
		}
		self.start(WorkflowStep::Designing);
		Ok(design_prompt(&self.plan))
	}

	pub(super) fn complete_design(&mut self) {
		self.generating = false;
		self.step = WorkflowStep::Complete;
	}

	/// Records a failed design attempt; the plan stays for another try.
	pub(super) fn fail_design(&mut self, message: String) {
		self.generating = false;
		self.fail(WorkflowStep::Review, message);
	}

	/// Back to `Idle` with no plan. Refused while a request is outstanding.
	pub fn reset(&mut self) -> Result<(), StoreError> {
		self.ensure_idle_request()?;
		self.step = WorkflowStep::Idle;
		self.plan.clear();
		self.last_error = None;
		Ok(())
	}

	fn ensure_idle_request(&self) -> Result<(), StoreError> {
		if self.generating {
			return Err(StoreError::Busy(self.step));
		}
		Ok(())
	}

	pub(super) fn ensure_pending(
		&self,
		step: WorkflowStep,
		action: &'static str,
	) -> Result<(), StoreError> {
		if !self.generating || self.step != step {
			return Err(StoreError::InvalidStep {
				step: self.step,
				action,
			});
		}
		Ok(())
	}

	fn start(&mut self, step: WorkflowStep) {
		self.generating = true;
		self.last_error = None;
		self.step = step;
	}

	fn fail(&mut self, fallback: WorkflowStep, message: String) {
		warn!("{} failed: {message}", self.step);
		self.step = fallback;
		self.last_error = Some(message);
	}
}
