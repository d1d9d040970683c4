use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use web_sys::{KeyboardEvent, MouseEvent};

use super::markdown::render_markdown;
use crate::backend::ModelClient;
use crate::store::{BoardStore, WorkflowStep};

fn start_plan(store: RwSignal<BoardStore>, client: ModelClient, request: String) {
	let prompt = match store.try_update(|board| board.begin_plan(&request)) {
		Some(Ok(prompt)) => prompt,
		Some(Err(err)) => {
			warn!("plan not requested: {err}");
			return;
		}
		None => return,
	};
	spawn_local(async move {
		let result = client.generate(&prompt).await;
		store.update(|board| {
			if let Err(err) = board.finish_plan(result) {
				debug!("plan reply not applied: {err}");
			}
		});
	});
}

fn start_design(store: RwSignal<BoardStore>, client: ModelClient) {
	let prompt = match store.try_update(|board| board.begin_design()) {
		Some(Ok(prompt)) => prompt,
		Some(Err(err)) => {
			warn!("design not requested: {err}");
			return;
		}
		None => return,
	};
	spawn_local(async move {
		let result = client.generate(&prompt).await;
		store.update(|board| {
			if let Err(err) = board.finish_design(result) {
				debug!("design reply not applied: {err}");
			}
		});
	});
}

fn cancel(store: RwSignal<BoardStore>) {
	store.update(|board| {
		if let Err(err) = board.reset() {
			warn!("cannot cancel: {err}");
		}
	});
}

fn submit(store: RwSignal<BoardStore>, client: &ModelClient, input: RwSignal<String>) {
	let request = input.get_untracked();
	if request.trim().is_empty() {
		return;
	}
	match store.with_untracked(|board| board.workflow().step()) {
		WorkflowStep::Review => start_design(store, client.clone()),
		_ => start_plan(store, client.clone(), request),
	}
	input.set(String::new());
}

/// Chat panel driving the plan → review → design workflow.
#[component]
pub fn Sidebar() -> impl IntoView {
	let store = expect_context::<RwSignal<BoardStore>>();
	let client = expect_context::<ModelClient>();
	let input = RwSignal::new(String::new());

	let step = move || store.with(|board| board.workflow().step());
	let generating = move || store.with(|board| board.workflow().is_generating());
	let plan = move || store.with(|board| board.workflow().plan().to_owned());
	let plan_html = move || store.with(|board| render_markdown(board.workflow().plan()));
	let error = move || store.with(|board| board.workflow().last_error().map(str::to_owned));

	let composer = move || {
		if step() == WorkflowStep::Review {
			let client = client.clone();
			view! {
				<div class="review-actions">
					<button
						class="cancel"
						disabled=generating
						on:click=move |_: MouseEvent| cancel(store)
					>
						"Cancel"
					</button>
					<button
						class="confirm"
						disabled=generating
						on:click=move |_: MouseEvent| start_design(store, client.clone())
					>
						{move || if generating() { "Generating..." } else { "Confirm Plan" }}
					</button>
				</div>
			}
				.into_any()
		} else {
			let (on_enter, on_send) = (client.clone(), client.clone());
			view! {
				<div class="composer-input">
					<textarea
						prop:value=move || input.get()
						on:input=move |ev| input.set(event_target_value(&ev))
						on:keydown=move |ev: KeyboardEvent| {
							if ev.key() == "Enter" && !ev.shift_key() {
								ev.prevent_default();
								submit(store, &on_enter, input);
							}
						}
						disabled=generating
						placeholder="Describe your device..."
					></textarea>
					<button
						class="send"
						disabled=move || generating() || input.with(|text| text.trim().is_empty())
						on:click=move |_: MouseEvent| submit(store, &on_send, input)
					>
						{move || if generating() { "..." } else { "Send" }}
					</button>
				</div>
			}
				.into_any()
		}
	};

	view! {
		<aside class="sidebar">
			<div class="header">
				<h2>"BoardGPT"</h2>
			</div>

			<div class="chat-stream">
				{move || {
					(step() == WorkflowStep::Idle && !generating() && plan().is_empty())
						.then(|| {
							view! {
								<div class="empty-state">
									<p>"What are we building today?"</p>
									<p class="hint">
										"Describe your PCB requirements (e.g. \"Smart Weather Station with ESP32\")"
									</p>
								</div>
							}
						})
				}}

				{move || {
					error()
						.map(|message| {
							view! {
								<div class="error-banner">
									<strong>"Error: "</strong>
									{message}
								</div>
							}
						})
				}}

				{move || {
					(generating() || !plan().is_empty())
						.then(|| {
							view! {
								<div class="message-card">
									<div class="phase">
										{move || format!("GENERATION PHASE: {}", step().as_str().to_uppercase())}
									</div>
									<div class="plan" inner_html=plan_html></div>
									{move || generating().then(|| view! { <div class="processing">"Processing..."</div> })}
								</div>
							}
						})
				}}

				{move || {
					(step() == WorkflowStep::Complete)
						.then(|| {
							view! {
								<div class="message-card success">
									<p>"Design generated successfully!"</p>
									<p class="hint">"Check the visualization panel on the right."</p>
								</div>
							}
						})
				}}
			</div>

			<div class="composer">{composer}</div>
		</aside>
	}
}
