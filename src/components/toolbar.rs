use leptos::prelude::*;
use log::{info, warn};
use web_sys::MouseEvent;

use crate::store::{BoardStore, ZOOM_IN_STEP, ZOOM_OUT_STEP};

fn save(store: RwSignal<BoardStore>) {
	match store.with_untracked(BoardStore::export_json) {
		Ok(json) => info!("design snapshot:\n{json}"),
		Err(err) => warn!("could not serialize design: {err}"),
	}
}

#[component]
pub fn Toolbar() -> impl IntoView {
	let store = expect_context::<RwSignal<BoardStore>>();

	view! {
		<div class="toolbar">
			<button title="Zoom in" on:click=move |_: MouseEvent| store.update(|board| board.zoom_by(ZOOM_IN_STEP))>
				"+"
			</button>
			<button title="Zoom out" on:click=move |_: MouseEvent| store.update(|board| board.zoom_by(ZOOM_OUT_STEP))>
				"-"
			</button>
			<div class="sep"></div>
			<button
				class="layout"
				title="Auto layout"
				on:click=move |_: MouseEvent| {
					store
						.update(|board| {
							board.auto_layout();
						})
				}
			>
				"Grid"
			</button>
			<button title="Save" on:click=move |_: MouseEvent| save(store)>
				"Save"
			</button>
		</div>
	}
}
