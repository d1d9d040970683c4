use leptos::prelude::*;

use crate::backend::ModelClient;
use crate::components::{BoardCanvas, Sidebar, Toolbar};
use crate::config::BackendConfig;
use crate::store::BoardStore;

/// Chat sidebar beside the board view. Owns the [`BoardStore`] all views share
/// and the one [`ModelClient`] the sidebar sends requests through.
#[component]
pub fn Home() -> impl IntoView {
	provide_context(RwSignal::new(BoardStore::default()));
	provide_context(ModelClient::new(BackendConfig::from_build_env()));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="board-layout">
				<Sidebar />
				<div class="board-stage">
					<BoardCanvas />
					<Toolbar />
				</div>
			</main>
		</ErrorBoundary>
	}
}
