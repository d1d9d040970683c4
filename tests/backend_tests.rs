use std::net::SocketAddr;

use axum::{Json, Router, http::StatusCode, routing::post};
use board_graph_canvas::backend::{BackendError, ModelClient};
use board_graph_canvas::config::BackendConfig;
use board_graph_canvas::store::{BoardStore, GenerationError, WorkflowStep};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

const PLAN: &str = "## Weather station\n- ESP32 MCU\n- BME280 over I2C\n- LDO regulator";

const DESIGN_REPLY: &str = r#"Sure! Here is the design:
```json
{"components": [
	{"id": "U1", "type": "ESP32", "x": 0, "y": 0, "connections": [{"target": "S1", "type": "I2C"}]},
	{"id": "S1", "type": "sensor", "connections": []},
	{"id": "u1", "type": "LDO", "connections": [{"target": "U1", "type": "power"}]}
]}
```
Let me know if you want changes."#;

async fn spawn_backend(app: Router) -> (SocketAddr, JoinHandle<()>) {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
		.await
		.expect("listener should bind");
	let addr = listener.local_addr().expect("listener should have addr");
	let handle = tokio::spawn(async move {
		axum::serve(listener, app)
			.await
			.expect("mock backend should run");
	});
	(addr, handle)
}

fn config_for(addr: SocketAddr) -> BackendConfig {
	BackendConfig {
		url: format!("http://{addr}/api/generate"),
		model: "test-model".to_owned(),
	}
}

/// Answers plan prompts with markdown and anything else with a fenced design.
fn scripted_model() -> Router {
	Router::new().route(
		"/api/generate",
		post(|Json(body): Json<Value>| async move {
			assert_eq!(body["model"], "test-model");
			assert_eq!(body["stream"], false);
			let prompt = body["prompt"].as_str().unwrap_or_default();
			let response = if prompt.starts_with("Plan PCB for:") {
				PLAN
			} else {
				assert!(prompt.contains(PLAN), "design prompt should carry the plan");
				DESIGN_REPLY
			};
			Json(json!({"model": "test-model", "response": response, "done": true}))
		}),
	)
}

#[tokio::test]
async fn generate_returns_response_text() {
	let (addr, handle) = spawn_backend(scripted_model()).await;
	let client = ModelClient::new(config_for(addr));

	let text = client.generate("Plan PCB for: lamp. Markdown only.").await.unwrap();
	assert_eq!(text, PLAN);

	handle.abort();
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
	let app = Router::new().route(
		"/api/generate",
		post(|| async { (StatusCode::NOT_FOUND, "model \"test-model\" not found") }),
	);
	let (addr, handle) = spawn_backend(app).await;
	let client = ModelClient::new(config_for(addr));

	let err = client.generate("anything").await.unwrap_err();
	match &err {
		BackendError::Status { status, body } => {
			assert_eq!(*status, 404);
			assert_eq!(body, "model \"test-model\" not found");
		}
		other => panic!("expected status error, got {other:?}"),
	}
	assert_eq!(
		err.to_string(),
		"Model server error (404): model \"test-model\" not found"
	);

	handle.abort();
}

#[tokio::test]
async fn unreachable_backend_is_a_connection_error() {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
		.await
		.expect("listener should bind");
	let addr = listener.local_addr().expect("listener should have addr");
	drop(listener);

	let err = ModelClient::new(config_for(addr))
		.generate("anything")
		.await
		.unwrap_err();
	assert!(matches!(err, BackendError::Connection { .. }), "got {err:?}");
	assert!(err.to_string().contains("OLLAMA_ORIGINS"));
}

#[tokio::test]
async fn reply_without_response_field_is_a_decode_error() {
	let app = Router::new().route(
		"/api/generate",
		post(|| async { Json(json!({"error": "nope"})) }),
	);
	let (addr, handle) = spawn_backend(app).await;

	let err = ModelClient::new(config_for(addr))
		.generate("anything")
		.await
		.unwrap_err();
	assert!(matches!(err, BackendError::Decode(_)), "got {err:?}");

	handle.abort();
}

#[tokio::test]
async fn plan_then_design_loads_the_board() {
	let (addr, handle) = spawn_backend(scripted_model()).await;
	let client = ModelClient::new(config_for(addr));
	let mut store = BoardStore::default();

	let prompt = store.begin_plan("weather station").unwrap();
	let reply = client.generate(&prompt).await;
	store.finish_plan(reply).unwrap();
	assert_eq!(store.workflow().step(), WorkflowStep::Review);
	assert_eq!(store.workflow().plan(), PLAN);

	let prompt = store.begin_design().unwrap();
	let reply = client.generate(&prompt).await;
	store.finish_design(reply).unwrap();
	assert_eq!(store.workflow().step(), WorkflowStep::Complete);

	let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, ["U1", "S1", "u1_2"]);
	let s1 = store.node("S1").unwrap();
	assert_eq!((s1.x, s1.y), (100.0, 0.0));
	assert_eq!(store.edges().len(), 2);
	assert_eq!(store.edges()[1].from, "u1_2");
	assert_eq!(store.edges()[1].to, "U1");

	handle.abort();
}

#[tokio::test]
async fn failed_design_request_keeps_plan_and_graph() {
	let app = Router::new().route(
		"/api/generate",
		post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "out of memory") }),
	);
	let (addr, handle) = spawn_backend(app).await;
	let client = ModelClient::new(config_for(addr));

	let mut store = BoardStore::default();
	store.begin_plan("lamp").unwrap();
	store.finish_plan(Ok(PLAN.to_owned())).unwrap();
	let prompt = store.begin_design().unwrap();
	let err = store
		.finish_design(client.generate(&prompt).await)
		.unwrap_err();

	assert!(matches!(err, GenerationError::Backend(BackendError::Status { status: 500, .. })));
	assert_eq!(store.workflow().step(), WorkflowStep::Review);
	assert_eq!(store.workflow().plan(), PLAN);
	assert!(store.nodes().is_empty());
	assert_eq!(
		store.workflow().last_error(),
		Some("Model server error (500): out of memory")
	);

	handle.abort();
}
