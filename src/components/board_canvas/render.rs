use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, NODE_HEIGHT, NODE_WIDTH};
use crate::config::{GRID_SIZE, Palette};
use crate::store::BoardStore;

const BACKGROUND: &str = "#000000";
const NODE_FILL: &str = "#18181b";

/// Grid dots closer than this on screen are not drawn.
const MIN_GRID_PIXELS: f64 = 8.0;

pub fn render(store: &BoardStore, state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	if store.nodes().is_empty() {
		draw_placeholder(state, ctx);
		return;
	}

	let view = store.view();
	ctx.save();
	let _ = ctx.translate(view.x, view.y);
	let _ = ctx.scale(view.k, view.k);
	draw_grid(store, state, ctx);
	draw_edges(store, ctx);
	draw_nodes(store, state, ctx);
	ctx.restore();
}

fn draw_placeholder(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.12)");
	ctx.set_font("600 56px sans-serif");
	let _ = ctx.fill_text("Grid", cx, cy - 16.0);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
	ctx.set_font("14px sans-serif");
	let _ = ctx.fill_text("Waiting for design...", cx, cy + 28.0);
}

fn draw_grid(store: &BoardStore, state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let view = store.view();
	if GRID_SIZE * view.k < MIN_GRID_PIXELS {
		return;
	}
	let (left, top) = view.screen_to_board(0.0, 0.0);
	let (right, bottom) = view.screen_to_board(state.width, state.height);
	let radius = 1.0 / view.k;

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.08)");
	let mut y = (top / GRID_SIZE).floor() * GRID_SIZE;
	while y <= bottom {
		let mut x = (left / GRID_SIZE).floor() * GRID_SIZE;
		while x <= right {
			ctx.fill_rect(x - radius, y - radius, radius * 2.0, radius * 2.0);
			x += GRID_SIZE;
		}
		y += GRID_SIZE;
	}
}

fn center(x: f64, y: f64) -> (f64, f64) {
	(x + NODE_WIDTH / 2.0, y + NODE_HEIGHT / 2.0)
}

fn draw_edges(store: &BoardStore, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(Palette::TRACE);
	ctx.set_line_width(2.0);
	ctx.set_line_cap("round");
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(8.0),
		&JsValue::from_f64(4.0),
	));

	ctx.set_text_align("center");
	ctx.set_text_baseline("bottom");
	ctx.set_font("10px monospace");

	for edge in store.edges() {
		// Dangling references are skipped.
		let (Some(from), Some(to)) = (store.node(&edge.from), store.node(&edge.to)) else {
			continue;
		};
		let (x1, y1) = center(from.x, from.y);
		let (x2, y2) = center(to.x, to.y);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();

		if !edge.label.is_empty() {
			ctx.set_fill_style_str("rgba(165, 243, 252, 0.8)");
			let _ = ctx.fill_text(&edge.label, (x1 + x2) / 2.0, (y1 + y2) / 2.0 - 3.0);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(store: &BoardStore, state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for node in store.nodes() {
		let dragging = state.is_dragging(&node.id);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill_rect(node.x, node.y, NODE_WIDTH, NODE_HEIGHT);
		ctx.set_stroke_style_str(Palette::color_for(&node.kind));
		ctx.set_line_width(if dragging { 2.5 } else { 1.0 });
		ctx.stroke_rect(node.x, node.y, NODE_WIDTH, NODE_HEIGHT);

		let (cx, cy) = center(node.x, node.y);
		ctx.set_fill_style_str("white");
		ctx.set_font("12px monospace");
		let _ = ctx.fill_text(&node.id, cx, cy - 5.0);
		ctx.set_fill_style_str("rgba(161, 161, 170, 0.9)");
		ctx.set_font("8px monospace");
		let _ = ctx.fill_text(&node.kind, cx, cy + 9.0);
	}
}
