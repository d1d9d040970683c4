use pulldown_cmark::{Event, Options, Parser, html};

/// Renders model-written markdown to HTML for the plan card.
///
/// Raw HTML in the source is shown as text rather than injected.
pub fn render_markdown(source: &str) -> String {
	let options = Options::ENABLE_STRIKETHROUGH
		| Options::ENABLE_TABLES
		| Options::ENABLE_TASKLISTS
		| Options::ENABLE_GFM;
	let events = Parser::new_ext(source, options).map(|event| match event {
		Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
		other => other,
	});
	let mut out = String::with_capacity(source.len() * 3 / 2);
	html::push_html(&mut out, events);
	out
}
