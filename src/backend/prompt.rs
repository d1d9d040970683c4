/// Asks for a free-form markdown plan of the board.
pub fn plan_prompt(request: &str) -> String {
	format!("Plan PCB for: {request}. Markdown only.")
}

/// Asks for the structured component list, with the reviewed plan as context.
pub fn design_prompt(plan: &str) -> String {
	format!(
		"Create a PCB Design JSON. Output ONLY a valid JSON object with a \"components\" array. \
		 Each component must have: \"id\" (string), \"type\" (string), \"x\" (number), \"y\" (number), \
		 and \"connections\" array (objects with \"target\", \"type\"). Plan Context: {plan}"
	)
}
