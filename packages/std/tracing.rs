use tracing_subscriber::{
	filter::Targets, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Log to stderr if `var_name` holds a target filter, such as `node_std=debug,link_bin_outputs=trace`.
pub fn setup(var_name: &str) {
	let Some(targets) = parse_targets(std::env::var(var_name).ok().as_deref()) else {
		return;
	};
	let format_layer = tracing_subscriber::fmt::layer()
		.without_time()
		.with_ansi(false)
		.with_writer(std::io::stderr);
	tracing_subscriber::registry()
		.with(targets)
		.with(format_layer)
		.try_init()
		.ok();
}

fn parse_targets(filter: Option<&str>) -> Option<Targets> {
	let filter = filter?.trim();
	if filter.is_empty() {
		return None;
	}
	filter.parse().ok()
}

#[cfg(test)]
mod tests {
	use super::parse_targets;
	use ::tracing::Level;

	#[test]
	fn targets() {
		let targets = parse_targets(Some("node_std=debug")).unwrap();
		assert!(targets.would_enable("node_std::manifest", &Level::DEBUG));
		assert!(!targets.would_enable("node_std::manifest", &Level::TRACE));
		assert!(!targets.would_enable("link_bin_outputs", &Level::ERROR));
	}

	#[test]
	fn unset_or_blank() {
		assert!(parse_targets(None).is_none());
		assert!(parse_targets(Some("  ")).is_none());
	}
}
