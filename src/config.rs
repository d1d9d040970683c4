//! Backend endpoint and drawing constants.
//!
//! The app runs in the browser, so there is no process environment to read at
//! startup. `BOARD_MODEL_URL` and `BOARD_MODEL_NAME` are picked up at compile
//! time instead.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_URL: &str = "http://127.0.0.1:11434/api/generate";
pub const DEFAULT_MODEL: &str = "ministral-3:14b-cloud";

/// Board-space spacing of the background grid.
pub const GRID_SIZE: f64 = 20.0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
	/// Full URL of the generate endpoint.
	pub url: String,
	pub model: String,
}

impl Default for BackendConfig {
	fn default() -> Self {
		Self {
			url: DEFAULT_MODEL_URL.to_owned(),
			model: DEFAULT_MODEL.to_owned(),
		}
	}
}

impl BackendConfig {
	pub fn from_build_env() -> Self {
		Self::from_overrides(option_env!("BOARD_MODEL_URL"), option_env!("BOARD_MODEL_NAME"))
	}

	fn from_overrides(url: Option<&str>, model: Option<&str>) -> Self {
		let defaults = Self::default();
		Self {
			url: url.map_or(defaults.url, str::to_owned),
			model: model.map_or(defaults.model, str::to_owned),
		}
	}
}

/// Colours keyed by component family.
pub struct Palette;

impl Palette {
	pub const MCU: &'static str = "#0ea5e9";
	pub const SENSOR: &'static str = "#22c55e";
	pub const POWER: &'static str = "#ef4444";
	pub const TRACE: &'static str = "#06b6d4";
	pub const OTHER: &'static str = "#a1a1aa";

	const MCU_HINTS: &'static [&'static str] =
		&["mcu", "esp", "stm32", "atmega", "rp2040", "arduino", "nrf", "micro"];
	const SENSOR_HINTS: &'static [&'static str] =
		&["sensor", "bme", "bmp", "mpu", "dht", "imu", "gps", "temp"];
	const POWER_HINTS: &'static [&'static str] =
		&["power", "regulator", "ldo", "battery", "buck", "boost", "charger", "usb"];

	/// `kind` is expected lowercase, as produced by normalization.
	pub fn color_for(kind: &str) -> &'static str {
		let hit = |hints: &[&str]| hints.iter().any(|hint| kind.contains(*hint));
		if hit(Self::MCU_HINTS) {
			Self::MCU
		} else if hit(Self::SENSOR_HINTS) {
			Self::SENSOR
		} else if hit(Self::POWER_HINTS) {
			Self::POWER
		} else {
			Self::OTHER
		}
	}
}
