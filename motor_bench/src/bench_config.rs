use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::Write;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use power_distribution::{DEFAULT_IDLE_THRUST, MOTOR_COUNT};

#[derive(Serialize, Deserialize)]
pub struct BenchConfig {
	pub log_level_filter: String,
	pub formation: String,
	pub idle_thrust: u32,
	pub motor_channels: [u32; MOTOR_COUNT],
	pub tick_rate_hz: u64,
}

pub trait TryIntoLevelFilter {
	fn try_into_level_filter(&self) -> Result<LevelFilter, ()>;
}

impl TryIntoLevelFilter for String {
	fn try_into_level_filter(&self) -> Result<LevelFilter, ()> {
		Ok(match self.as_str() {
			"none" => LevelFilter::Off,
			"error" => LevelFilter::Error,
			"warn" => LevelFilter::Warn,
			"info" => LevelFilter::Info,
			"debug" => LevelFilter::Debug,
			"all" => LevelFilter::Trace,
			_ => return Err(()),
		})
	}
}

impl Default for BenchConfig {
	fn default() -> Self {
		BenchConfig {
			log_level_filter: String::from("info"),
			formation: String::from("x"),
			idle_thrust: DEFAULT_IDLE_THRUST,
			motor_channels: [0, 1, 2, 3],
			tick_rate_hz: 100,
		}
	}
}

pub fn read(path: &str) -> Result<BenchConfig, Box<dyn Error>> {
	let config_file = File::open(path)?;

	let config: BenchConfig = serde_json::from_reader(config_file)?;

	Ok(config)
}

pub fn save(config: &BenchConfig, path: &str) -> Result<(), Box<dyn Error>> {
	let mut config_file = OpenOptions::new()
		.create(true)
		.write(true)
		.truncate(true)
		.open(path)?;

	write!(config_file, "{}", serde_json::to_string(config)?)?;

	Ok(())
}
