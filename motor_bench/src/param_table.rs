use std::collections::HashMap;

use power_distribution::{ParamReader, ParamStore, ParamWriter, TelemetryLog};

/// Flat name-indexed parameter table, keyed `group.name`.
#[derive(Default)]
pub struct BenchParamStore {
	entries: HashMap<String, (ParamReader, ParamWriter)>,
}

impl ParamStore for BenchParamStore {
	fn register_param(
		&mut self,
		group: &'static str,
		name: &'static str,
		read: ParamReader,
		write: ParamWriter,
	) {
		self.entries.insert(format!("{}.{}", group, name), (read, write));
	}
}

impl BenchParamStore {
	pub fn read(&self, key: &str) -> Option<u32> {
		self.entries.get(key).map(|(read, _)| read())
	}

	pub fn write(&self, key: &str, value: u32) -> bool {
		match self.entries.get(key) {
			Some((_, write)) => {
				write(value);
				true
			}
			None => false,
		}
	}

	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
		names.sort();

		names
	}
}

/// Read-only telemetry table, keyed `group.name`.
#[derive(Default)]
pub struct BenchTelemetry {
	entries: HashMap<String, ParamReader>,
}

impl TelemetryLog for BenchTelemetry {
	fn register_entry(&mut self, group: &'static str, name: &'static str, read: ParamReader) {
		self.entries.insert(format!("{}.{}", group, name), read);
	}
}

impl BenchTelemetry {
	pub fn read(&self, key: &str) -> Option<u32> {
		self.entries.get(key).map(|read| read())
	}

	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
		names.sort();

		names
	}
}
