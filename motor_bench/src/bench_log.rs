use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

lazy_static! {
	static ref BENCH_LOGGER: BenchLogger = BenchLogger {
		start_instant: Instant::now()
	};
}

pub fn init(level_filter: LevelFilter) {
	log::set_logger(&*BENCH_LOGGER)
		.map(|()| log::set_max_level(level_filter))
		.unwrap();
}

/// Prints records to stdout with timestamps relative to process start.
/// Errors carry their source location.
struct BenchLogger {
	start_instant: Instant,
}

impl Log for BenchLogger {
	fn enabled(&self, _: &Metadata) -> bool {
		true
	}

	fn log(&self, record: &Record) {
		if self.enabled(record.metadata()) {
			if record.metadata().level() == Level::Error {
				println!(
					"[{:.3}][{:?}][{}] {} ({:?}:{:?})",
					(Instant::now() - self.start_instant).as_secs_f32(),
					record.level(),
					record.module_path_static().unwrap_or("unknown"),
					record.args(),
					record.file_static().unwrap_or("unknown"),
					record.line().unwrap_or(0)
				);
			} else {
				println!(
					"[{:.3}][{:?}][{}] {}",
					(Instant::now() - self.start_instant).as_secs_f32(),
					record.level(),
					record.module_path_static().unwrap_or("unknown"),
					record.args(),
				);
			}
		}
	}

	fn flush(&self) {}
}
