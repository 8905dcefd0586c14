#[macro_use]
extern crate anyhow;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

use std::error::Error;
use std::io::BufRead;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{select, tick, unbounded, Sender};

use power_distribution::{
	ControlCommand, MotorMapping, PowerDistributor, PowerParams, PowerSampleConsumer,
	QuadFormation, MOTOR_COUNT,
};

use crate::bench_config::TryIntoLevelFilter;
use crate::console_driver::ConsoleMotorDriver;
use crate::param_table::{BenchParamStore, BenchTelemetry};

mod bench_config;
mod bench_log;
mod console_driver;
mod param_table;

/// Logs each decimated motor power average, standing in for the estimation
/// task that consumes it in flight.
struct PowerSamplePrinter;

impl PowerSampleConsumer for PowerSamplePrinter {
	fn accept_power_sample(&mut self, sample: [f32; MOTOR_COUNT]) {
		info!(target: "motor_power_avg", "{:.1} {:.1} {:.1} {:.1}",
		      sample[0], sample[1], sample[2], sample[3]);
	}
}

enum Request {
	Set(String, u32),
	Get(String),
	Params,
	Telemetry,
	Thrust(u16),
	Bypass(bool),
	Stop,
	Exit,
}

const USAGE: &'static str = "Commands:\n  \
	set <group.name> <value>\n  \
	get <group.name>\n  \
	params\n  \
	telemetry\n  \
	thrust <0-65535>\n  \
	bypass <on|off>\n  \
	stop\n  \
	exit";

fn parse_request(line: &str) -> Result<Option<Request>, &'static str> {
	let mut words = line.split_whitespace();

	let request = match words.next() {
		None => return Ok(None),
		Some("set") => {
			let name = words.next().ok_or(USAGE)?;
			let value = words.next().and_then(|w| w.parse().ok()).ok_or(USAGE)?;
			Request::Set(String::from(name), value)
		}
		Some("get") => Request::Get(String::from(words.next().ok_or(USAGE)?)),
		Some("params") => Request::Params,
		Some("telemetry") => Request::Telemetry,
		Some("thrust") => {
			let value = words.next().and_then(|w| w.parse().ok()).ok_or(USAGE)?;
			Request::Thrust(value)
		}
		Some("bypass") => match words.next() {
			Some("on") => Request::Bypass(true),
			Some("off") => Request::Bypass(false),
			_ => return Err(USAGE),
		},
		Some("stop") => Request::Stop,
		Some("exit") | Some("quit") => Request::Exit,
		Some(_) => return Err(USAGE),
	};

	Ok(Some(request))
}

fn spawn_operator_interface(request_sender: Sender<Request>) -> thread::JoinHandle<()> {
	thread::spawn(move || {
		let stdin = std::io::stdin();

		for line in stdin.lock().lines() {
			let line = match line {
				Ok(line) => line,
				Err(_) => break,
			};

			match parse_request(&line) {
				Ok(Some(request)) => {
					let exit = matches!(request, Request::Exit);
					if request_sender.send(request).is_err() || exit {
						break;
					}
				}
				Ok(None) => {}
				Err(usage) => println!("{}", usage),
			}
		}
	})
}

fn main() -> Result<(), Box<dyn Error>> {
	const CONFIG_ARG: &'static str = "config";
	const SELF_TEST_ARG: &'static str = "self-test";

	let args = clap::App::new("Motor bench")
		.version(env!("CARGO_PKG_VERSION"))
		.arg(clap::Arg::new(CONFIG_ARG)
			.long("config")
			.help("Configuration file path")
			.takes_value(true))
		.arg(clap::Arg::new(SELF_TEST_ARG)
			.long("self-test")
			.help("Run the actuator self-test and exit")
			.takes_value(false))
		.get_matches();

	// Configuration
	const DEFAULT_CONFIG_PATH: &'static str = "motor_bench.json";

	let config_path = args.value_of(CONFIG_ARG).unwrap_or(DEFAULT_CONFIG_PATH);

	let (config, config_created) = match bench_config::read(config_path) {
		Ok(config) => (config, false),
		Err(_) => {
			let config = bench_config::BenchConfig::default();
			bench_config::save(&config, config_path)?;
			(config, true)
		}
	};

	// Log
	let level_filter = config.log_level_filter
		.try_into_level_filter()
		.map_err(|_| anyhow!("Failed to parse log level filter"))?;

	bench_log::init(level_filter);

	info!("Motor bench {}", env!("CARGO_PKG_VERSION"));

	if config_created {
		info!("Wrote default configuration to {}", config_path);
	}

	if config.tick_rate_hz == 0 {
		return Err(anyhow!("Tick rate must be strictly positive").into());
	}

	let formation: QuadFormation = config.formation.parse()?;

	// Shared parameter cells and their operator-facing bindings
	let params = Arc::new(PowerParams::new(config.idle_thrust));

	let mut param_store = BenchParamStore::default();
	params.register(&mut param_store);

	// Power distribution
	let mut distributor = PowerDistributor::new(
		ConsoleMotorDriver::new(),
		formation,
		Arc::clone(&params),
		PowerSamplePrinter,
	);

	distributor.init(&MotorMapping {
		channels: config.motor_channels,
	})?;

	let mut telemetry = BenchTelemetry::default();
	distributor.power_log().register(&mut telemetry);

	if !distributor.self_test() {
		error!("Actuator self-test failed");
		return Err(anyhow!("Actuator self-test failed").into());
	}

	info!("Actuator self-test passed");

	if args.is_present(SELF_TEST_ARG) {
		return Ok(());
	}

	// Operator interface
	let (request_sender, request_receiver) = unbounded::<Request>();

	spawn_operator_interface(request_sender);

	info!("Type \"help\" for the list of commands");

	// Control loop
	let ticker = tick(Duration::from_micros(1_000_000 / config.tick_rate_hz));
	let mut thrust = 0u16;

	loop {
		select! {
			recv(ticker) -> _ => {
				let command = ControlCommand {
					thrust,
					..ControlCommand::default()
				};

				distributor.distribute(&command)
					.map_err(|e| error!("Failed to distribute power: {}", e))
					.unwrap_or_default();
			}
			recv(request_receiver) -> request => match request {
				Ok(Request::Set(name, value)) => {
					if param_store.write(&name, value) {
						info!("{} = {}", name, value);
					} else {
						warn!("Unknown parameter \"{}\"", name);
					}
				}
				Ok(Request::Get(name)) => match param_store.read(&name) {
					Some(value) => info!("{} = {}", name, value),
					None => warn!("Unknown parameter \"{}\"", name),
				},
				Ok(Request::Params) => {
					for name in param_store.names() {
						info!("{} = {}", name, param_store.read(name).unwrap_or_default());
					}
				}
				Ok(Request::Telemetry) => {
					for name in telemetry.names() {
						info!("{} = {}", name, telemetry.read(name).unwrap_or_default());
					}
				}
				Ok(Request::Thrust(value)) => {
					thrust = value;
					info!("Thrust set to {}", thrust);
				}
				Ok(Request::Bypass(enable)) => {
					params.set_bypass(enable);
					info!("Bypass {}", if enable { "engaged" } else { "released" });
				}
				Ok(Request::Stop) => {
					// Keep the next ticks from re-driving the motors.
					thrust = 0;
					params.set_override_enabled(false);
					distributor.stop();
					info!("Motors stopped");
				}
				Ok(Request::Exit) | Err(_) => break,
			}
		}
	}

	distributor.stop();

	Ok(())
}
