use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use anyhow::Result;
use crossbeam_channel::Receiver;

use crate::command::ControlCommand;
use crate::decimator::PowerAverager;
use crate::mixer::{Mixer, QuadFormation};
use crate::params::{MotorPowerLog, PowerParams};
use crate::traits::{Motor, MotorDriver, MotorMapping, PowerSampleConsumer, RATIO_MAX, RATIO_MIN};

/// Turns one command per control tick into four motor drive ratios.
///
/// The operating mode is re-evaluated on every tick from the shared cells:
/// bypass suppresses the whole tick, an enabled override drives the motors
/// verbatim, and otherwise the mixed command is floored at the idle thrust
/// and forwarded.
pub struct PowerDistributor<D: MotorDriver, C: PowerSampleConsumer> {
    driver: D,
    mixer: Mixer,
    params: Arc<PowerParams>,
    power_log: Arc<MotorPowerLog>,
    averager: PowerAverager,
    consumer: C,
}

impl<D: MotorDriver, C: PowerSampleConsumer> PowerDistributor<D, C> {
    pub fn new(
        driver: D,
        formation: QuadFormation,
        params: Arc<PowerParams>,
        consumer: C,
    ) -> Self {
        Self {
            driver,
            mixer: Mixer::new(formation),
            params,
            power_log: Arc::new(MotorPowerLog::default()),
            averager: PowerAverager::new(),
            consumer,
        }
    }

    /// Latest post-shaping ratios, for registration into a telemetry log.
    pub fn power_log(&self) -> &Arc<MotorPowerLog> {
        &self.power_log
    }

    /// Configures the driver with the airframe motor mapping. Call exactly
    /// once at startup.
    pub fn init(&mut self, mapping: &MotorMapping) -> Result<()> {
        self.driver.init(mapping)
    }

    /// Forwards the driver self-test result.
    pub fn self_test(&mut self) -> bool {
        self.driver.self_test()
    }

    /// Unconditionally drives every motor to the minimum ratio, skipping
    /// mixing, override and idle floor. For shutdown and fault paths.
    pub fn stop(&mut self) {
        for &motor in Motor::ALL.iter() {
            self.driver
                .set_ratio(motor, RATIO_MIN)
                .map_err(|e| error!("Failed to stop {:?}: {}", motor, e))
                .unwrap_or_default();
        }
    }

    /// The per-tick entry point.
    pub fn distribute(&mut self, command: &ControlCommand) -> Result<()> {
        if self.params.bypass() {
            // Motors keep their last written ratios; stop() is the explicit
            // fallback.
            return Ok(());
        }

        let ratios = if self.params.override_enabled() {
            // Operator-supplied ratios are applied verbatim, without the
            // idle floor. A deliberate zero stays zero.
            self.params.override_ratios().map(u32::from)
        } else {
            // An idle thrust above the actuator range saturates rather than
            // wrapping.
            let idle_thrust = self.params.idle_thrust();
            self.mixer
                .mix(command)
                .map(|ratio| ratio.max(idle_thrust).min(RATIO_MAX as u32))
        };

        for (&motor, &ratio) in Motor::ALL.iter().zip(ratios.iter()) {
            self.driver.set_ratio(motor, ratio as u16)?;
        }

        self.power_log.record(ratios);

        if let Some(sample) = self.averager.accumulate(ratios) {
            self.consumer.accept_power_sample(sample);
        }

        Ok(())
    }

    /// Runs the tick loop over a command channel, one `distribute` per
    /// received command. Errors are logged and do not stop the loop.
    pub fn spawn(mut self, command_receiver: Receiver<ControlCommand>) -> JoinHandle<()>
    where
        D: Send + 'static,
        C: Send + 'static,
    {
        thread::spawn(move || {
            for command in command_receiver.iter() {
                self.distribute(&command)
                    .map_err(|e| error!("Failed to distribute power: {}", e))
                    .unwrap_or_default();
            }
        })
    }
}
