use anyhow::Result;

use power_distribution::{Motor, MotorDriver, MotorMapping};

/// Bench stand-in for the ESC driver: traces every ratio write instead of
/// generating PWM.
pub struct ConsoleMotorDriver {
	mapping: Option<MotorMapping>,
}

impl ConsoleMotorDriver {
	pub fn new() -> Self {
		Self { mapping: None }
	}
}

impl MotorDriver for ConsoleMotorDriver {
	fn init(&mut self, mapping: &MotorMapping) -> Result<()> {
		info!("Motor mapping: {:?}", mapping.channels);
		self.mapping = Some(*mapping);

		Ok(())
	}

	fn set_ratio(&mut self, motor: Motor, ratio: u16) -> Result<()> {
		let mapping = self
			.mapping
			.as_ref()
			.ok_or_else(|| anyhow!("Motor driver is not initialized"))?;

		trace!(target: "motor_ratio", "{:?} (channel {}): {}",
		       motor, mapping.channels[motor.index()], ratio);

		Ok(())
	}

	fn self_test(&mut self) -> bool {
		self.mapping.is_some()
	}
}
