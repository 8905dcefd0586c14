use anyhow::Result;

/// Number of motors on the airframe.
pub const MOTOR_COUNT: usize = 4;

/// Valid ratio range accepted by `MotorDriver::set_ratio`.
pub const RATIO_MIN: u16 = 0;
pub const RATIO_MAX: u16 = u16::MAX;

/// Motor position on the frame. `ALL` fixes the order in which the driver is
/// addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motor {
    M1,
    M2,
    M3,
    M4,
}

impl Motor {
    pub const ALL: [Motor; MOTOR_COUNT] = [Motor::M1, Motor::M2, Motor::M3, Motor::M4];

    pub fn index(self) -> usize {
        match self {
            Motor::M1 => 0,
            Motor::M2 => 1,
            Motor::M3 => 2,
            Motor::M4 => 3,
        }
    }
}

/// Output channel assignment for each motor of the airframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorMapping {
    pub channels: [u32; MOTOR_COUNT],
}

/// Drivers that turn a ratio into actual motor drive.
pub trait MotorDriver {
    /// Configures the driver with the airframe motor mapping. Called exactly
    /// once at startup; idempotence is not guaranteed.
    fn init(&mut self, mapping: &MotorMapping) -> Result<()>;

    /// Applies a drive ratio to one motor.
    fn set_ratio(&mut self, motor: Motor, ratio: u16) -> Result<()>;

    /// Hardware self-test. `true` means pass.
    fn self_test(&mut self) -> bool;
}

/// Consumers of the decimated motor power average.
pub trait PowerSampleConsumer {
    fn accept_power_sample(&mut self, sample: [f32; MOTOR_COUNT]);
}

pub type ParamReader = Box<dyn Fn() -> u32 + Send + Sync>;
pub type ParamWriter = Box<dyn Fn(u32) + Send + Sync>;

/// Stores that expose named read/write bindings to an external writer.
/// Values are transported as `u32` whatever the declared width of the bound
/// cell; writes to narrower cells saturate.
pub trait ParamStore {
    fn register_param(
        &mut self,
        group: &'static str,
        name: &'static str,
        read: ParamReader,
        write: ParamWriter,
    );
}

/// Logs that expose named read-only bindings.
pub trait TelemetryLog {
    fn register_entry(&mut self, group: &'static str, name: &'static str, read: ParamReader);
}
