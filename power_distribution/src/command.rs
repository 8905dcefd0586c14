/// Attitude/thrust command produced by the upstream controller, one per
/// control tick. Thrust is a non-negative collective magnitude; roll, pitch
/// and yaw are signed torque demands.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlCommand {
    pub thrust: u16,
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
}
