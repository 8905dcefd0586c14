use std::str::FromStr;

use crate::command::ControlCommand;
use crate::traits::{MOTOR_COUNT, RATIO_MAX, RATIO_MIN};

/// Motor layout of the airframe, fixed at construction. Both layouts drive
/// the motors in the same 1..4 output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadFormation {
    /// Arms at 45° from the body axes. Roll and pitch are shared between
    /// motor pairs, so both are halved before mixing.
    X,
    /// Arms on the body axes ("plus").
    Plus,
}

impl FromStr for QuadFormation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(QuadFormation::X),
            "plus" | "+" | "normal" => Ok(QuadFormation::Plus),
            other => Err(anyhow::anyhow!("Unknown quad formation \"{}\"", other)),
        }
    }
}

/// Saturates a mixed value into the valid actuator range.
fn limit_ratio(value: i32) -> u32 {
    value.clamp(RATIO_MIN as i32, RATIO_MAX as i32) as u32
}

pub struct Mixer {
    formation: QuadFormation,
}

impl Mixer {
    pub fn new(formation: QuadFormation) -> Self {
        Self { formation }
    }

    pub fn formation(&self) -> QuadFormation {
        self.formation
    }

    /// Distributes a command across the four motors. The combination is
    /// computed in the signed domain and each output is clamped into the
    /// actuator range right after the arithmetic; saturation is the defined
    /// behavior for out-of-range combinations, not an error.
    pub fn mix(&self, command: &ControlCommand) -> [u32; MOTOR_COUNT] {
        debug!(target: "mixer_input", "{} {} {} {}",
               command.thrust, command.roll, command.pitch, command.yaw);

        let thrust = command.thrust as i32;
        let roll = command.roll as i32;
        let pitch = command.pitch as i32;
        let yaw = command.yaw as i32;

        let outputs = match self.formation {
            QuadFormation::X => {
                let r = roll / 2;
                let p = pitch / 2;
                [
                    thrust - r + p + yaw,
                    thrust - r - p - yaw,
                    thrust + r - p + yaw,
                    thrust + r + p - yaw,
                ]
            }
            QuadFormation::Plus => [
                thrust + pitch + yaw,
                thrust - roll - yaw,
                thrust - pitch + yaw,
                thrust + roll - yaw,
            ],
        };

        let outputs = outputs.map(limit_ratio);

        debug!(target: "mixer_output", "{} {} {} {}",
               outputs[0], outputs[1], outputs[2], outputs[3]);

        outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_command_is_uniform() {
        let mixer = Mixer::new(QuadFormation::X);

        let outputs = mixer.mix(&ControlCommand {
            thrust: 40000,
            ..ControlCommand::default()
        });

        assert_eq!(outputs, [40000; MOTOR_COUNT]);
    }

    #[test]
    fn x_roll_splits_left_and_right_pairs() {
        let mixer = Mixer::new(QuadFormation::X);

        let outputs = mixer.mix(&ControlCommand {
            thrust: 40000,
            roll: 2000,
            ..ControlCommand::default()
        });

        assert_eq!(outputs, [39000, 39000, 41000, 41000]);
    }

    #[test]
    fn x_diagonal_sums_cancel_roll_and_pitch() {
        let mixer = Mixer::new(QuadFormation::X);

        let command = ControlCommand {
            thrust: 30000,
            roll: 500,
            pitch: -300,
            yaw: 200,
        };
        let outputs = mixer.mix(&command);

        let thrust = command.thrust as i64;
        let yaw = command.yaw as i64;
        assert_eq!(outputs[0] as i64 + outputs[2] as i64, 2 * thrust + 2 * yaw);
        assert_eq!(outputs[1] as i64 + outputs[3] as i64, 2 * thrust - 2 * yaw);
    }

    #[test]
    fn x_roll_and_pitch_are_halved_truncating_toward_zero() {
        let mixer = Mixer::new(QuadFormation::X);

        let outputs = mixer.mix(&ControlCommand {
            thrust: 1000,
            roll: 3,
            ..ControlCommand::default()
        });
        assert_eq!(outputs, [999, 999, 1001, 1001]);

        let outputs = mixer.mix(&ControlCommand {
            thrust: 1000,
            roll: -3,
            ..ControlCommand::default()
        });
        assert_eq!(outputs, [1001, 1001, 999, 999]);
    }

    #[test]
    fn plus_uses_whole_axis_commands() {
        let mixer = Mixer::new(QuadFormation::Plus);

        let outputs = mixer.mix(&ControlCommand {
            thrust: 10000,
            roll: 1000,
            pitch: 2000,
            yaw: 300,
        });

        assert_eq!(outputs, [12300, 8700, 8300, 10700]);
    }

    #[test]
    fn outputs_saturate_instead_of_wrapping() {
        let mixer = Mixer::new(QuadFormation::X);

        let outputs = mixer.mix(&ControlCommand {
            thrust: 60000,
            yaw: 20000,
            ..ControlCommand::default()
        });
        assert_eq!(outputs[0], RATIO_MAX as u32);
        assert_eq!(outputs[1], 40000);

        let outputs = mixer.mix(&ControlCommand {
            thrust: 0,
            yaw: 20000,
            ..ControlCommand::default()
        });
        assert_eq!(outputs[0], 20000);
        assert_eq!(outputs[1], RATIO_MIN as u32);
    }

    #[test]
    fn formation_parses_from_configuration_names() {
        assert_eq!("x".parse::<QuadFormation>().unwrap(), QuadFormation::X);
        assert_eq!("plus".parse::<QuadFormation>().unwrap(), QuadFormation::Plus);
        assert_eq!("normal".parse::<QuadFormation>().unwrap(), QuadFormation::Plus);
        assert!("hex".parse::<QuadFormation>().is_err());
    }
}
