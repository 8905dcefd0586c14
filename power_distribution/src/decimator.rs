use crate::traits::MOTOR_COUNT;

/// Number of raw samples folded into one emitted average.
pub const AVERAGE_WINDOW: u16 = 10;

/// Downsamples per-tick motor power into one arithmetic mean per window.
/// Windows do not overlap: the accumulators reset after each emission.
pub struct PowerAverager {
    sums: [f32; MOTOR_COUNT],
    count: u16,
    window: u16,
}

impl PowerAverager {
    pub fn new() -> Self {
        Self::with_window(AVERAGE_WINDOW)
    }

    pub fn with_window(window: u16) -> Self {
        assert!(window > 0);

        Self {
            sums: [0.; MOTOR_COUNT],
            count: 0,
            window,
        }
    }

    /// Folds one sample in. Returns the four means when the window closes,
    /// with the accumulators already reset for the next window.
    pub fn accumulate(&mut self, ratios: [u32; MOTOR_COUNT]) -> Option<[f32; MOTOR_COUNT]> {
        for (sum, &ratio) in self.sums.iter_mut().zip(ratios.iter()) {
            *sum += ratio as f32;
        }
        self.count += 1;

        if self.count == self.window {
            let count = self.count as f32;
            let means = self.sums.map(|sum| sum / count);

            self.sums = [0.; MOTOR_COUNT];
            self.count = 0;

            Some(means)
        } else {
            None
        }
    }
}

impl Default for PowerAverager {
    fn default() -> Self {
        Self::new()
    }
}
