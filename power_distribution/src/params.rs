use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};
use std::sync::Arc;

use crate::traits::{ParamStore, TelemetryLog, MOTOR_COUNT};

/// Default minimum commanded ratio on the computed-mix path.
pub const DEFAULT_IDLE_THRUST: u32 = 0;

const MOTOR_ENTRY_NAMES: [&str; MOTOR_COUNT] = ["m1", "m2", "m3", "m4"];

/// Shared configuration written asynchronously by an external configuration
/// writer and re-read by the control tick. Every cell is a single machine
/// word accessed with relaxed ordering: the hot path takes no locks, and a
/// write landing between two ticks is picked up on the next one.
pub struct PowerParams {
    override_enable: AtomicBool,
    override_ratios: [AtomicU16; MOTOR_COUNT],
    idle_thrust: AtomicU32,
    bypass: AtomicBool,
}

impl PowerParams {
    pub fn new(idle_thrust: u32) -> Self {
        Self {
            override_enable: AtomicBool::new(false),
            override_ratios: [
                AtomicU16::new(0),
                AtomicU16::new(0),
                AtomicU16::new(0),
                AtomicU16::new(0),
            ],
            idle_thrust: AtomicU32::new(idle_thrust),
            bypass: AtomicBool::new(false),
        }
    }

    pub fn override_enabled(&self) -> bool {
        self.override_enable.load(Ordering::Relaxed)
    }

    pub fn set_override_enabled(&self, enable: bool) {
        self.override_enable.store(enable, Ordering::Relaxed);
    }

    pub fn override_ratio(&self, index: usize) -> u16 {
        self.override_ratios[index].load(Ordering::Relaxed)
    }

    pub fn set_override_ratio(&self, index: usize, ratio: u16) {
        self.override_ratios[index].store(ratio, Ordering::Relaxed);
    }

    /// Reads the whole override block. Four independent loads: a concurrent
    /// writer may be observed between two motors, which the design accepts.
    pub fn override_ratios(&self) -> [u16; MOTOR_COUNT] {
        [
            self.override_ratio(0),
            self.override_ratio(1),
            self.override_ratio(2),
            self.override_ratio(3),
        ]
    }

    pub fn idle_thrust(&self) -> u32 {
        self.idle_thrust.load(Ordering::Relaxed)
    }

    pub fn set_idle_thrust(&self, idle_thrust: u32) {
        self.idle_thrust.store(idle_thrust, Ordering::Relaxed);
    }

    pub fn bypass(&self) -> bool {
        self.bypass.load(Ordering::Relaxed)
    }

    pub fn set_bypass(&self, bypass: bool) {
        self.bypass.store(bypass, Ordering::Relaxed);
    }

    /// Registers the operator-writable bindings into a parameter store.
    pub fn register(self: &Arc<Self>, store: &mut dyn ParamStore) {
        let params = Arc::clone(self);
        let read = Box::new(move || params.override_enabled() as u32);
        let params = Arc::clone(self);
        let write = Box::new(move |value: u32| params.set_override_enabled(value != 0));
        store.register_param("motorPowerSet", "enable", read, write);

        for (index, &name) in MOTOR_ENTRY_NAMES.iter().enumerate() {
            let params = Arc::clone(self);
            let read = Box::new(move || params.override_ratio(index) as u32);
            let params = Arc::clone(self);
            let write = Box::new(move |value: u32| {
                params.set_override_ratio(index, value.min(u16::MAX as u32) as u16)
            });
            store.register_param("motorPowerSet", name, read, write);
        }

        let params = Arc::clone(self);
        let read = Box::new(move || params.idle_thrust());
        let params = Arc::clone(self);
        let write = Box::new(move |value: u32| params.set_idle_thrust(value));
        store.register_param("powerDist", "idleThrust", read, write);
    }
}

impl Default for PowerParams {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_THRUST)
    }
}

/// Latest post-shaping ratio per motor, exposed read-only to the telemetry
/// log.
#[derive(Default)]
pub struct MotorPowerLog {
    ratios: [AtomicU32; MOTOR_COUNT],
}

impl MotorPowerLog {
    pub fn record(&self, ratios: [u32; MOTOR_COUNT]) {
        for (cell, &ratio) in self.ratios.iter().zip(ratios.iter()) {
            cell.store(ratio, Ordering::Relaxed);
        }
    }

    pub fn latest(&self) -> [u32; MOTOR_COUNT] {
        [
            self.ratios[0].load(Ordering::Relaxed),
            self.ratios[1].load(Ordering::Relaxed),
            self.ratios[2].load(Ordering::Relaxed),
            self.ratios[3].load(Ordering::Relaxed),
        ]
    }

    /// Registers the read bindings into a telemetry log.
    pub fn register(self: &Arc<Self>, log: &mut dyn TelemetryLog) {
        for (index, &name) in MOTOR_ENTRY_NAMES.iter().enumerate() {
            let power = Arc::clone(self);
            let read = Box::new(move || power.ratios[index].load(Ordering::Relaxed));
            log.register_entry("motor", name, read);
        }
    }
}
