use core::any::Any;

use crate::etc_hal::{EtcDriver, HallEffectSensor};
use strum::EnumCount;

/// Host-test stand-in for the target board. The clock only moves when a
/// test calls `advance_time`, so timing scenarios run without sleeping.
#[derive(Debug)]
pub struct EtcDriverMock {
    timestamp: f32,
    hall_effect: [f32; HallEffectSensor::COUNT],
    rtds: bool,
}

impl EtcDriver for EtcDriverMock {
    fn timestamp(&self) -> f32 {
        self.timestamp
    }

    fn read_hall_effect(&self, sensor: HallEffectSensor) -> f32 {
        self.hall_effect[sensor as usize]
    }

    fn set_rtds(&mut self, state: bool) {
        self.rtds = state;
    }

    fn rtds(&self) -> bool {
        self.rtds
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}

impl EtcDriverMock {
    pub const fn new() -> Self {
        Self {
            timestamp: 0.0,
            hall_effect: [0.0; HallEffectSensor::COUNT],
            rtds: false,
        }
    }

    pub fn advance_time(&mut self, dt_s: f32) {
        self.timestamp += dt_s;
    }

    pub fn set_hall_effect(&mut self, sensor: HallEffectSensor, value: f32) {
        self.hall_effect[sensor as usize] = value;
    }
}
