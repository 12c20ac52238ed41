use std::any::Any;
use std::time::Instant;

use shared::etc_hal::{EtcDriver, HallEffectSensor};
use strum::EnumCount;

/// Wall-clock-backed driver for the host harness. RTDS edges are narrated
/// to stdout since there is no speaker to listen to.
pub struct SystemEtcDriver {
    started_at: Instant,
    hall_effect: [f32; HallEffectSensor::COUNT],
    rtds: bool,
}

impl EtcDriver for SystemEtcDriver {
    fn timestamp(&self) -> f32 {
        self.started_at.elapsed().as_secs_f32()
    }

    fn read_hall_effect(&self, sensor: HallEffectSensor) -> f32 {
        self.hall_effect[sensor as usize]
    }

    fn set_rtds(&mut self, state: bool) {
        if state != self.rtds {
            println!("rtds {}", if state { "on" } else { "off" });
        }
        self.rtds = state;
    }

    fn rtds(&self) -> bool {
        self.rtds
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}

impl SystemEtcDriver {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            hall_effect: [0.0; HallEffectSensor::COUNT],
            rtds: false,
        }
    }
}
