use core::any::Any;

use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter};

/// Complete observed/commanded state of the throttle controller.
///
/// `default()` is the all-zero record, matching what a blank frame off the
/// bus decodes to. `reset()` is the power-on image, which differs only in
/// `motor_forward` (the motor controller treats the direction input as
/// active-low, so "forward" is the de-energized value).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtcState {
    pub mbb_alive: u8,
    pub he1_read: f32,
    pub he2_read: f32,
    pub he1_travel: f32,
    pub he2_travel: f32,
    pub pedal_travel: f32,
    pub brakes_read: f32,
    pub ts_ready: bool,
    pub motor_enabled: bool,
    pub motor_forward: bool,
    pub cockpit: bool,
    pub torque_demand: u16,
}

impl EtcState {
    pub const fn default() -> Self {
        Self {
            mbb_alive: 0,
            he1_read: 0.0,
            he2_read: 0.0,
            he1_travel: 0.0,
            he2_travel: 0.0,
            pedal_travel: 0.0,
            brakes_read: 0.0,
            ts_ready: false,
            motor_enabled: false,
            motor_forward: false,
            cockpit: false,
            torque_demand: 0,
        }
    }

    pub const fn reset() -> Self {
        Self {
            mbb_alive: 0,
            he1_read: 0.0,
            he2_read: 0.0,
            he1_travel: 0.0,
            he2_travel: 0.0,
            pedal_travel: 0.0,
            brakes_read: 0.0,
            ts_ready: false,
            motor_enabled: false,
            motor_forward: true,
            cockpit: false,
            torque_demand: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumCountMacro, EnumIter)]
pub enum HallEffectSensor {
    He1 = 0,
    He2 = 1,
}

pub trait EtcDriver {
    /// Seconds since boot. Monotonic; every timer in the controller is
    /// derived from this.
    fn timestamp(&self) -> f32;

    fn read_hall_effect(&self, sensor: HallEffectSensor) -> f32;

    fn set_rtds(&mut self, state: bool);
    fn rtds(&self) -> bool;

    fn as_mut_any(&mut self) -> &mut dyn Any;
}
