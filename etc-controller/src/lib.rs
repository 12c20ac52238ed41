//! Electronic throttle control core: dual-sensor plausibility checking,
//! the motor-enable latch, torque demand, and the ready-to-drive sound.
//!
//! Nothing here blocks or sleeps. All timing derives from the driver's
//! timestamp, so the whole controller runs unmodified against the mock
//! driver on a host.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod can_wrapper;
pub mod console;
mod plausibility;

use libm::{fabsf, roundf};
use shared::etc_hal::{EtcDriver, EtcState};

use plausibility::FaultTimer;

pub struct EtcController<'a> {
    pub driver: &'a mut dyn EtcDriver,
    state: EtcState,
    mismatch_timer: FaultTimer,
    rtds_deassert_at: Option<f32>,
}

impl<'a> EtcController<'a> {
    /// Full-scale normalized reading of each hall-effect pedal sensor.
    pub const VOLT_SCALE_HE1: f32 = 0.90;
    pub const VOLT_SCALE_HE2: f32 = 0.90;

    /// Minimum brake pressure reading that counts as "brakes applied" for
    /// the start interlock.
    pub const BRAKE_TOL: f32 = 0.10;

    /// Maximum allowed difference between the two pedal travel fractions
    /// (T.4.2 allows 10% of travel).
    pub const HE_AGREEMENT_TOL: f32 = 0.10;

    /// How long an implausibility must persist before the motor is shut
    /// off (T.4.2.4). Shorter glitches are ignored.
    pub const HE_MISMATCH_TIMEOUT_S: f32 = 0.100;

    /// Legal raw-reading band for either sensor. Readings outside mean a
    /// shorted or disconnected sensor (T.4.3).
    pub const HE_VOLTAGE_MIN: f32 = 0.05;
    pub const HE_VOLTAGE_MAX: f32 = 0.95;

    /// Torque demand at full pedal travel.
    pub const TORQUE_MAX: u16 = 230;

    /// ADC full-scale voltage, used by the console to convert raw volts
    /// into the normalized reading domain.
    pub const MAX_V: f32 = 5.0;

    /// Ready-to-drive sound duration (EV.10.5 requires 1 to 3 seconds).
    pub const RTDS_DURATION_S: f32 = 2.0;

    pub fn new(driver: &'a mut dyn EtcDriver) -> Self {
        let mut controller = Self {
            driver,
            state: EtcState::reset(),
            mismatch_timer: FaultTimer::new(),
            rtds_deassert_at: None,
        };
        controller.driver.set_rtds(false);

        controller
    }

    /// Runs the plausibility machine over a fresh sensor pair and
    /// recomputes torque demand. Called at the main-loop cadence.
    ///
    /// A voltage-range fault (sensor shorted or disconnected) and a
    /// sensor disagreement share one mismatch timer: either condition,
    /// while the motor is enabled, starts it, and once a fault has been
    /// present for longer than [`Self::HE_MISMATCH_TIMEOUT_S`] the motor
    /// enable latch drops. Agreement clears the timer and moves the
    /// agreed pedal position.
    pub fn update_state(&mut self, he1_read: f32, he2_read: f32) {
        let now = self.driver.timestamp();
        self.update_travel(he1_read, he2_read);

        let out_of_range =
            !Self::he_reading_in_range(he1_read) || !Self::he_reading_in_range(he2_read);
        let disagreement =
            fabsf(self.state.he1_travel - self.state.he2_travel) > Self::HE_AGREEMENT_TOL;
        let implausible = (out_of_range || disagreement) && self.state.motor_enabled;

        if self.mismatch_timer.exceeded(implausible, now, Self::HE_MISMATCH_TIMEOUT_S) {
            self.state.motor_enabled = false;
        }

        if !implausible {
            self.state.pedal_travel = (self.state.he1_travel + self.state.he2_travel) / 2.0;
        }

        self.state.torque_demand = if self.state.motor_enabled {
            roundf(self.state.pedal_travel * Self::TORQUE_MAX as f32) as u16
        } else {
            0
        };

        self.update_rtds(now);
    }

    /// Recomputes per-sensor and agreed pedal travel without running the
    /// enable machine. Used by the main loop between full updates.
    pub fn update_pedal_travel(&mut self, he1_read: f32, he2_read: f32) {
        self.update_travel(he1_read, he2_read);
        self.state.pedal_travel = (self.state.he1_travel + self.state.he2_travel) / 2.0;

        self.update_rtds(self.driver.timestamp());
    }

    /// Latches a received supervisory state. Torque demand is forced to
    /// zero whenever the incoming record has the motor disabled, so a
    /// stale demand can never ride in on a disable.
    pub fn update_state_from_can(&mut self, state: EtcState) {
        self.state = state;

        if !self.state.motor_enabled {
            self.state.torque_demand = 0;
        }
    }

    /// Start interlock: precharge complete and brakes held. When both
    /// hold, latches the motor enable and sounds the RTDS; otherwise a
    /// silent no-op.
    pub fn check_start_conditions(&mut self) {
        if self.state.ts_ready && self.state.brakes_read >= Self::BRAKE_TOL {
            self.state.motor_enabled = true;
            self.run_rtds();
        }
    }

    /// Restores the power-on state image, clears the mismatch timer, and
    /// cancels any sounding RTDS.
    pub fn reset_state(&mut self) {
        self.state = EtcState::reset();
        self.mismatch_timer.clear();
        self.rtds_deassert_at = None;
        self.driver.set_rtds(false);
    }

    pub fn update_mbb_alive(&mut self) {
        self.state.mbb_alive = (self.state.mbb_alive + 1) % 16;
    }

    /// Starts (or restarts) the ready-to-drive sound. Non-blocking: the
    /// pin is asserted here and dropped by the deadline poll in the
    /// update calls.
    pub fn run_rtds(&mut self) {
        let now = self.driver.timestamp();

        self.driver.set_rtds(true);
        self.rtds_deassert_at = Some(now + Self::RTDS_DURATION_S);
    }

    pub fn state(&self) -> EtcState {
        self.state
    }

    pub fn mbb_alive(&self) -> u8 {
        self.state.mbb_alive
    }

    pub fn he1_read(&self) -> f32 {
        self.state.he1_read
    }

    pub fn he2_read(&self) -> f32 {
        self.state.he2_read
    }

    pub fn he1_travel(&self) -> f32 {
        self.state.he1_travel
    }

    pub fn he2_travel(&self) -> f32 {
        self.state.he2_travel
    }

    pub fn pedal_travel(&self) -> f32 {
        self.state.pedal_travel
    }

    pub fn brakes_read(&self) -> f32 {
        self.state.brakes_read
    }

    pub fn ts_ready(&self) -> bool {
        self.state.ts_ready
    }

    pub fn motor_enabled(&self) -> bool {
        self.state.motor_enabled
    }

    pub fn motor_forward(&self) -> bool {
        self.state.motor_forward
    }

    pub fn cockpit(&self) -> bool {
        self.state.cockpit
    }

    pub fn torque_demand(&self) -> u16 {
        self.state.torque_demand
    }

    /// Sample for the periodic throttle frame: both sensor travels, the
    /// agreed travel, and the torque demand.
    pub fn throttle_snapshot(&self) -> (f32, f32, f32, u16) {
        (
            self.state.he1_travel,
            self.state.he2_travel,
            self.state.pedal_travel,
            self.state.torque_demand,
        )
    }

    /// Sample for the periodic state frame.
    pub fn state_snapshot(&self) -> EtcState {
        self.state
    }

    /// Sample for the periodic sync frame. Bumps the heartbeat counter so
    /// consecutive frames walk 1..=15, 0, 1, ...
    pub fn sync_snapshot(&mut self) -> u8 {
        self.update_mbb_alive();
        self.state.mbb_alive
    }

    /// Ingress path for a received supervisory frame.
    pub fn apply_rx_frame(&mut self, state: EtcState) {
        self.update_state_from_can(state);
    }

    fn he_reading_in_range(reading: f32) -> bool {
        (Self::HE_VOLTAGE_MIN..=Self::HE_VOLTAGE_MAX).contains(&reading)
    }

    fn update_travel(&mut self, he1_read: f32, he2_read: f32) {
        self.state.he1_read = he1_read;
        self.state.he2_read = he2_read;
        self.state.he1_travel = (he1_read / Self::VOLT_SCALE_HE1).clamp(0.0, 1.0);
        self.state.he2_travel = (he2_read / Self::VOLT_SCALE_HE2).clamp(0.0, 1.0);
    }

    fn update_rtds(&mut self, now: f32) {
        if let Some(deassert_at) = self.rtds_deassert_at {
            if now >= deassert_at {
                self.driver.set_rtds(false);
                self.rtds_deassert_at = None;
            }
        }
    }
}

#[allow(unsafe_code)]
unsafe impl Send for EtcController<'_> {}
