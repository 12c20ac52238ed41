//! CAN layer: frame codec, periodic transmit scheduling, and event-flag
//! dispatch.
//!
//! The controller core only hands out snapshots; everything about the wire
//! lives here. Travels go out as half-percent counts (0..=200), brake
//! pressure in milli-units, torque as a little-endian u16.

use libm::roundf;
use shared::can_hal::{
    CanFrame, CanInterface, ETC_STATE_FRAME_ID, ETC_SYNC_FRAME_ID, ETC_THROTTLE_FRAME_ID,
    MBB_STATE_FRAME_ID,
};
use shared::util::LoopTimer;

use crate::EtcController;

pub const THROTTLE_PERIOD_S: f32 = 0.010;
pub const STATE_PERIOD_S: f32 = 0.100;
pub const SYNC_PERIOD_S: f32 = 1.000;

pub struct CanWrapper<'a> {
    interface: &'a mut dyn CanInterface,
    throttle_timer: LoopTimer,
    state_timer: LoopTimer,
    sync_timer: LoopTimer,
}

impl<'a> CanWrapper<'a> {
    pub const THROTTLE_FLAG: u32 = 1 << 0;
    pub const STATE_FLAG: u32 = 1 << 1;
    pub const SYNC_FLAG: u32 = 1 << 2;
    pub const RX_FLAG: u32 = 1 << 3;
    pub const ALL_FLAGS: u32 =
        Self::THROTTLE_FLAG | Self::STATE_FLAG | Self::SYNC_FLAG | Self::RX_FLAG;

    pub fn new(interface: &'a mut dyn CanInterface) -> Self {
        Self {
            interface,
            throttle_timer: LoopTimer::new(THROTTLE_PERIOD_S),
            state_timer: LoopTimer::new(STATE_PERIOD_S),
            sync_timer: LoopTimer::new(SYNC_PERIOD_S),
        }
    }

    /// Advances the transmit schedule and reports which flags are due.
    /// Called from the main loop; the returned mask is raised on the event
    /// flag set the CAN context waits on.
    pub fn update_timers(&mut self, dt_s: f32) -> u32 {
        let mut flags = 0;

        if self.throttle_timer.should_update(dt_s) {
            flags |= Self::THROTTLE_FLAG;
        }
        if self.state_timer.should_update(dt_s) {
            flags |= Self::STATE_FLAG;
        }
        if self.sync_timer.should_update(dt_s) {
            flags |= Self::SYNC_FLAG;
        }
        if self.interface.rx_pending() {
            flags |= Self::RX_FLAG;
        }

        flags
    }

    /// Services every raised flag. Ordering within one call is fixed but
    /// not part of the contract.
    pub fn process(&mut self, flags: u32, etc: &mut EtcController) {
        if flags & Self::THROTTLE_FLAG != 0 {
            self.send_throttle(etc);
        }
        if flags & Self::STATE_FLAG != 0 {
            self.send_state(etc);
        }
        if flags & Self::SYNC_FLAG != 0 {
            self.send_sync(etc);
        }
        if flags & Self::RX_FLAG != 0 {
            self.process_rx(etc);
        }
    }

    pub fn send_throttle(&mut self, etc: &EtcController) {
        let (he1_travel, he2_travel, pedal_travel, torque_demand) = etc.throttle_snapshot();

        let mut frame = CanFrame::new(ETC_THROTTLE_FRAME_ID);
        frame.dlc = 5;
        frame.data[0] = travel_to_wire(he1_travel);
        frame.data[1] = travel_to_wire(he2_travel);
        frame.data[2] = travel_to_wire(pedal_travel);
        frame.data[3..5].copy_from_slice(&torque_demand.to_le_bytes());

        self.interface.transmit(&frame);
    }

    pub fn send_state(&mut self, etc: &EtcController) {
        let state = etc.state_snapshot();

        let mut frame = CanFrame::new(ETC_STATE_FRAME_ID);
        frame.dlc = 8;
        frame.data[0] = (state.mbb_alive & 0x0F)
            | (state.ts_ready as u8) << 4
            | (state.motor_enabled as u8) << 5
            | (state.motor_forward as u8) << 6
            | (state.cockpit as u8) << 7;
        frame.data[1] = travel_to_wire(state.he1_travel);
        frame.data[2] = travel_to_wire(state.he2_travel);
        frame.data[3] = travel_to_wire(state.pedal_travel);
        frame.data[4..6].copy_from_slice(&state.torque_demand.to_le_bytes());
        frame.data[6..8].copy_from_slice(&pressure_to_wire(state.brakes_read).to_le_bytes());

        self.interface.transmit(&frame);
    }

    pub fn send_sync(&mut self, etc: &mut EtcController) {
        let mut frame = CanFrame::new(ETC_SYNC_FRAME_ID);
        frame.dlc = 1;
        frame.data[0] = etc.sync_snapshot();

        self.interface.transmit(&frame);
    }

    /// Drains the receive mailbox. Only the supervisory frame from the
    /// main brain board is meaningful; anything else on the bus is not for
    /// us and is dropped.
    pub fn process_rx(&mut self, etc: &mut EtcController) {
        while let Some(frame) = self.interface.receive() {
            if frame.id != MBB_STATE_FRAME_ID || frame.dlc < 3 {
                continue;
            }

            let mut state = etc.state_snapshot();
            state.ts_ready = frame.data[0] & (1 << 0) != 0;
            state.motor_enabled = frame.data[0] & (1 << 1) != 0;
            state.motor_forward = frame.data[0] & (1 << 2) != 0;
            state.cockpit = frame.data[0] & (1 << 3) != 0;
            state.brakes_read =
                u16::from_le_bytes([frame.data[1], frame.data[2]]) as f32 / 1000.0;

            etc.apply_rx_frame(state);
        }
    }
}

#[allow(unsafe_code)]
unsafe impl Send for CanWrapper<'_> {}

fn travel_to_wire(travel: f32) -> u8 {
    roundf(travel.clamp(0.0, 1.0) * 200.0) as u8
}

fn pressure_to_wire(pressure: f32) -> u16 {
    roundf(pressure * 1000.0).clamp(0.0, u16::MAX as f32) as u16
}
