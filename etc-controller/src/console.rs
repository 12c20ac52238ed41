//! Serial console: a line-buffered REPL for bench bring-up and test
//! driving. The line discipline (echo, rubout, submit) lives in
//! [`Console`]; commands dispatch against the controller and hand any
//! main-loop side effects back as a [`ConsoleAction`].

use core::fmt::{self, Write};
use core::str::FromStr;

use strum_macros::EnumString;

use crate::EtcController;

pub const INPUT_BUFFER_SIZE: usize = 256;

const DELETE_SEQUENCE: &[u8] = b"\x08 \x08";
const RETURN_SEQUENCE: &[u8] = b"\n\r";

/// Byte-level serial seam. `read_byte` must never block: it returns `None`
/// when no input has arrived yet.
pub trait ConsoleInterface {
    fn read_byte(&mut self) -> Option<u8>;
    fn write_bytes(&mut self, bytes: &[u8]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Opcode {
    Setv,
    Setp,
    Start,
    Reset,
    Info,
    Debug,
    Help,
}

/// What the main loop must do after a command ran. The loop owns the
/// "read from hardware or use the console override" latch, so sensor
/// overrides are returned rather than applied here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleAction {
    None,
    /// Stop reading the hall-effect hardware and use this raw reading for
    /// HE2 instead.
    OverrideHe2(f32),
    /// Go back to reading the hall-effect hardware.
    ResumeHardwareRead,
}

pub struct Console<'a> {
    serial: &'a mut dyn ConsoleInterface,
    input_buffer: [u8; INPUT_BUFFER_SIZE],
    characters_read: usize,
    debug_enabled: bool,
}

impl<'a> Console<'a> {
    pub fn new(serial: &'a mut dyn ConsoleInterface) -> Self {
        Self {
            serial,
            input_buffer: [0_u8; INPUT_BUFFER_SIZE],
            characters_read: 0,
            debug_enabled: false,
        }
    }

    /// Pumps pending input. Returns true when a full line has been
    /// submitted and is ready for [`Self::run_pending_command`].
    pub fn poll(&mut self) -> bool {
        while let Some(byte) = self.serial.read_byte() {
            if byte == b'\n' || byte == b'\r' {
                self.serial.write_bytes(RETURN_SEQUENCE);
                return true;
            }

            if byte == b'\x08' || byte == b'\x7f' {
                if self.characters_read > 0 {
                    self.serial.write_bytes(DELETE_SEQUENCE);
                    self.characters_read -= 1;
                    self.input_buffer[self.characters_read] = 0;
                }
                continue;
            }

            if self.characters_read < INPUT_BUFFER_SIZE - 1 {
                self.serial.write_bytes(&[byte]);
                self.input_buffer[self.characters_read] = byte;
                self.characters_read += 1;
            }
        }

        false
    }

    /// Consumes the buffered line and executes it.
    pub fn run_pending_command(&mut self, etc: &mut EtcController) -> ConsoleAction {
        let mut line = [0_u8; INPUT_BUFFER_SIZE];
        let length = self.characters_read;
        line[..length].copy_from_slice(&self.input_buffer[..length]);

        self.input_buffer = [0_u8; INPUT_BUFFER_SIZE];
        self.characters_read = 0;

        let line = core::str::from_utf8(&line[..length]).unwrap_or("");
        let mut tokens = line.split_whitespace();
        let opcode = match tokens.next() {
            Some(opcode) => opcode,
            None => return ConsoleAction::None,
        };

        match Opcode::from_str(opcode) {
            Ok(Opcode::Setv) => match tokens.next().and_then(|token| token.parse::<f32>().ok()) {
                Some(volts) => ConsoleAction::OverrideHe2(
                    volts * EtcController::VOLT_SCALE_HE2 / EtcController::MAX_V,
                ),
                None => {
                    self.write("error: expected a voltage");
                    ConsoleAction::None
                }
            },
            Ok(Opcode::Setp) => match tokens.next().and_then(|token| token.parse::<f32>().ok()) {
                Some(percent) => {
                    // 0..100% maps onto the sensor's 0.5 V to 4.5 V output
                    // band before normalization.
                    let volts = percent / 100.0 * 4.000 + 0.500;
                    ConsoleAction::OverrideHe2(
                        volts * EtcController::VOLT_SCALE_HE2 / EtcController::MAX_V,
                    )
                }
                None => {
                    self.write("error: expected a travel percent");
                    ConsoleAction::None
                }
            },
            Ok(Opcode::Start) => {
                let mut state = etc.state();
                state.ts_ready = true;
                state.brakes_read = EtcController::BRAKE_TOL;
                etc.update_state_from_can(state);
                etc.check_start_conditions();
                ConsoleAction::None
            }
            Ok(Opcode::Reset) => {
                etc.reset_state();
                ConsoleAction::ResumeHardwareRead
            }
            Ok(Opcode::Info) => {
                self.print_info(etc);
                ConsoleAction::None
            }
            Ok(Opcode::Debug) => {
                self.toggle_debug();
                ConsoleAction::None
            }
            Ok(Opcode::Help) => {
                self.print_help();
                ConsoleAction::None
            }
            Err(_) => {
                self.write("error: unknown command. see 'help' for more information");
                ConsoleAction::None
            }
        }
    }

    pub fn write(&mut self, message: &str) {
        self.serial.write_bytes(message.as_bytes());
        self.serial.write_bytes(RETURN_SEQUENCE);
    }

    pub fn write_raw(&mut self, message: &str) {
        self.serial.write_bytes(message.as_bytes());
    }

    pub fn write_debug(&mut self, message: &str) {
        if self.debug_enabled {
            self.write(message);
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug_enabled = !self.debug_enabled;
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    fn write_line_fmt(&mut self, args: fmt::Arguments) {
        let _ = self.write_fmt(args);
        self.serial.write_bytes(RETURN_SEQUENCE);
    }

    fn print_info(&mut self, etc: &EtcController) {
        let debug_enabled = self.debug_enabled;

        self.write("console");
        self.write_line_fmt(format_args!("  debug:         {}", debug_enabled));
        self.write("state");
        self.write_line_fmt(format_args!("  mbb_alive:     {}", etc.mbb_alive()));
        self.write_line_fmt(format_args!("  brakes_read:   {}", etc.brakes_read()));
        self.write_line_fmt(format_args!("  he1_read:      {}", etc.he1_read()));
        self.write_line_fmt(format_args!("  he2_read:      {}", etc.he2_read()));
        self.write_line_fmt(format_args!("  he1_travel:    {}", etc.he1_travel()));
        self.write_line_fmt(format_args!("  he2_travel:    {}", etc.he2_travel()));
        self.write_line_fmt(format_args!("  pedal_travel:  {}", etc.pedal_travel()));
        self.write_line_fmt(format_args!("  torque_demand: {}", etc.torque_demand()));
        self.write_line_fmt(format_args!("  motor_forward: {}", etc.motor_forward()));
        self.write_line_fmt(format_args!("  motor_enabled: {}", etc.motor_enabled()));
        self.write_line_fmt(format_args!("  ts_ready:      {}", etc.ts_ready()));
        self.write_line_fmt(format_args!("  cockpit:       {}", etc.cockpit()));
    }

    fn print_help(&mut self) {
        self.write("commands");
        self.write("  setv <v>    set the hall-effect sensor voltage.");
        self.write("  setp <pct>  set the hall-effect travel percent.");
        self.write("  start       sets the motor start conditions.");
        self.write("  reset       reset the throttle controller.");
        self.write("  info        print controller state values.");
        self.write("  debug       toggle debug messages.");
        self.write("  help        print this message.");
    }
}

impl fmt::Write for Console<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.serial.write_bytes(s.as_bytes());
        Ok(())
    }
}
