use std::collections::VecDeque;

use etc_controller::console::{Console, ConsoleAction, ConsoleInterface};
use etc_controller::EtcController;
use shared::etc_hal::EtcState;
use shared::etc_mock::EtcDriverMock;

struct SerialMock {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl SerialMock {
    fn with_input(input: &str) -> Self {
        Self {
            rx: input.bytes().collect(),
            tx: Vec::new(),
        }
    }
}

impl ConsoleInterface for SerialMock {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.tx.extend_from_slice(bytes);
    }
}

/// Feeds every staged input line through the console and collects the
/// resulting actions.
fn run_console(serial: &mut SerialMock, etc: &mut EtcController) -> Vec<ConsoleAction> {
    let mut console = Console::new(serial);
    let mut actions = Vec::new();

    while console.poll() {
        actions.push(console.run_pending_command(etc));
    }

    actions
}

fn output_of(serial: &SerialMock) -> String {
    String::from_utf8_lossy(&serial.tx).into_owned()
}

#[test]
fn echoes_input_and_submits_on_newline() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("help\n");

    run_console(&mut serial, &mut etc);

    let output = output_of(&serial);
    assert!(output.starts_with("help\n\r"));
    assert!(output.contains("commands"));
}

#[test]
fn rubout_deletes_one_character() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("inzz\x7f\x7ffo\n");

    run_console(&mut serial, &mut etc);

    let output = output_of(&serial);
    assert!(output.contains("\x08 \x08"));
    assert!(output.contains("mbb_alive"));
}

#[test]
fn rubout_on_empty_buffer_is_harmless() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("\x7f\x08help\n");

    run_console(&mut serial, &mut etc);

    assert!(output_of(&serial).contains("commands"));
}

#[test]
fn empty_line_does_nothing() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("\n");

    let actions = run_console(&mut serial, &mut etc);

    assert_eq!(actions, [ConsoleAction::None]);
    assert!(!output_of(&serial).contains("error"));
}

#[test]
fn unknown_command_reports_an_error() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("bogus\n");

    run_console(&mut serial, &mut etc);

    assert!(output_of(&serial)
        .contains("error: unknown command. see 'help' for more information"));
}

#[test]
fn setv_returns_a_scaled_override() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("setv 2.5\n");

    let actions = run_console(&mut serial, &mut etc);

    let expected = 2.5 * EtcController::VOLT_SCALE_HE2 / EtcController::MAX_V;
    assert_eq!(actions, [ConsoleAction::OverrideHe2(expected)]);
}

#[test]
fn setp_maps_percent_onto_the_sensor_band() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("setp 50\n");

    let actions = run_console(&mut serial, &mut etc);

    // 50% of travel is 2.5 V on the 0.5 V to 4.5 V output band.
    let expected = 2.5 * EtcController::VOLT_SCALE_HE2 / EtcController::MAX_V;
    assert_eq!(actions, [ConsoleAction::OverrideHe2(expected)]);
}

#[test]
fn setv_with_a_bad_argument_changes_nothing() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("setv pedal\n");

    let actions = run_console(&mut serial, &mut etc);

    assert_eq!(actions, [ConsoleAction::None]);
    assert!(output_of(&serial).contains("error: expected a voltage"));
}

#[test]
fn start_injects_the_interlock_conditions() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("start\n");

    let actions = run_console(&mut serial, &mut etc);

    assert_eq!(actions, [ConsoleAction::None]);
    assert!(etc.ts_ready());
    assert_eq!(etc.brakes_read(), EtcController::BRAKE_TOL);
    assert!(etc.motor_enabled());
}

#[test]
fn reset_resumes_hardware_reads_and_resets_state() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);

    etc.update_state_from_can(EtcState {
        motor_enabled: true,
        torque_demand: 50,
        ..EtcState::default()
    });

    let mut serial = SerialMock::with_input("reset\n");
    let actions = run_console(&mut serial, &mut etc);

    assert_eq!(actions, [ConsoleAction::ResumeHardwareRead]);
    assert_eq!(etc.state(), EtcState::reset());
}

#[test]
fn debug_toggles_and_shows_in_info() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);
    let mut serial = SerialMock::with_input("debug\ninfo\n");

    run_console(&mut serial, &mut etc);

    assert!(output_of(&serial).contains("debug:         true"));
}

#[test]
fn write_debug_is_gated_by_the_debug_flag() {
    let mut serial = SerialMock::with_input("");

    let mut console = Console::new(&mut serial);
    console.write_debug("quiet");
    console.toggle_debug();
    console.write_debug("loud");
    drop(console);

    let output = output_of(&serial);
    assert!(!output.contains("quiet"));
    assert!(output.contains("loud"));
}

#[test]
fn info_prints_every_state_field() {
    let mut driver = EtcDriverMock::new();
    let mut etc = EtcController::new(&mut driver);

    etc.update_state_from_can(EtcState {
        mbb_alive: 3,
        torque_demand: 115,
        motor_enabled: true,
        ..EtcState::default()
    });

    let mut serial = SerialMock::with_input("info\n");
    run_console(&mut serial, &mut etc);

    let output = output_of(&serial);
    for line in [
        "mbb_alive:     3",
        "torque_demand: 115",
        "motor_enabled: true",
        "motor_forward: false",
        "pedal_travel:  0",
        "ts_ready:      false",
        "cockpit:       false",
    ] {
        assert!(output.contains(line), "missing info line: {line}");
    }
}
