//! Software-in-the-loop harness: runs the throttle controller against fake
//! hardware with the same two-context split as the target firmware. The
//! main loop pumps sensors and the console at 10 ms; a second thread plays
//! the higher-priority CAN context, waking on the event-flag set and
//! servicing every raised flag before waiting again.

mod can_bus;
mod console_io;
mod driver;
mod event_flags;

use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use etc_controller::can_wrapper::CanWrapper;
use etc_controller::console::{Console, ConsoleAction};
use etc_controller::EtcController;
use shared::etc_hal::HallEffectSensor;

use can_bus::LoopbackCanBus;
use console_io::StdioSerial;
use driver::SystemEtcDriver;
use event_flags::EventFlags;

const MAIN_LOOP_PERIOD: Duration = Duration::from_millis(10);

fn main() {
    let mut driver = SystemEtcDriver::new();
    let mut can_bus = LoopbackCanBus::new();
    let mut serial = StdioSerial::new();

    let etc = Mutex::new(EtcController::new(&mut driver));
    let can_wrapper = Mutex::new(CanWrapper::new(&mut can_bus));
    let events = EventFlags::new();

    thread::scope(|scope| {
        scope.spawn(|| can_processing(&etc, &can_wrapper, &events));
        main_loop(&etc, &can_wrapper, &events, &mut serial);
    });
}

/// The CAN context. Wakes on any raised flag, services all of them under
/// the controller lock, clears them, waits again.
fn can_processing(
    etc: &Mutex<EtcController>,
    can_wrapper: &Mutex<CanWrapper>,
    events: &EventFlags,
) -> ! {
    loop {
        let triggered = events.wait_any(CanWrapper::ALL_FLAGS);

        {
            let mut can_wrapper = can_wrapper.lock().unwrap();
            let mut etc = etc.lock().unwrap();
            can_wrapper.process(triggered, &mut etc);
        }

        events.clear(triggered);
    }
}

fn main_loop(
    etc: &Mutex<EtcController>,
    can_wrapper: &Mutex<CanWrapper>,
    events: &EventFlags,
    serial: &mut StdioSerial,
) -> ! {
    let mut console = Console::new(serial);
    console.write_raw("> ");

    let mut read_from_sensors = true;
    let mut he2_read = 0.0_f32;
    let mut last_update = Instant::now();

    loop {
        thread::sleep(MAIN_LOOP_PERIOD);
        let dt_s = last_update.elapsed().as_secs_f32();
        last_update = Instant::now();

        if read_from_sensors {
            he2_read = etc
                .lock()
                .unwrap()
                .driver
                .read_hall_effect(HallEffectSensor::He2);
        }

        if console.poll() {
            {
                let mut etc = etc.lock().unwrap();
                match console.run_pending_command(&mut etc) {
                    ConsoleAction::OverrideHe2(raw_reading) => {
                        read_from_sensors = false;
                        he2_read = raw_reading;
                    }
                    ConsoleAction::ResumeHardwareRead => read_from_sensors = true,
                    ConsoleAction::None => {}
                }
            }
            console.write_raw("> ");
        }

        // Only HE2 is wired on the current pedal harness, so HE1 is fed a
        // constant zero here just like on the board.
        etc.lock().unwrap().update_pedal_travel(0.0, he2_read);

        let due_flags = can_wrapper.lock().unwrap().update_timers(dt_s);
        if due_flags != 0 {
            events.set(due_flags);
        }
    }
}
