use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use etc_controller::console::ConsoleInterface;

/// Serial port stand-in over stdin/stdout. A detached reader thread feeds
/// bytes into a channel so `read_byte` never blocks the main loop.
pub struct StdioSerial {
    rx: Receiver<u8>,
}

impl StdioSerial {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut stdin = io::stdin();
            let mut buffer = [0_u8; 64];

            loop {
                match stdin.read(&mut buffer) {
                    Ok(0) | Err(_) => return,
                    Ok(count) => {
                        for &byte in &buffer[..count] {
                            if tx.send(byte).is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        });

        Self { rx }
    }
}

impl ConsoleInterface for StdioSerial {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.try_recv().ok()
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(bytes);
        let _ = stdout.flush();
    }
}
