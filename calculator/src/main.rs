//! Bench calculator for the reciprocal engine: type `rcp <x>` or
//! `div <n> <d>` and get the hardware-model result back.

mod parser;

use std::io::{self, BufRead, Write};

use parser::Parser;

fn main() {
    let parser = Parser::new().expect("shipped lookup table must construct");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write_prompt(&mut stdout);
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };

        println!("{}", parser.execute(&line));
        write_prompt(&mut stdout);
    }
}

fn write_prompt(stdout: &mut io::Stdout) {
    print!("> ");
    let _ = stdout.flush();
}
