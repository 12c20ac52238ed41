#!/usr/bin/env rust-script
//! Regenerates `src/lut.rs`.
//!
//! Run with: `rust-script gen_lut.rs` (or `rustc gen_lut.rs -o gen_lut &&
//! ./gen_lut`) from the crate root.
//!
//! For each of `NUM_INTERVALS` equal slices of the approximation domain
//! `[1, 2)` this fits the degree-1 Chebyshev interpolant of `1/x`: sample
//! the function at the two first-kind Chebyshev points `t = +-sqrt(2)/2`
//! of the interval, then
//!
//! ```text
//! c0 = (f(t+) + f(t-)) / 2
//! c1 = (f(t+) - f(t-)) * sqrt(2)/2
//! ```
//!
//! which is the power-basis form of the interpolant in the normalized
//! interval coordinate. Coefficients are rounded to single precision and
//! emitted as their bit patterns, widened to u64 for the packed
//! sign/exponent/mantissa layout the divider consumes (with 23-bit terms
//! that layout coincides with IEEE-754 single).

use std::fs::File;
use std::io::Write;

const APPROX_DOMAIN_MIN: f64 = 1.0;
const APPROX_DOMAIN_MAX: f64 = 2.0;
const NUM_INTERVALS: usize = 8;
const TERM_SIZE: u32 = 23;

const OUTPUT_PATH: &str = "src/lut.rs";

fn main() {
    let interval_width = (APPROX_DOMAIN_MAX - APPROX_DOMAIN_MIN) / NUM_INTERVALS as f64;
    let chebyshev_point = (std::f64::consts::PI / 4.0).cos();

    let mut rows = Vec::new();
    for interval_index in 0..NUM_INTERVALS {
        let interval_min = APPROX_DOMAIN_MIN + interval_index as f64 * interval_width;
        let interval_midpoint = interval_min + interval_width / 2.0;

        let reciprocal = |t: f64| 1.0 / (interval_midpoint + t * interval_width / 2.0);
        let f_pos = reciprocal(chebyshev_point);
        let f_neg = reciprocal(-chebyshev_point);

        let c0 = ((f_pos + f_neg) / 2.0) as f32;
        let c1 = ((f_pos - f_neg) * chebyshev_point) as f32;

        rows.push((interval_min, c0, c1));
    }

    let mut output = File::create(OUTPUT_PATH).expect("cannot open output file");

    writeln!(
        output,
        "//! Reciprocal coefficient table. Generated by `gen_lut.rs`; do not edit by\n\
         //! hand, regenerate instead.\n\
         //!\n\
         //! Eight equal intervals over the approximation domain `[1, 2)`, one\n\
         //! degree-1 Chebyshev interpolant of `1/x` per interval. Both terms use\n\
         //! 23-bit explicit mantissas, so each packed coefficient is a\n\
         //! single-precision bit pattern widened to 64 bits.\n"
    )
    .unwrap();

    writeln!(output, "pub const CONSTANT_TERM_SIZE: u32 = {};", TERM_SIZE).unwrap();
    writeln!(output, "pub const LINEAR_TERM_SIZE: u32 = {};\n", TERM_SIZE).unwrap();

    writeln!(
        output,
        "pub const RECIPROCAL_LUT: [[u64; 2]; {}] = [",
        NUM_INTERVALS
    )
    .unwrap();
    for (interval_min, c0, c1) in rows {
        writeln!(
            output,
            "    [{}, {}], // [{:.3}, {:.3}): c0 = {:11.8}, c1 = {:12.9}",
            c0.to_bits(),
            c1.to_bits(),
            interval_min,
            interval_min + interval_width,
            c0,
            c1,
        )
        .unwrap();
    }
    writeln!(output, "];").unwrap();
}
