//! Reciprocal coefficient table. Generated by `gen_lut.rs`; do not edit by
//! hand, regenerate instead.
//!
//! Eight equal intervals over the approximation domain `[1, 2)`, one
//! degree-1 Chebyshev interpolant of `1/x` per interval. Both terms use
//! 23-bit explicit mantissas, so each packed coefficient is a
//! single-precision bit pattern widened to 64 bits.

pub const CONSTANT_TERM_SIZE: u32 = 23;
pub const LINEAR_TERM_SIZE: u32 = 23;

pub const RECIPROCAL_LUT: [[u64; 2]; 8] = [
    [1064393687, 3177392451], // [1.000, 1.125): c0 =  0.94280761, c1 = -0.055459272
    [1062723777, 3174419134], // [1.125, 1.250): c0 =  0.84327322, c1 = -0.044382803
    [1061373150, 3172255426], // [1.250, 1.375): c0 =  0.76276958, c1 = -0.036322363
    [1060258149, 3170370032], // [1.375, 1.500): c0 =  0.69631034, c1 = -0.030274361
    [1059322015, 3167871507], // [1.500, 1.625): c0 =  0.64051241, c1 = -0.025620496
    [1058524878, 3165907870], // [1.625, 1.750): c0 =  0.59299934, c1 = -0.021962937
    [1057837902, 3164336637], // [1.750, 1.875): c0 =  0.55205238, c1 = -0.019036287
    [1057239716, 3163059799], // [1.875, 2.000): c0 =  0.51639771, c1 = -0.016657991
];
