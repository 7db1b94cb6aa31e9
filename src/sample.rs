//! The numeric sample formats the resampler can be instantiated over.
//!
//! Mirrors the teacher's `Sample<F: Real>` conversion trait (get/put between
//! a storage format and a float), extended with the fixed-point machinery
//! (`Wide` accumulator type, `PRECISION`) the inner-product kernels need so
//! that [`crate::quantize`] and [`crate::kernel`] are written once and
//! instantiated for every format instead of duplicated per width.

use std::fmt;

/// Runtime tag for the format a [`Sample`] impl represents. Carried on the
/// resampler for introspection/logging even though the format itself is
/// selected at compile time via the `S: Sample` type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    S16,
    S32,
    F32,
    F64,
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleFormat::S16 => "s16",
            SampleFormat::S32 => "s32",
            SampleFormat::F32 => "f32",
            SampleFormat::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// A PCM sample format the resampler can produce and consume.
///
/// Integer formats carry a fixed-point `PRECISION` (in bits, §4.B of the
/// spec this crate implements) and a `Wide` accumulator type used to hold
/// the full-precision result of an `n_taps`-long dot product without
/// overflow. Float formats set `PRECISION = 0`; their kernels never round,
/// shift or clamp.
pub trait Sample: Copy + Send + Sync + Default + PartialOrd + fmt::Debug + 'static {
    /// Accumulator type wide enough to hold the full-precision inner product.
    type Wide: Copy + Send + Sync + Default;

    const FORMAT: SampleFormat;
    const IS_INTEGER: bool;
    /// Fixed-point precision in bits. Zero for float formats.
    const PRECISION: u32;

    fn to_f64(self) -> f64;

    /// Widen into the accumulator type for inner-product math.
    fn widen(self) -> Self::Wide;

    /// Multiply-accumulate: `acc + a * b`, computed in the wide type.
    fn mac(acc: Self::Wide, a: Self, b: Self) -> Self::Wide;

    /// Multiply a wide partial sum by a native-format weight (used to
    /// combine partial dot products with interpolation weights, §4.E/§4.F).
    fn wide_mul(a: Self::Wide, b: Self) -> Self::Wide;

    fn wide_add(a: Self::Wide, b: Self::Wide) -> Self::Wide;

    /// Collapse a wide accumulator, scaled by `2^shift`, back down to the
    /// native sample range. For integer formats this rounds (adds
    /// `1 << (shift - 1)` before an arithmetic shift) and saturates; for
    /// float formats `shift` is ignored and the value is cast directly.
    fn narrow(acc: Self::Wide, shift: u32) -> Self;

    /// Quantized representation of a real-valued tap coefficient, already
    /// pre-scaled by the caller per §4.B (`t * M` for integer formats, `t`
    /// unscaled for float formats).
    fn from_scaled_f64(t: f64) -> Self;
}

impl Sample for i16 {
    type Wide = i64;
    const FORMAT: SampleFormat = SampleFormat::S16;
    const IS_INTEGER: bool = true;
    const PRECISION: u32 = 15;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
    #[inline]
    fn widen(self) -> i64 {
        self as i64
    }
    #[inline]
    fn mac(acc: i64, a: i16, b: i16) -> i64 {
        acc + (a as i64) * (b as i64)
    }
    #[inline]
    fn wide_mul(a: i64, b: i16) -> i64 {
        a * (b as i64)
    }
    #[inline]
    fn wide_add(a: i64, b: i64) -> i64 {
        a + b
    }
    #[inline]
    fn narrow(acc: i64, shift: u32) -> i16 {
        let rounded = acc + (1i64 << (shift - 1));
        let value = rounded >> shift;
        value.clamp(i16::MIN as i64, i16::MAX as i64) as i16
    }
    #[inline]
    fn from_scaled_f64(t: f64) -> i16 {
        t.floor() as i64 as i16
    }
}

impl Sample for i32 {
    type Wide = i64;
    const FORMAT: SampleFormat = SampleFormat::S32;
    const IS_INTEGER: bool = true;
    const PRECISION: u32 = 31;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
    #[inline]
    fn widen(self) -> i64 {
        self as i64
    }
    #[inline]
    fn mac(acc: i64, a: i32, b: i32) -> i64 {
        acc + (a as i64) * (b as i64)
    }
    #[inline]
    fn wide_mul(a: i64, b: i32) -> i64 {
        a * (b as i64)
    }
    #[inline]
    fn wide_add(a: i64, b: i64) -> i64 {
        a + b
    }
    #[inline]
    fn narrow(acc: i64, shift: u32) -> i32 {
        let rounded = acc + (1i64 << (shift - 1));
        let value = rounded >> shift;
        value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
    #[inline]
    fn from_scaled_f64(t: f64) -> i32 {
        t.floor() as i64 as i32
    }
}

impl Sample for f32 {
    type Wide = f64;
    const FORMAT: SampleFormat = SampleFormat::F32;
    const IS_INTEGER: bool = false;
    const PRECISION: u32 = 0;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
    #[inline]
    fn widen(self) -> f64 {
        self as f64
    }
    #[inline]
    fn mac(acc: f64, a: f32, b: f32) -> f64 {
        acc + (a as f64) * (b as f64)
    }
    #[inline]
    fn wide_mul(a: f64, b: f32) -> f64 {
        a * (b as f64)
    }
    #[inline]
    fn wide_add(a: f64, b: f64) -> f64 {
        a + b
    }
    #[inline]
    fn narrow(acc: f64, _shift: u32) -> f32 {
        acc as f32
    }
    #[inline]
    fn from_scaled_f64(t: f64) -> f32 {
        t as f32
    }
}

impl Sample for f64 {
    type Wide = f64;
    const FORMAT: SampleFormat = SampleFormat::F64;
    const IS_INTEGER: bool = false;
    const PRECISION: u32 = 0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
    #[inline]
    fn widen(self) -> f64 {
        self
    }
    #[inline]
    fn mac(acc: f64, a: f64, b: f64) -> f64 {
        acc + a * b
    }
    #[inline]
    fn wide_mul(a: f64, b: f64) -> f64 {
        a * b
    }
    #[inline]
    fn wide_add(a: f64, b: f64) -> f64 {
        a + b
    }
    #[inline]
    fn narrow(acc: f64, _shift: u32) -> f64 {
        acc
    }
    #[inline]
    fn from_scaled_f64(t: f64) -> f64 {
        t
    }
}
