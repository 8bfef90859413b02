//! Fixed-width unsigned integers for proof-of-work arithmetic.
//!
//! A full node needs a handful of wide-integer computations: expanding the
//! compact "bits" field of a block header into a 256-bit target, comparing a
//! proof hash against that target, and summing per-block work estimates into
//! a cumulative chainwork total. [`U512`] covers all of them with headroom:
//! the extra 256 bits absorb the transient overshoot of target expansion and
//! work accumulation without a variable-width representation.
//!
//! Arithmetic is ring arithmetic: `+`, `-` and `*` wrap modulo `2^512`
//! rather than grow or panic. Division and modulo by zero are reported as
//! [`Error::DivisionByZero`] through [`Uint::div_mod`] and the `checked_*`
//! methods; the `/` and `%` operators panic on a zero divisor.
//!
//! Values are plain `Copy` data with no heap state; copying the word array
//! is the whole assignment story.

mod error;
mod uint;

pub use crate::error::Error;
pub use crate::uint::{Uint, U256, U512};
