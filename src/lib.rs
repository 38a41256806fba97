#![no_std]

#[cfg(test)]
extern crate std;

pub mod trig;

pub use trig::{sincos, sincosf};

#[cfg(any(windows, target_arch = "arm"))]
pub use trig::sincosl;
