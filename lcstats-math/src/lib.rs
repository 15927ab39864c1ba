// lcstats-math/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod fourier;
pub mod normality;
pub mod optimizer;
pub mod statistics;
pub mod variability;
