//! Builds `stark252` without `std` for each feature combination.

#![no_std]

pub use stark252;
