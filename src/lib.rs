//! Two-player tic-tac-toe appliance firmware
//!
//! The game core (`game`, `melody`, `animation`, `power`, `application`)
//! only sees the capability traits in `hal` and builds on any target. The
//! register-level adapters under `hal` are compiled for AVR only.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod animation;
pub mod application;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod game;
pub mod hal;
pub mod logger;
pub mod melody;
pub mod power;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;
