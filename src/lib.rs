//! PS3 Pad Tester
//!
//! Live DualShock 3 input display with a guided USB-then-Bluetooth pairing
//! walkthrough for when no controller is connected.

pub mod config;
pub mod headless;
pub mod input;
pub mod pairing;
pub mod paths;
pub mod tester;
pub mod visualizer;
