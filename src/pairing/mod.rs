//! Controller pairing: the on-screen guide and the external helper

pub mod guide;
pub mod helper;

pub use guide::{Emphasis, GuideInput, GuideStep, Instruction, PairingGuide, Transition};
pub use helper::{HelperError, PairingHelper, SixpairHelper};
