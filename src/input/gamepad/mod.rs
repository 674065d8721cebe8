//! Controller input using GilRs
//!
//! The frame loop talks to devices through [`InputBackend`]. [`GilrsBackend`]
//! is the production implementation; [`DeviceRegistry`] keeps the single
//! bound controller and [`InputSnapshot`] holds its per-frame state.

pub mod backend;
pub mod buttons;
pub mod diagnostics;
pub mod provider;
pub mod registry;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{Capabilities, DeviceHandle, DeviceInfo, DisconnectError, InputBackend, InputEvent};
pub use diagnostics::print_device_diagnostics;
pub use provider::{BackendError, GilrsBackend};
pub use registry::{DeviceBinding, DeviceRegistry};
pub use snapshot::{Hat, InputSnapshot};
