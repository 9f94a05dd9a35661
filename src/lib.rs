//! xibao: overlay short messages on a celebratory or lamenting background.
//!
//! The layout core lives in the workspace crates (`xibao-fonts`,
//! `xibao-render`). This crate adds the chat command dispatcher, the preset
//! table, an async render service and the command-line front-end.

pub mod cli;
pub mod command;
pub mod debug;
pub mod presets;
pub mod service;

pub use command::{CommandError, RenderRequest, parse_command};
pub use presets::{Preset, PresetStyle};
pub use service::{RenderService, ServiceError};
