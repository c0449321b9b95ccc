// Library exports for the finder session layer.
//
// The embedding host implements `host::Surfaces` and `host::Interaction`,
// supplies a `tree::TreeFactory`, and drives everything through one
// `session::Session` created at startup.

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod error;
pub mod host;
pub mod pane;
pub mod session;
pub mod surface;
pub mod tree;

pub use finder_config as config;
pub use finder_keybindings as keybindings;

pub use error::{FinderError, Result};
pub use pane::Pane;
pub use session::Session;
pub use surface::SurfaceBinding;
