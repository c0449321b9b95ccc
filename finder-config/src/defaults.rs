//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields and by the host-variable fallback.

/// Base name of every pane buffer (`<cwd>/<base>-<index>`).
pub const BUFFER_NAME: &str = "finder";

/// File-type tag set on pane buffers.
pub const FILE_TYPE: &str = "finder";

/// Pane display width in columns.
pub const WIDTH: usize = 30;

pub fn buffer_name() -> String {
    BUFFER_NAME.to_string()
}

pub fn file_type() -> String {
    FILE_TYPE.to_string()
}

pub fn width() -> usize {
    WIDTH
}

pub fn bool_true() -> bool {
    true
}
