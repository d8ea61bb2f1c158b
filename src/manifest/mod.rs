//! Zig package manifest (`build.zig.zon`) reading
//!
//! The manifest is treated as flat text, not parsed as ZON: only lines that
//! start with `.name` or `.version` are looked at.

pub mod fields;

pub use fields::ManifestFields;
