//! Tools shared by the proc-macro crates of the workspace.
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro support crate")]
#![allow(clippy::std_instead_of_core, reason = "proc-macro support crate")]

mod manifest;

pub use manifest::Manifest;
