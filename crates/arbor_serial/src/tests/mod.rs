//! Behavior of the engine as a whole, through derived types.

mod dispatch;
mod objects;
mod scenario;

#[cfg(feature = "json")]
mod text;
