//! WASM bridge exposing the Quiver workbench to a web frontend. The browser
//! owns windowing, file pickers, and drawing; this crate owns the session
//! dataset and the numerics behind each toolbar action.

pub mod session;
pub mod table;
