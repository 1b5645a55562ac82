//! Backend side of the GUI: command queue, worker runtime and the
//! channel-backed renderer.

pub mod commands;
pub mod renderer;
pub mod runtime;
