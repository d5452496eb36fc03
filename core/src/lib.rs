//! Minesweeper board engine: lazy mine placement with a safe first click, flood-fill
//! expansion, flagging, chording and derived win/loss detection.
//!
//! Rendering and input handling live outside this crate. They issue commands against a
//! [`Game`] (or a [`Session`], which adds the timer and persisted preferences) and read
//! its [`Board`] back.
#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use settings::*;
pub use store::*;
pub use timer::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod session;
mod settings;
mod store;
mod timer;
mod types;
