//! Application module: the view model the TUI draws from.
//!
//! `App` only holds what the terminal needs on top of the player: which pane
//! has focus, where the cursors are and the last status message. Playback
//! state itself lives in the controller.

mod model;

pub use model::*;
