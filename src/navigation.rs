//! Navigation engine: picks the next `(album, track)` for next/previous
//! requests and for a track playing to its end.

mod engine;

pub use engine::{NavigationDecision, Trigger, decide};
