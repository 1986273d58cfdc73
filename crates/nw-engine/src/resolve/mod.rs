//! Resolution logic for night actions, the day vote, the hunter's chained
//! shot, and the win check.
//!
//! Each submodule mutates the snapshot clone the engine hands it and writes
//! its outcome to the event log. Invalid inputs are normalized away here,
//! never raised.

pub mod day;
pub mod hunter;
pub mod night;
pub mod win;
