//! Testing utilities for Agora form widgets.
//!
//! Everything runs headless: a [`FormTestRule`] owns a composition over
//! an in-memory applier, finds widget nodes by type or id, and plays
//! user events by invoking the handlers stored in the nodes, exactly as
//! an embedding host would.

pub mod robot;

pub use robot::*;
