//! Composition runtime for the Agora form toolkit.
//!
//! Content is written as plain functions that emit retained nodes
//! through an installed [`Composer`]. Positions in the source, turned
//! into keys by [`location_key`], decide which remembered values and
//! nodes a later pass picks back up. State written through
//! [`MutableState`] marks the owning [`Composition`] dirty so the host
//! knows to run another pass.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

mod composer;
mod composition;
mod node;
mod owned;
mod state;

pub use composer::{with_current_composer, Composer, Key};
pub use composition::Composition;
pub use node::{Applier, MemoryApplier, Node, NodeError, NodeId};
pub use owned::Owned;
pub use state::{MutableState, Runtime, RuntimeHandle};

// Lets code inside this crate (tests included) use the `agora_core::`
// paths that `#[composable]` expands to.
extern crate self as agora_core;

/// Group key for a call site. The macro passes `file!`, `line!` and
/// `column!`; the mix only has to be stable and well spread.
pub fn location_key(file: &str, line: u32, column: u32) -> Key {
    let mut hasher = FxHasher::default();
    file.hash(&mut hasher);
    line.hash(&mut hasher);
    column.hash(&mut hasher);
    hasher.finish()
}

/// Remembers `init`'s value at the current position. See
/// [`Composer::remember`].
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Owned<T> {
    with_current_composer(|composer| composer.remember(init))
}

/// Remembered state slot at the current position.
#[allow(non_snake_case)]
pub fn useState<T: 'static>(init: impl FnOnce() -> T) -> MutableState<T> {
    with_current_composer(|composer| composer.use_state(init))
}

/// State bound to the current composition but owned by the caller.
#[allow(non_snake_case)]
pub fn mutableStateOf<T: 'static>(value: T) -> MutableState<T> {
    with_current_composer(|composer| composer.mutable_state_of(value))
}

/// Runs `content` in a group keyed by `key`'s hash instead of the call
/// site. Rows of a collection keep their identity across reorders when
/// emitted through this.
pub fn with_key<K: Hash + ?Sized, R>(key: &K, content: impl FnOnce() -> R) -> R {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    let key = hasher.finish();
    with_current_composer(|composer| composer.with_group(key, |_| content()))
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;
