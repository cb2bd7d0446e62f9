//! Shared primitive types used across the entire engine.

/// A stable identifier for one engine session.
pub type SessionId = String;

/// A regeneration counter. Bumped every time a cache entry is refilled
/// so each refill draws a distinct (but reproducible) RNG stream.
pub type Epoch = u64;
