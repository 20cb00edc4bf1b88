//! Text-preserving editing engine for Unity scene, prefab and asset files.

/// Block index, reference rewriting, hierarchy/prefab operations and the commit protocol.
pub mod unity;
