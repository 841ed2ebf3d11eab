//! CLI command implementations.

pub mod compare;
pub mod hash;
pub mod phash;
pub mod verify;
