//! SymMerkle Core Types
//!
//! Fixed-width node values, the proof wire type, the hash primitives and the
//! commutative pair hash shared by the tree builder and the verifier.

mod config;
mod error;
mod hash;
mod types;

pub use config::*;
pub use error::*;
pub use hash::*;
pub use types::*;
