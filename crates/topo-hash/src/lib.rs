//! Object identity for the topo-order workspace.
//!
//! Provides [`ObjectId`], the fixed-length content hash that keys every
//! commit in the graph, together with hex parsing and the streaming
//! [`Hasher`] used to verify loose objects.

mod algorithm;
mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use algorithm::HashAlgorithm;
pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;
