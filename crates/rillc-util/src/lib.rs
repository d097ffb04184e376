//! rillc-util - Foundation types for the Rill front-end.
//!
//! This crate holds the pieces shared by every phase of the front-end:
//!
//! - [`index_vec`]: typed dense indices and vectors keyed by them. The
//!   grammar machinery hands out dense integer ids for terminals,
//!   non-terminals, rules, and parse-tree nodes; typed indices keep those
//!   id spaces from being mixed up at compile time.
//! - [`diagnostic`]: the diagnostic model. Lexical and syntactic findings
//!   are collected in a [`Handler`] and never abort the pipeline; callers
//!   inspect the handler once the phase is done.
//!
//! Everything here is a zero-cost abstraction: `IndexVec<I, T>` is a plain
//! `Vec<T>` under the hood and index types are `u32` newtypes.

pub mod diagnostic;
pub mod index_vec;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use index_vec::{Idx, IndexVec};
