//! # Hand parsing
//!
//! A [`Dialect`] knows how to read one site's hand history text. The
//! [`HandParser`] drives a dialect and runs the reconciliation passes its
//! [`Capabilities`] ask for, producing a [`crate::history::HandRecord`].
//!
//! Failures reading the hand id, roster or actions abort the hand. Anything
//! else that can't be read is replaced by a default and reported as a
//! [`ParseWarning`].
mod dialect;
mod pipeline;
mod warning;

#[cfg(feature = "serde")]
mod json;

pub use dialect::*;
pub use pipeline::*;
pub use warning::*;

#[cfg(feature = "serde")]
pub use json::*;
