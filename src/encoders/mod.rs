//! Encoders that post-process rendered lines
//!
//! An encoder is itself a [`Renderer`](crate::core::Renderer): it wraps any
//! inner renderer and decorates the text it produces.

pub mod decorating;

pub use decorating::{DecoratingEncoder, DuplicateTo, LineTransform};
