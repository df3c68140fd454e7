//! shapegen-wire - Reference codec for the canonical wire format
//!
//! This crate provides:
//! - [`Value`] as a dynamic, shape-agnostic typed value
//! - [`WireCodec`] for the normalize/serialize/deserialize/validate transforms
//!   over a [`shapegen_core::ShapeGraph`]
//! - [`WireError`] carrying the JSON path of the failing value
//!
//! Generated code for every backend must agree with this codec on the wire.

mod codec;
mod error;
mod value;

pub use codec::{WireCodec, epoch_seconds, epoch_millis};
pub use error::{WireError, WireResult};
pub use value::Value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Value, WireCodec, WireError, WireResult};
}
