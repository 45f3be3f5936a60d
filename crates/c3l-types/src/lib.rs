//! Foundation types for c3linear.
//!
//! Every other c3linear crate that deals with named classes depends on
//! `c3l-types`. The core algorithm crate is generic over its identifier and
//! does not need it.
//!
//! # Key Types
//!
//! - [`ClassName`]: Validated, dotted class name used as a hierarchy identifier
//! - [`TypeError`]: Errors raised while constructing foundation types

pub mod error;
pub mod name;

pub use error::TypeError;
pub use name::{validate_class_name, ClassName};
