//! Streaming canonical-JSON encoding for Protocol Buffers messages.
//!
//! This crate walks messages through their `prost-reflect` descriptors and
//! writes the canonical [proto-JSON mapping](https://protobuf.dev/programming-guides/proto3/#json)
//! directly to any [`std::io::Write`] sink, so large messages stream without
//! a materialized intermediate document.
//!
//! # Quick start
//!
//! For one-off encoding, use the [`marshal`] convenience function:
//!
//! ```rust,no_run
//! # fn example(msg: impl prost_reflect::ReflectMessage) {
//! match prost_protojson::marshal(&msg) {
//!     Ok(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
//!     Err(e) => eprintln!("encoding failed: {e}"),
//! }
//! # }
//! ```
//!
//! For streaming or repeated encoding, construct an [`Encoder`] over a sink
//! and reuse it:
//!
//! ```rust,no_run
//! use prost_protojson::{Encoder, MarshalOptions};
//!
//! # fn example(msg: impl prost_reflect::ReflectMessage) -> Result<(), prost_protojson::Error> {
//! let mut out = Vec::new();
//! let mut encoder = Encoder::with_options(
//!     &mut out,
//!     MarshalOptions {
//!         indent: "  ".to_string(),
//!         ..MarshalOptions::default()
//!     },
//! );
//! encoder.encode(&msg)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Output rules
//!
//! - lowerCamelCase field names by default; proto names under
//!   [`MarshalOptions::use_proto_names`].
//! - 64-bit integers as quoted decimal strings, 32-bit integers bare.
//! - Floats as their shortest round-trip decimal; `NaN` and infinities as
//!   quoted sentinel strings.
//! - Enum value names by default, numbers under
//!   [`MarshalOptions::use_enum_numbers`] or for numbers missing from the
//!   value table.
//! - Bytes as standard padded Base64.
//! - Map entries ordered by ascending stringified key.
//! - Well-known types (`Timestamp`, `Duration`, `Struct`, `Value`,
//!   `ListValue`, wrappers, `Empty`, `Any`) mapped to their special JSON
//!   forms, with `Any` payloads resolved through a configurable
//!   [`Resolver`].
//! - String and bytes fields matched by
//!   [`MarshalOptions::field_mask_func`] emit the fixed `"***"` token.
//!
//! # Error types
//!
//! All failures surface as [`Error`]; `Any` expansion failures and unknown
//! enum numbers degrade gracefully instead of erroring.

#![warn(missing_docs)]

mod encoder;
mod error;
mod options;

pub use encoder::{marshal, Encoder};
pub use error::Error;
pub use options::{FieldMaskFn, MarshalOptions, Resolver};
