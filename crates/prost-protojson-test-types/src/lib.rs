//! Generated fixture types for the `prost-protojson` test suites.
//!
//! This crate compiles `protojson/test/types.proto` (plus its transitive
//! `google.protobuf` imports) into:
//!
//! - Plain `prost` message structs for building fixtures ergonomically.
//! - A shared [`DESCRIPTOR_POOL`] containing the file descriptor set for
//!   runtime reflection, including the well-known type descriptors.
//!
//! Fixtures cross into the reflection world by re-encoding through their own
//! descriptor: build a generated struct, then call [`to_dynamic`] to obtain
//! the `DynamicMessage` the encoder walks.

use std::sync::LazyLock;

use prost::Message;
use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor};

static DESCRIPTOR_POOL_BYTES: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/file_descriptor_set.bin"));

/// Descriptor pool holding every fixture message type and the
/// `google.protobuf` well-known types they reference.
pub static DESCRIPTOR_POOL: LazyLock<DescriptorPool> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    DescriptorPool::decode(DESCRIPTOR_POOL_BYTES)
        .expect("generated file descriptor set must decode")
});

#[allow(
    missing_docs,
    clippy::doc_lazy_continuation,
    clippy::doc_markdown,
    clippy::must_use_candidate
)]
mod proto {
    include!(concat!(env!("OUT_DIR"), "/protojson.test.rs"));
}

pub use proto::*;

/// Looks up a message descriptor in the fixture pool.
///
/// # Panics
///
/// Panics if the type is not part of the fixture schema; fixture suites treat
/// that as a programming error, not a runtime condition.
#[must_use]
pub fn message_descriptor(full_name: &str) -> MessageDescriptor {
    DESCRIPTOR_POOL
        .get_message_by_name(full_name)
        .unwrap_or_else(|| panic!("unknown fixture message type: {full_name}"))
}

/// Re-encodes a generated message as a `DynamicMessage` backed by the fixture
/// pool, so it can be walked through reflection.
///
/// # Panics
///
/// Panics if the generated message does not round-trip through its own
/// descriptor, which would mean the schema and the generated code disagree.
#[must_use]
pub fn to_dynamic<M: Message>(message: &M, full_name: &str) -> DynamicMessage {
    #[allow(clippy::expect_used)]
    DynamicMessage::decode(message_descriptor(full_name), message.encode_to_vec().as_slice())
        .expect("generated message must round-trip through its own descriptor")
}
