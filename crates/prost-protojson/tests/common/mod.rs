#![allow(dead_code)]

use prost::Message;
use prost_protojson::{Encoder, MarshalOptions};
use prost_protojson_test_types::to_dynamic;
use prost_reflect::DynamicMessage;

/// Encodes a fixture message with default options.
pub fn encode(message: &DynamicMessage) -> String {
    encode_with(message, MarshalOptions::default())
}

/// Encodes a fixture message with the given options.
pub fn encode_with(message: &DynamicMessage, options: MarshalOptions) -> String {
    let mut out = Vec::new();
    Encoder::with_options(&mut out, options)
        .encode(message)
        .expect("encoding must succeed");
    String::from_utf8(out).expect("output must be UTF-8")
}

/// Builds a generated fixture struct into a dynamic message and encodes it
/// with default options.
pub fn encode_generated<M: Message>(message: &M, full_name: &str) -> String {
    encode(&to_dynamic(message, full_name))
}

/// Same, with options.
pub fn encode_generated_with<M: Message>(
    message: &M,
    full_name: &str,
    options: MarshalOptions,
) -> String {
    encode_with(&to_dynamic(message, full_name), options)
}
