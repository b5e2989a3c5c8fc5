use std::sync::Arc;

use prost_reflect::{DescriptorPool, FieldDescriptor, MessageDescriptor};

/// Predicate deciding whether a field's emitted value should be masked.
///
/// Invoked synchronously on the encoding thread for every singular value
/// (including list elements and map values). When it returns `true` for a
/// field of string or bytes kind, the value is replaced by the literal
/// `"***"`; for any other kind the result is ignored and the value emits
/// normally, since no other kind has a replacement that preserves the JSON
/// shape without changing its type.
pub type FieldMaskFn = Arc<dyn Fn(&FieldDescriptor) -> bool + Send + Sync>;

/// Looks up message types when expanding `google.protobuf.Any` payloads.
///
/// Implemented for [`DescriptorPool`], so a pool can be passed directly as
/// [`MarshalOptions::resolver`]. When no resolver is configured the encoder
/// falls back to the process-wide global pool.
pub trait Resolver: Send + Sync {
    /// Returns the descriptor for a message type given its full name.
    fn find_message_by_name(&self, name: &str) -> Option<MessageDescriptor>;

    /// Returns the descriptor for the message type named by a type URL.
    ///
    /// The default implementation takes the substring after the last `/` as
    /// the full name; URLs without a `/` are treated as bare full names.
    fn find_message_by_url(&self, url: &str) -> Option<MessageDescriptor> {
        let name = match url.rfind('/') {
            Some(idx) => &url[idx + 1..],
            None => url,
        };
        self.find_message_by_name(name)
    }
}

impl Resolver for DescriptorPool {
    fn find_message_by_name(&self, name: &str) -> Option<MessageDescriptor> {
        self.get_message_by_name(name)
    }
}

/// Configures encoding behavior.
///
/// The zero value (`MarshalOptions::default()`) produces compact output with
/// lowerCamelCase field names, enum value names, and populated fields only.
#[derive(Clone, Default)]
pub struct MarshalOptions {
    /// Indentation unit for multiline output, one copy per nesting level.
    /// If non-empty, `multiline` is treated as true. May only contain space
    /// or tab characters.
    pub indent: String,

    /// Formats the output across multiple lines. When set without `indent`,
    /// two spaces are used per nesting level.
    pub multiline: bool,

    /// Emits proto field names (snake_case) instead of lowerCamelCase JSON
    /// names.
    pub use_proto_names: bool,

    /// Emits enum values as numbers instead of their canonical names.
    pub use_enum_numbers: bool,

    /// Emits fields even when unpopulated: zero-valued proto3 scalars, empty
    /// lists as `[]`, and empty maps as `{}`. Fields that track presence
    /// (proto2 scalars, proto3 `optional`, message fields, oneof members) are
    /// still skipped when unset, so unset oneof arms never appear.
    pub emit_unpopulated: bool,

    /// Alias for `emit_unpopulated`, kept for backward compatibility.
    ///
    /// Deprecated: set `emit_unpopulated` instead.
    pub emit_default_values: bool,

    /// Reserved. Missing-required detection is not performed, so this flag
    /// currently has no effect on output.
    pub allow_partial: bool,

    /// Type lookup used when expanding `google.protobuf.Any` payloads.
    /// Defaults to the process-wide global descriptor pool.
    pub resolver: Option<Arc<dyn Resolver>>,

    /// Optional masking predicate; see [`FieldMaskFn`].
    pub field_mask_func: Option<FieldMaskFn>,
}

impl MarshalOptions {
    /// Whether output is separated onto multiple lines.
    pub(crate) fn is_multiline(&self) -> bool {
        self.multiline || !self.indent.is_empty()
    }

    /// The indentation unit written once per nesting level.
    pub(crate) fn indent_unit(&self) -> &str {
        if self.indent.is_empty() {
            "  "
        } else {
            &self.indent
        }
    }
}
