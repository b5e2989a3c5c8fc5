/// Errors surfaced while encoding a message.
///
/// Failures inside `google.protobuf.Any` expansion (an unresolvable type URL,
/// an undecodable payload) are recovered locally and never reach this type:
/// the encoder emits the `@type` member alone and continues. Unknown enum
/// numbers likewise degrade to numeric output without error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A field descriptor reported a kind outside the supported set.
    ///
    /// Kind dispatch is an exhaustive match over the reflection library's
    /// kind enum, so this cannot occur with descriptors produced by it; the
    /// variant exists so the error surface stays stable if the kind set ever
    /// grows.
    #[error("unknown field kind: {kind}")]
    UnknownFieldKind {
        /// Debug rendering of the unsupported kind.
        kind: String,
    },

    /// A well-known wrapper type's descriptor lacks its `value` field.
    #[error("wrapper type {type_name} is missing its value field")]
    MalformedWrapper {
        /// Full name of the malformed wrapper message type.
        type_name: String,
    },

    /// The underlying byte sink failed to write or flush.
    #[error(transparent)]
    Sink(#[from] std::io::Error),
}
