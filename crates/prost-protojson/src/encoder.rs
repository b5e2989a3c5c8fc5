use std::io::{BufWriter, Write};

use prost_reflect::ReflectMessage;

use crate::error::Error;
use crate::options::MarshalOptions;

mod any;
mod emit;
mod scalar;
mod well_known;
mod writer;

use emit::Emitter;
use writer::JsonWriter;

/// Encodes a message into canonical JSON with default options, returning the
/// bytes.
///
/// Do not depend on the output being byte-stable across releases; equivalent
/// but differently-laid-out output is not a breaking change.
///
/// # Errors
///
/// Returns an [`Error`] if encoding fails; writing to an in-memory buffer
/// cannot fail at the sink level, so only descriptor-shape errors surface
/// here.
pub fn marshal<M: ReflectMessage>(message: &M) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    Encoder::new(&mut buf).encode(message)?;
    Ok(buf)
}

/// Streaming encoder writing canonical protobuf JSON to a byte sink.
///
/// The encoder owns a buffered writer around the sink and flushes it after
/// every [`encode`](Encoder::encode). Instances are reusable: successive
/// `encode` calls concatenate their output raw, with no separator and no
/// trailing newline. An encoder is single-threaded; create one per execution
/// context for parallel encoding.
pub struct Encoder<W: Write> {
    writer: JsonWriter<BufWriter<W>>,
    options: MarshalOptions,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder with default options.
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, MarshalOptions::default())
    }

    /// Creates an encoder with the given options.
    pub fn with_options(sink: W, options: MarshalOptions) -> Self {
        Self {
            writer: JsonWriter::new(BufWriter::new(sink)),
            options,
        }
    }

    /// Encodes one message and flushes the sink.
    ///
    /// The options are snapshotted per call, so [`set_options`] applies to
    /// subsequent calls only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sink`] when the underlying writer fails, or a
    /// descriptor-shape error ([`Error::MalformedWrapper`],
    /// [`Error::UnknownFieldKind`]) for invalid reflection input.
    ///
    /// [`set_options`]: Encoder::set_options
    pub fn encode<M: ReflectMessage>(&mut self, message: &M) -> Result<(), Error> {
        let mut options = self.options.clone();
        if options.emit_default_values {
            options.emit_unpopulated = true;
        }

        let dynamic = message.transcode_to_dynamic();
        Emitter::new(&mut self.writer, &options).emit_message(&dynamic)?;

        self.writer.flush()?;
        Ok(())
    }

    /// Replaces the options used by future [`encode`](Encoder::encode) calls.
    pub fn set_options(&mut self, options: MarshalOptions) {
        self.options = options;
    }
}
