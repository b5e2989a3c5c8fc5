use std::io::Write;

use prost_reflect::{DescriptorPool, DynamicMessage, ReflectMessage};

use crate::error::Error;
use crate::options::Resolver;

use super::emit::{field_name, Emitter};

impl<W: Write> Emitter<'_, W> {
    /// Expands `google.protobuf.Any` into an object tagged with `@type`.
    ///
    /// When the payload is non-empty and its type URL resolves to a known
    /// message type, the decoded message's fields are inlined next to the
    /// tag under the usual presence rules. The envelope keeps a fixed
    /// textual layout independent of the surrounding compact/multiline mode:
    /// `", "` between members and `": "` after each key.
    ///
    /// Resolution and decode failures are recovered locally: the object
    /// closes after the `@type` member and encoding continues.
    pub(super) fn emit_any(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        let type_url = msg
            .get_field_by_name("type_url")
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        let payload = msg
            .get_field_by_name("value")
            .and_then(|value| value.as_bytes().cloned())
            .unwrap_or_default();

        self.w.write_byte(b'{')?;
        self.w.write_quoted_str("@type")?;
        self.write_colon()?;
        self.w.write_quoted_str(&type_url)?;

        if !payload.is_empty() {
            if let Some(inner) = self.resolve_payload(&type_url, &payload) {
                let descriptor = inner.descriptor();
                for fd in descriptor.fields() {
                    if !inner.has_field(&fd)
                        && (fd.supports_presence() || !self.opts.emit_unpopulated)
                    {
                        continue;
                    }

                    self.w.write_raw(b", ")?;
                    self.w.write_quoted_str(field_name(self.opts, &fd))?;
                    self.write_colon()?;

                    let value = inner.get_field(&fd);
                    self.emit_field(&fd, &value)?;
                }
            }
        }

        self.w.write_byte(b'}')?;
        Ok(())
    }

    /// Looks the type URL up through the configured resolver (the global
    /// descriptor pool when none is set) and decodes the payload against the
    /// resolved descriptor. `None` on any failure.
    fn resolve_payload(&self, type_url: &str, payload: &[u8]) -> Option<DynamicMessage> {
        let descriptor = match &self.opts.resolver {
            Some(resolver) => resolver.find_message_by_url(type_url)?,
            None => DescriptorPool::global().find_message_by_url(type_url)?,
        };
        DynamicMessage::decode(descriptor, payload).ok()
    }
}
