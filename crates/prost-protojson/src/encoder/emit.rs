use std::io::{self, Write};

use prost_reflect::{DynamicMessage, FieldDescriptor, MapKey, ReflectMessage, Value};

use crate::error::Error;
use crate::options::MarshalOptions;

use super::writer::JsonWriter;

/// Descriptor-driven field walk for one `encode` call.
///
/// Holds the indentation depth alongside the writer; a fresh emitter is built
/// per message so depth always starts at zero. The well-known-type dispatch,
/// scalar formatting and `Any` expansion live in sibling modules as further
/// `impl` blocks on this type.
pub(crate) struct Emitter<'a, W: Write> {
    pub(super) w: &'a mut JsonWriter<W>,
    pub(super) opts: &'a MarshalOptions,
    pub(super) depth: usize,
}

impl<'a, W: Write> Emitter<'a, W> {
    pub fn new(w: &'a mut JsonWriter<W>, opts: &'a MarshalOptions) -> Self {
        Self { w, opts, depth: 0 }
    }

    /// Generic object emission for messages without a special JSON mapping.
    ///
    /// A field is emitted iff it is populated, or it tracks no presence and
    /// `emit_unpopulated` is set. Unset members of a oneof report as
    /// unpopulated and presence-tracking, so exactly the selected arm
    /// survives this filter; extension fields are outside the descriptor's
    /// field list and never appear.
    pub(super) fn emit_object(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        self.w.write_byte(b'{')?;
        self.depth += 1;

        let descriptor = msg.descriptor();
        let mut first = true;
        for fd in descriptor.fields() {
            if !msg.has_field(&fd) && (fd.supports_presence() || !self.opts.emit_unpopulated) {
                continue;
            }

            if !first {
                self.write_comma()?;
            }
            first = false;

            self.write_indent()?;

            self.w.write_byte(b'"')?;
            self.w.write_str(field_name(self.opts, &fd))?;
            self.w.write_raw(b"\":")?;
            if self.opts.is_multiline() {
                self.w.write_byte(b' ')?;
            }

            let value = msg.get_field(&fd);
            self.emit_field(&fd, &value)?;
        }

        self.depth -= 1;
        if !first {
            self.write_indent()?;
        }
        self.w.write_byte(b'}')?;

        Ok(())
    }

    /// Routes a field value to the list, map or singular path.
    pub(super) fn emit_field(&mut self, fd: &FieldDescriptor, value: &Value) -> Result<(), Error> {
        if fd.is_map() {
            return self.emit_map(fd, value);
        }
        if fd.is_list() {
            return self.emit_list(fd, value);
        }
        self.emit_singular(fd, value)
    }

    /// List items stay on one line even in multiline mode and never receive
    /// per-item indentation.
    fn emit_list(&mut self, fd: &FieldDescriptor, value: &Value) -> Result<(), Error> {
        let items = value.as_list().unwrap_or_default();

        self.w.write_byte(b'[')?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write_comma()?;
            }
            self.emit_singular(fd, item)?;
        }
        self.w.write_byte(b']')?;
        Ok(())
    }

    /// Map entries are ordered by the ascending stringified form of their
    /// key, not by the key's native order, so int keys sort as `1, 10, 2`.
    /// String keys are JSON-escaped; all other key kinds stringify to plain
    /// decimal or boolean text and are wrapped in bare quotes.
    fn emit_map(&mut self, fd: &FieldDescriptor, value: &Value) -> Result<(), Error> {
        self.w.write_byte(b'{')?;

        let kind = fd.kind();
        let (Some(entry), Some(map)) = (kind.as_message(), value.as_map()) else {
            self.w.write_byte(b'}')?;
            return Ok(());
        };
        let (Some(key_fd), Some(value_fd)) = (
            entry.get_field_by_name("key"),
            entry.get_field_by_name("value"),
        ) else {
            self.w.write_byte(b'}')?;
            return Ok(());
        };

        let mut entries: Vec<(String, &MapKey, &Value)> = map
            .iter()
            .map(|(key, value)| (map_key_string(key), key, value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let string_keyed = matches!(key_fd.kind(), prost_reflect::Kind::String);

        for (i, (key_str, _, entry_value)) in entries.iter().enumerate() {
            if i > 0 {
                self.write_comma()?;
            }

            if string_keyed {
                self.w.write_quoted_str(key_str)?;
            } else {
                self.w.write_byte(b'"')?;
                self.w.write_str(key_str)?;
                self.w.write_byte(b'"')?;
            }
            self.w.write_byte(b':')?;

            self.emit_singular(&value_fd, entry_value)?;
        }

        self.w.write_byte(b'}')?;
        Ok(())
    }

    pub(super) fn write_comma(&mut self) -> io::Result<()> {
        self.w.write_byte(b',')
    }

    /// Colon-plus-space form used by the struct and `Any` emitters.
    pub(super) fn write_colon(&mut self) -> io::Result<()> {
        self.w.write_raw(b": ")
    }

    /// In multiline mode, a newline followed by one indent unit per level of
    /// depth. Compact mode writes nothing.
    pub(super) fn write_indent(&mut self) -> io::Result<()> {
        if !self.opts.is_multiline() {
            return Ok(());
        }
        self.w.write_byte(b'\n')?;
        for _ in 0..self.depth {
            self.w.write_str(self.opts.indent_unit())?;
        }
        Ok(())
    }
}

/// JSON name by default, proto name under `use_proto_names`.
pub(super) fn field_name<'f>(opts: &MarshalOptions, fd: &'f FieldDescriptor) -> &'f str {
    if opts.use_proto_names {
        fd.name()
    } else {
        fd.json_name()
    }
}

/// The ordering key for map entries: raw contents for string keys, decimal
/// or boolean text otherwise.
fn map_key_string(key: &MapKey) -> String {
    match key {
        MapKey::Bool(b) => b.to_string(),
        MapKey::I32(n) => n.to_string(),
        MapKey::I64(n) => n.to_string(),
        MapKey::U32(n) => n.to_string(),
        MapKey::U64(n) => n.to_string(),
        MapKey::String(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prost_reflect::MapKey;

    use super::map_key_string;

    #[test]
    fn map_keys_stringify_to_their_emitted_text() {
        assert_eq!(map_key_string(&MapKey::Bool(true)), "true");
        assert_eq!(map_key_string(&MapKey::Bool(false)), "false");
        assert_eq!(map_key_string(&MapKey::I32(-7)), "-7");
        assert_eq!(map_key_string(&MapKey::U64(18446744073709551615)), "18446744073709551615");
        assert_eq!(map_key_string(&MapKey::String("key".to_string())), "key");
    }

    #[test]
    fn stringified_ordering_interleaves_numeric_keys() {
        let mut keys: Vec<String> = [1i32, 10, 2, 21]
            .iter()
            .map(|n| map_key_string(&MapKey::I32(*n)))
            .collect();
        keys.sort();
        assert_eq!(keys, ["1", "10", "2", "21"]);
    }
}
