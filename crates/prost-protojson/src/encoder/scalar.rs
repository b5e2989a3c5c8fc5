use std::io::Write;

use prost_reflect::{DynamicMessage, FieldDescriptor, Kind, Value};

use crate::error::Error;

use super::emit::Emitter;

/// The literal substituted for masked string and bytes values.
const MASKED: &[u8] = b"\"***\"";

impl<W: Write> Emitter<'_, W> {
    /// Emits one singular value: a scalar field, a list element, or a map
    /// value, dispatched by the descriptor's kind.
    ///
    /// Values whose variant disagrees with the declared kind read as the
    /// kind's zero value rather than failing; descriptors and values from the
    /// reflection layer always agree, so this only matters for hand-built
    /// inputs.
    pub(super) fn emit_singular(
        &mut self,
        fd: &FieldDescriptor,
        value: &Value,
    ) -> Result<(), Error> {
        if let Some(mask) = &self.opts.field_mask_func {
            // Only string and bytes have a replacement that keeps the JSON
            // shape; other kinds emit normally even when the predicate fires.
            if matches!(fd.kind(), Kind::String | Kind::Bytes) && mask(fd) {
                self.w.write_raw(MASKED)?;
                return Ok(());
            }
        }

        match fd.kind() {
            Kind::Bool => self.w.write_bool(value.as_bool().unwrap_or_default())?,
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => {
                self.w.write_i32(value.as_i32().unwrap_or_default())?;
            }
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => {
                self.w.write_quoted_i64(value.as_i64().unwrap_or_default())?;
            }
            Kind::Uint32 | Kind::Fixed32 => {
                self.w.write_u32(value.as_u32().unwrap_or_default())?;
            }
            Kind::Uint64 | Kind::Fixed64 => {
                self.w.write_quoted_u64(value.as_u64().unwrap_or_default())?;
            }
            Kind::Float => self.emit_float32(value.as_f32().unwrap_or_default())?,
            Kind::Double => self.emit_float64(value.as_f64().unwrap_or_default())?,
            Kind::String => self.w.write_quoted_str(value.as_str().unwrap_or_default())?,
            Kind::Bytes => match value.as_bytes() {
                Some(bytes) => self.w.write_base64(bytes)?,
                None => self.w.write_base64(&[])?,
            },
            Kind::Enum(enum_descriptor) => {
                let number = value.as_enum_number().unwrap_or_default();
                if self.opts.use_enum_numbers {
                    self.w.write_i32(number)?;
                } else {
                    match enum_descriptor.get_value(number) {
                        Some(enum_value) => {
                            self.w.write_byte(b'"')?;
                            self.w.write_str(enum_value.name())?;
                            self.w.write_byte(b'"')?;
                        }
                        // Numbers outside the enum's value table fall back
                        // to bare numeric form.
                        None => self.w.write_i32(number)?,
                    }
                }
            }
            Kind::Message(message_descriptor) => match value.as_message() {
                Some(message) => self.emit_message(message)?,
                None => self.emit_message(&DynamicMessage::new(message_descriptor))?,
            },
        }
        Ok(())
    }

    /// Non-finite floats map to quoted sentinel strings; finite values go
    /// through the shortest-round-trip formatter at binary32 precision.
    pub(super) fn emit_float32(&mut self, f: f32) -> Result<(), Error> {
        if f.is_nan() {
            self.w.write_raw(b"\"NaN\"")?;
        } else if f == f32::INFINITY {
            self.w.write_raw(b"\"Infinity\"")?;
        } else if f == f32::NEG_INFINITY {
            self.w.write_raw(b"\"-Infinity\"")?;
        } else {
            self.w.write_f32(f)?;
        }
        Ok(())
    }

    pub(super) fn emit_float64(&mut self, f: f64) -> Result<(), Error> {
        if f.is_nan() {
            self.w.write_raw(b"\"NaN\"")?;
        } else if f == f64::INFINITY {
            self.w.write_raw(b"\"Infinity\"")?;
        } else if f == f64::NEG_INFINITY {
            self.w.write_raw(b"\"-Infinity\"")?;
        } else {
            self.w.write_f64(f)?;
        }
        Ok(())
    }
}
