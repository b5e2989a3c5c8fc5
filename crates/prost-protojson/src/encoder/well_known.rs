use std::io::Write;

use chrono::{DateTime, Utc};
use prost_reflect::{DynamicMessage, MapKey, ReflectMessage, Value};

use crate::error::Error;

use super::emit::Emitter;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Well-known wrapper message types whose JSON mapping is the bare inner
/// scalar.
pub(super) fn is_wrapper_type(full_name: &str) -> bool {
    matches!(
        full_name,
        "google.protobuf.StringValue"
            | "google.protobuf.Int32Value"
            | "google.protobuf.Int64Value"
            | "google.protobuf.UInt32Value"
            | "google.protobuf.UInt64Value"
            | "google.protobuf.BoolValue"
            | "google.protobuf.FloatValue"
            | "google.protobuf.DoubleValue"
            | "google.protobuf.BytesValue"
    )
}

impl<W: Write> Emitter<'_, W> {
    /// Entry point for any message value: dispatches on the descriptor's
    /// full name to a well-known mapping, falling back to generic object
    /// emission.
    pub(crate) fn emit_message(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        let descriptor = msg.descriptor();
        match descriptor.full_name() {
            "google.protobuf.Timestamp" => self.emit_timestamp(msg),
            "google.protobuf.Duration" => self.emit_duration(msg),
            "google.protobuf.Struct" => self.emit_struct(msg),
            "google.protobuf.Value" => self.emit_value(msg),
            "google.protobuf.ListValue" => self.emit_list_value(msg),
            "google.protobuf.Any" => self.emit_any(msg),
            "google.protobuf.Empty" => {
                self.w.write_raw(b"{}")?;
                Ok(())
            }
            name if is_wrapper_type(name) => self.emit_wrapper(msg),
            _ => self.emit_object(msg),
        }
    }

    /// Wrappers unwrap to their single `value` field, emitted as a bare
    /// scalar of the matching kind.
    fn emit_wrapper(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        let descriptor = msg.descriptor();
        let Some(fd) = descriptor.get_field_by_name("value") else {
            return Err(Error::MalformedWrapper {
                type_name: descriptor.full_name().to_string(),
            });
        };
        let value = msg.get_field(&fd);
        self.emit_singular(&fd, &value)
    }

    /// RFC 3339 UTC with `Z` suffix: `"YYYY-MM-DDTHH:MM:SS[.fff...]Z"`.
    ///
    /// The fractional part appears only when `nanos > 0`, zero-padded to
    /// nine digits and then stripped of trailing zeros.
    fn emit_timestamp(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        let seconds = read_i64(msg, "seconds");
        let nanos = read_i64(msg, "nanos");

        // Out-of-range nanos borrow from or carry into the seconds
        // component; valid timestamps always have nanos in [0, 1e9).
        let whole_seconds = seconds + nanos.div_euclid(NANOS_PER_SECOND);
        let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
        let utc = DateTime::<Utc>::from_timestamp(whole_seconds, subsec)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        self.w.write_byte(b'"')?;
        self.w
            .write_str(&utc.format("%Y-%m-%dT%H:%M:%S").to_string())?;
        if nanos > 0 {
            self.write_subsecond(nanos.unsigned_abs())?;
        }
        self.w.write_raw(b"Z\"")?;
        Ok(())
    }

    /// `"<seconds>[.<frac>]s"`. Seconds and nanos share their sign; it is
    /// rendered once on the seconds component (as `-0` when only nanos are
    /// negative) and the fractional digits are always unsigned. The
    /// fractional part appears whenever `nanos != 0`.
    fn emit_duration(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        let seconds = read_i64(msg, "seconds");
        let nanos = read_i64(msg, "nanos");

        self.w.write_byte(b'"')?;
        if seconds == 0 && nanos < 0 {
            self.w.write_raw(b"-0")?;
        } else {
            self.w.write_i64(seconds)?;
        }
        if nanos != 0 {
            self.write_subsecond(nanos.unsigned_abs())?;
        }
        self.w.write_raw(b"s\"")?;
        Ok(())
    }

    fn write_subsecond(&mut self, nanos: u64) -> Result<(), Error> {
        let digits = format!("{nanos:09}");
        self.w.write_byte(b'.')?;
        self.w.write_str(digits.trim_end_matches('0'))?;
        Ok(())
    }

    /// `Struct` maps straight to a JSON object. Entries come out in the
    /// underlying map's iteration order; callers needing a deterministic
    /// layout use an ordered payload.
    pub(super) fn emit_struct(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        self.w.write_byte(b'{')?;

        let fields = msg.get_field_by_name("fields");
        if let Some(entries) = fields.as_deref().and_then(Value::as_map) {
            let mut first = true;
            for (key, value) in entries {
                let MapKey::String(key) = key else { continue };

                if !first {
                    self.write_comma()?;
                }
                first = false;

                self.w.write_quoted_str(key)?;
                self.write_colon()?;
                match value.as_message() {
                    Some(inner) => self.emit_value(inner)?,
                    None => self.w.write_null()?,
                }
            }
        }

        self.w.write_byte(b'}')?;
        Ok(())
    }

    /// `Value` emits its active `kind` arm as the corresponding plain JSON
    /// value; an unset oneof maps to `null`.
    pub(super) fn emit_value(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        let descriptor = msg.descriptor();
        let active = descriptor
            .oneofs()
            .find(|oneof| oneof.name() == "kind")
            .and_then(|oneof| oneof.fields().find(|fd| msg.has_field(fd)));
        let Some(fd) = active else {
            self.w.write_null()?;
            return Ok(());
        };

        let value = msg.get_field(&fd);
        match fd.name() {
            "null_value" => self.w.write_null()?,
            "number_value" => self.emit_float64(value.as_f64().unwrap_or_default())?,
            "string_value" => self.w.write_quoted_str(value.as_str().unwrap_or_default())?,
            "bool_value" => self.w.write_bool(value.as_bool().unwrap_or_default())?,
            "struct_value" => match value.as_message() {
                Some(inner) => self.emit_struct(inner)?,
                None => self.w.write_null()?,
            },
            "list_value" => match value.as_message() {
                Some(inner) => self.emit_list_value(inner)?,
                None => self.w.write_null()?,
            },
            _ => self.w.write_null()?,
        }
        Ok(())
    }

    /// `ListValue` is a JSON array of `Value` elements.
    pub(super) fn emit_list_value(&mut self, msg: &DynamicMessage) -> Result<(), Error> {
        self.w.write_byte(b'[')?;

        let values = msg.get_field_by_name("values");
        if let Some(items) = values.as_deref().and_then(Value::as_list) {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    self.write_comma()?;
                }
                match item.as_message() {
                    Some(inner) => self.emit_value(inner)?,
                    None => self.w.write_null()?,
                }
            }
        }

        self.w.write_byte(b']')?;
        Ok(())
    }
}

fn read_i64(msg: &DynamicMessage, field: &str) -> i64 {
    msg.get_field_by_name(field)
        .and_then(|value| value.as_i64().or_else(|| value.as_i32().map(i64::from)))
        .unwrap_or(0)
}
