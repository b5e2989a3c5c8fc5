use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

/// Low-level JSON token writer over a byte sink.
///
/// Streams strings without building large intermediates and formats numbers
/// through stack buffers. Knows nothing about descriptors; the emitter layers
/// field-walk logic on top.
pub(crate) struct JsonWriter<W: Write> {
    w: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }

    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.w.write_all(bytes)
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.w.write_all(s.as_bytes())
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) -> io::Result<()> {
        self.w.write_all(&[b])
    }

    pub fn write_bool(&mut self, b: bool) -> io::Result<()> {
        self.write_raw(if b { b"true" } else { b"false" })
    }

    pub fn write_null(&mut self) -> io::Result<()> {
        self.write_raw(b"null")
    }

    /// Bare decimal; 32-bit integers are representable in JSON numbers.
    pub fn write_i32(&mut self, n: i32) -> io::Result<()> {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(n))
    }

    pub fn write_u32(&mut self, n: u32) -> io::Result<()> {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(n))
    }

    /// Bare decimal. Callers quote 64-bit field values themselves; the bare
    /// form is also needed for duration seconds.
    pub fn write_i64(&mut self, n: i64) -> io::Result<()> {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(n))
    }

    pub fn write_u64(&mut self, n: u64) -> io::Result<()> {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(n))
    }

    /// Quoted decimal; the mapping requires 64-bit integers as JSON strings
    /// since a double cannot represent the full range.
    pub fn write_quoted_i64(&mut self, n: i64) -> io::Result<()> {
        self.write_byte(b'"')?;
        self.write_i64(n)?;
        self.write_byte(b'"')
    }

    pub fn write_quoted_u64(&mut self, n: u64) -> io::Result<()> {
        self.write_byte(b'"')?;
        self.write_u64(n)?;
        self.write_byte(b'"')
    }

    /// Shortest round-trip decimal at binary32 precision. Finite input only.
    pub fn write_f32(&mut self, f: f32) -> io::Result<()> {
        let mut buf = ryu::Buffer::new();
        let mut out = String::with_capacity(24);
        layout_shortest(buf.format_finite(f), &mut out);
        self.write_str(&out)
    }

    /// Shortest round-trip decimal at binary64 precision. Finite input only.
    pub fn write_f64(&mut self, f: f64) -> io::Result<()> {
        let mut buf = ryu::Buffer::new();
        let mut out = String::with_capacity(32);
        layout_shortest(buf.format_finite(f), &mut out);
        self.write_str(&out)
    }

    /// Standard padded Base64 inside JSON quotes.
    pub fn write_base64(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_byte(b'"')?;
        self.write_str(&BASE64_STANDARD.encode(bytes))?;
        self.write_byte(b'"')
    }

    /// JSON string with minimal escaping.
    ///
    /// Only `"`, `\` and control bytes below 0x20 are escaped; everything
    /// else, including multibyte UTF-8, passes through verbatim. A scan
    /// first checks whether any escape is needed so clean strings go out in
    /// a single write between quotes.
    pub fn write_quoted_str(&mut self, s: &str) -> io::Result<()> {
        let bytes = s.as_bytes();

        if !bytes.iter().any(|&b| needs_escape(b)) {
            self.write_byte(b'"')?;
            self.write_raw(bytes)?;
            return self.write_byte(b'"');
        }

        self.write_byte(b'"')?;
        let mut run_start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if !needs_escape(b) {
                continue;
            }
            if run_start < i {
                self.write_raw(&bytes[run_start..i])?;
            }
            match b {
                b'"' => self.write_raw(b"\\\"")?,
                b'\\' => self.write_raw(b"\\\\")?,
                b'\n' => self.write_raw(b"\\n")?,
                b'\r' => self.write_raw(b"\\r")?,
                b'\t' => self.write_raw(b"\\t")?,
                0x08 => self.write_raw(b"\\b")?,
                0x0c => self.write_raw(b"\\f")?,
                _ => write!(self.w, "\\u{b:04x}")?,
            }
            run_start = i + 1;
        }
        if run_start < bytes.len() {
            self.write_raw(&bytes[run_start..])?;
        }
        self.write_byte(b'"')
    }
}

#[inline]
fn needs_escape(b: u8) -> bool {
    b < 0x20 || b == b'"' || b == b'\\'
}

/// Re-lays-out a shortest-round-trip decimal into the reference encoder's
/// notation: fixed form while the leading digit's decimal exponent stays in
/// `[-4, 6)`, otherwise scientific form `d[.ddd]e±XX` with a mandatory sign
/// and at least two exponent digits. Integer-valued floats carry no
/// fractional part, and negative zero keeps its sign.
///
/// The input is whatever notation the shortest formatter chose (`3.14`,
/// `0.0001`, `1e16`, `-2.5e-8`); only the digits and exponent are kept.
fn layout_shortest(shortest: &str, out: &mut String) {
    let (sign, rest) = match shortest.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", shortest),
    };

    let (mantissa, exp) = match rest.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (rest, 0),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);

    // Decimal exponent of the leading significant digit.
    let leading_zeros = digits.len() - digits.trim_start_matches('0').len();
    if leading_zeros == digits.len() {
        out.push_str(sign);
        out.push('0');
        return;
    }
    let exp10 = int_part.len() as i32 - 1 - leading_zeros as i32 + exp;

    let digits = digits.trim_start_matches('0').trim_end_matches('0');

    out.push_str(sign);
    if !(-4..6).contains(&exp10) {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exp10 < 0 { '-' } else { '+' });
        let magnitude = exp10.unsigned_abs();
        if magnitude < 10 {
            out.push('0');
        }
        let mut buf = itoa::Buffer::new();
        out.push_str(buf.format(magnitude));
    } else if exp10 < 0 {
        out.push_str("0.");
        for _ in exp10 + 1..0 {
            out.push('0');
        }
        out.push_str(digits);
    } else {
        let int_digits = exp10 as usize + 1;
        if digits.len() <= int_digits {
            out.push_str(digits);
            for _ in digits.len()..int_digits {
                out.push('0');
            }
        } else {
            out.push_str(&digits[..int_digits]);
            out.push('.');
            out.push_str(&digits[int_digits..]);
        }
    }
}
