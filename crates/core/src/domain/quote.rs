use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::io;

/// Most recent daily bar for one symbol, as returned to the caller.
///
/// Prices are passed through exactly as the provider encodes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestQuote {
    pub symbol: String,
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Lambda proxy style response: a status code plus a JSON document
/// serialized into `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(quote: &LatestQuote) -> anyhow::Result<Self> {
        Self::json(200, quote)
    }

    pub fn missing_symbol() -> anyhow::Result<Self> {
        Self::error(400, "Stock symbol is required".to_string())
    }

    pub fn no_data(symbol: &str) -> anyhow::Result<Self> {
        Self::error(404, format!("Unable to fetch stock data for '{symbol}'"))
    }

    fn error(status_code: u16, error: String) -> anyhow::Result<Self> {
        Self::json(status_code, &ErrorBody { error })
    }

    fn json<T: Serialize>(status_code: u16, body: &T) -> anyhow::Result<Self> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
        body.serialize(&mut ser)
            .context("failed to serialize response body")?;
        let body = String::from_utf8(buf).context("response body is not UTF-8")?;
        Ok(Self { status_code, body })
    }
}

/// Single-line JSON with `", "` and `": "` separators and non-ASCII written
/// as `\uXXXX` escapes, the layout Python's `json.dumps` produces.
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}
