//! JSON Lines rendering

use crate::error::Result;
use crate::extract::PeriodRecord;
use bytes::Bytes;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

/// File extension of JSON Lines artifacts
pub const JSONL_EXTENSION: &str = "jsonl";

/// Single-line formatter with `", "` between items and `": "` after keys
///
/// Non-ASCII text is written as UTF-8, not escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

/// Write each item as one JSON line using [`SpacedFormatter`]
///
/// Returns the number of lines written.
pub fn write_jsonl<W, T, I>(mut writer: W, items: I) -> Result<usize>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut lines = 0;
    for item in items {
        {
            let mut ser = serde_json::Serializer::with_formatter(&mut writer, SpacedFormatter);
            item.serialize(&mut ser)?;
        }
        writer.write_all(b"\n")?;
        lines += 1;
    }
    Ok(lines)
}

/// Render period records as one JSON Lines blob
pub fn serialize(records: &[PeriodRecord]) -> Result<Bytes> {
    let mut buf = Vec::with_capacity(records.len() * 128);
    write_jsonl(&mut buf, records)?;
    Ok(Bytes::from(buf))
}
