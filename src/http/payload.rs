//! Handler payloads and their JSON encoding
//!
//! A [`Payload`] is an ordered string-to-string map. It is encoded with
//! `", "` and `": "` separators so bodies read `{"message": "pong"}`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::Formatter;
use std::io;

/// Ordered mapping of string keys to string values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    entries: Vec<(String, String)>,
}

impl Payload {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace a field, keeping the original position on replace
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as a JSON object body
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::with_capacity(32);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Compact JSON with a space after `,` and `:`
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_field_encoding() {
        let body = Payload::new().with("message", "pong").to_json().unwrap();
        assert_eq!(body, br#"{"message": "pong"}"#);
    }

    #[test]
    fn test_field_order_and_separators() {
        let body = Payload::new()
            .with("status", "ok")
            .with("detail", "all good")
            .to_json()
            .unwrap();
        assert_eq!(body, br#"{"status": "ok", "detail": "all good"}"#);
    }

    #[test]
    fn test_replace_keeps_position() {
        let payload = Payload::new()
            .with("a", "1")
            .with("b", "2")
            .with("a", "3");
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("a"), Some("3"));
        assert_eq!(payload.to_json().unwrap(), br#"{"a": "3", "b": "2"}"#);
    }

    #[test]
    fn test_escaping_and_empty() {
        let body = Payload::new().with("q", "say \"hi\"\n").to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["q"], "say \"hi\"\n");

        assert_eq!(Payload::new().to_json().unwrap(), b"{}");
        assert!(Payload::default().is_empty());
    }
}
