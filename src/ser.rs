//! TOON encoding.
//!
//! This module turns Rust data structures into TOON text in two passes:
//! serde drives [`ValueSerializer`] to stage the input as a [`Value`] tree,
//! then the tree is rendered. Staging first is what lets the array encoder
//! inspect every element before committing to one of the three surface forms:
//!
//! - **Inline**: all elements are primitives — `tags[3]: a,b,c`
//! - **Tabular**: uniform objects with primitive fields — `users[2]{id,name}:`
//! - **Expanded**: everything else — one `- ` item per line
//!
//! Strings are quoted only when leaving them bare would change their meaning,
//! and numbers always render in canonical decimal form.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use toon_codec::{to_string, ToonOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let toon = to_string(&Data { x: 1, y: 2 }).unwrap();
//! assert_eq!(toon, "x: 1\ny: 2");
//! ```

use crate::options::KeyFolding;
use crate::{Delimiter, Error, Map, Number, Result, ToonOptions, Value};
use serde::{ser, Serialize};
use std::borrow::Cow;

/// Renders a value tree as TOON text.
pub(crate) fn encode_value(value: &Value, options: &ToonOptions) -> Result<String> {
    options.validate()?;
    let mut out = String::with_capacity(256);
    match value {
        Value::Object(map) => write_object(&mut out, map, options, 0, options.delimiter)?,
        Value::Array(arr) => write_array_body(&mut out, arr, options, 0, options.delimiter)?,
        primitive => write_primitive(&mut out, primitive, options.delimiter, QuoteContext::Value),
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// String quoting
// ---------------------------------------------------------------------------

/// Where a string is being emitted; decides which characters force quoting.
#[derive(Clone, Copy, PartialEq)]
enum QuoteContext {
    /// Object key or tabular header field
    Key,
    /// Object field value or bare document primitive
    Value,
    /// Inline array element or tabular row cell
    Element,
}

/// Keys matching this shape are emitted without quotes.
pub(crate) fn is_unquoted_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// A key segment eligible for folding: an identifier with no dots.
fn is_fold_segment(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Matches `-? digits (. digits)? ([eE][+-]? digits)?` with at least one digit.
/// Strings of this shape must be quoted or they would decode as numbers.
fn looks_like_number(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'-' {
        i += 1;
    }
    if i >= b.len() || !b[i].is_ascii_digit() {
        return false;
    }
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        if i >= b.len() || !b[i].is_ascii_digit() {
            return false;
        }
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < b.len() && matches!(b[i], b'e' | b'E') {
        i += 1;
        if i < b.len() && matches!(b[i], b'+' | b'-') {
            i += 1;
        }
        if i >= b.len() || !b[i].is_ascii_digit() {
            return false;
        }
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    i == b.len()
}

/// Decides whether `s` must be quoted in the given context.
fn needs_quoting(s: &str, ctx: QuoteContext, delimiter: Delimiter) -> bool {
    if s.is_empty() {
        return true;
    }
    if s == "true" || s == "false" || s == "null" {
        return true;
    }
    if looks_like_number(s) {
        return true;
    }
    // Leading or trailing chars at or below U+0020 would be lost to trimming
    let first = s.chars().next().unwrap_or(' ');
    let last = s.chars().next_back().unwrap_or(' ');
    if first as u32 <= 0x20 || last as u32 <= 0x20 {
        return true;
    }
    if s.starts_with('-') {
        return true;
    }
    if s.chars().any(|c| {
        matches!(c, '"' | '\\' | '\n' | '\r' | '\t' | ':' | '[' | ']' | '{' | '}')
            || (c as u32) < 0x20
    }) {
        return true;
    }
    match ctx {
        QuoteContext::Key => !is_unquoted_key(s),
        QuoteContext::Value | QuoteContext::Element => s.contains(delimiter.as_char()),
    }
}

/// Writes `s` inside quotes using the five defined escapes.
fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn write_string(out: &mut String, s: &str, ctx: QuoteContext, delimiter: Delimiter) {
    if needs_quoting(s, ctx, delimiter) {
        write_quoted(out, s);
    } else {
        out.push_str(s);
    }
}

fn write_key(out: &mut String, key: &str) {
    write_string(out, key, QuoteContext::Key, Delimiter::Comma);
}

// ---------------------------------------------------------------------------
// Value emission
// ---------------------------------------------------------------------------

fn push_indent(out: &mut String, options: &ToonOptions, level: usize) {
    for _ in 0..level * options.indent {
        out.push(' ');
    }
}

fn write_primitive(out: &mut String, value: &Value, delimiter: Delimiter, ctx: QuoteContext) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s, ctx, delimiter),
        // containers never reach here; format selection routes them elsewhere
        Value::Array(_) | Value::Object(_) => out.push_str("null"),
    }
}

/// Collapses a chain of single-field objects into a dotted key when key
/// folding is enabled and every segment is a plain identifier. Returns the
/// (possibly folded) key together with the value the chain ends at.
fn fold_chain<'a>(
    key: &'a str,
    value: &'a Value,
    options: &ToonOptions,
) -> (Cow<'a, str>, &'a Value) {
    if options.key_folding != KeyFolding::Safe || !is_fold_segment(key) {
        return (Cow::Borrowed(key), value);
    }

    let mut segments = vec![key];
    let mut current = value;
    loop {
        if let Some(limit) = options.flatten_depth {
            if segments.len() >= limit {
                break;
            }
        }
        let Value::Object(inner) = current else { break };
        if inner.len() != 1 {
            break;
        }
        let (k, v) = match inner.iter().next() {
            Some(entry) => entry,
            None => break,
        };
        if !is_fold_segment(k) {
            break;
        }
        segments.push(k);
        current = v;
    }

    if segments.len() > 1 {
        (Cow::Owned(segments.join(".")), current)
    } else {
        (Cow::Borrowed(key), value)
    }
}

fn write_object(
    out: &mut String,
    map: &Map,
    options: &ToonOptions,
    indent: usize,
    delimiter: Delimiter,
) -> Result<()> {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        push_indent(out, options, indent);
        let (key, value) = fold_chain(key, value, options);
        write_field(out, &key, value, options, indent, delimiter)?;
    }
    Ok(())
}

/// Emits one `key: value` field. The caller has already written the indent;
/// nested children indent one level deeper than `indent`.
fn write_field(
    out: &mut String,
    key: &str,
    value: &Value,
    options: &ToonOptions,
    indent: usize,
    delimiter: Delimiter,
) -> Result<()> {
    write_key(out, key);
    match value {
        Value::Object(map) if map.is_empty() => {
            out.push(':');
        }
        Value::Object(map) => {
            out.push(':');
            out.push('\n');
            write_object(out, map, options, indent + 1, delimiter)?;
        }
        Value::Array(arr) => {
            write_array_body(out, arr, options, indent, delimiter)?;
        }
        _ => {
            out.push_str(": ");
            write_primitive(out, value, delimiter, QuoteContext::Value);
        }
    }
    Ok(())
}

enum ArrayFormat<'a> {
    Inline,
    Tabular(&'a Map),
    Expanded,
}

/// Picks the surface form from the staged elements. Tabular requires every
/// element to be an object with the same ordered field names, all primitive.
fn select_format(arr: &[Value]) -> ArrayFormat<'_> {
    if arr.iter().all(Value::is_primitive) {
        return ArrayFormat::Inline;
    }

    let first = match arr.first() {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return ArrayFormat::Expanded,
    };
    if !first.values().all(Value::is_primitive) {
        return ArrayFormat::Expanded;
    }
    for item in &arr[1..] {
        let Value::Object(map) = item else {
            return ArrayFormat::Expanded;
        };
        if !map.keys().eq(first.keys()) || !map.values().all(Value::is_primitive) {
            return ArrayFormat::Expanded;
        }
    }
    ArrayFormat::Tabular(first)
}

/// Writes `[N]` or `[N D]` immediately after the key (or at line start for a
/// root array). The delimiter character is advertised only when it is not the
/// comma default.
fn write_array_prefix(out: &mut String, len: usize, delimiter: Delimiter) {
    out.push('[');
    out.push_str(&len.to_string());
    if delimiter != Delimiter::Comma {
        out.push(delimiter.as_char());
    }
    out.push(']');
}

/// Emits an array header and body at the position directly after its key.
/// `indent` is the level of the header line; rows and items go one deeper.
fn write_array_body(
    out: &mut String,
    arr: &[Value],
    options: &ToonOptions,
    indent: usize,
    delimiter: Delimiter,
) -> Result<()> {
    if arr.is_empty() {
        out.push_str("[0]:");
        return Ok(());
    }

    match select_format(arr) {
        ArrayFormat::Inline => {
            write_array_prefix(out, arr.len(), delimiter);
            out.push_str(": ");
            for (i, element) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(delimiter.as_char());
                }
                write_primitive(out, element, delimiter, QuoteContext::Element);
            }
        }
        ArrayFormat::Tabular(first) => {
            write_array_prefix(out, arr.len(), delimiter);
            out.push('{');
            for (i, field) in first.keys().enumerate() {
                if i > 0 {
                    out.push(delimiter.as_char());
                }
                write_key(out, field);
            }
            out.push_str("}:");
            for row in arr {
                out.push('\n');
                push_indent(out, options, indent + 1);
                if let Value::Object(map) = row {
                    for (i, (_, cell)) in map.iter().enumerate() {
                        if i > 0 {
                            out.push(delimiter.as_char());
                        }
                        write_primitive(out, cell, delimiter, QuoteContext::Element);
                    }
                }
            }
        }
        ArrayFormat::Expanded => {
            write_array_prefix(out, arr.len(), Delimiter::Comma);
            out.push(':');
            for item in arr {
                out.push('\n');
                write_list_item(out, item, options, indent + 1, delimiter)?;
            }
        }
    }
    Ok(())
}

/// Emits one expanded-form element at the given level. Structure elements put
/// their first field on the dash line; the remaining fields sit one level
/// deeper. An array appearing directly as an element resets the active
/// delimiter to comma.
fn write_list_item(
    out: &mut String,
    item: &Value,
    options: &ToonOptions,
    indent: usize,
    delimiter: Delimiter,
) -> Result<()> {
    push_indent(out, options, indent);
    match item {
        Value::Object(map) if map.is_empty() => {
            out.push('-');
        }
        Value::Object(map) => {
            out.push_str("- ");
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    push_indent(out, options, indent + 1);
                }
                let (key, value) = fold_chain(key, value, options);
                write_field(out, &key, value, options, indent + 1, delimiter)?;
            }
        }
        Value::Array(arr) => {
            out.push_str("- ");
            write_array_body(out, arr, options, indent, Delimiter::Comma)?;
        }
        primitive => {
            out.push_str("- ");
            write_primitive(out, primitive, delimiter, QuoteContext::Element);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// serde -> Value staging
// ---------------------------------------------------------------------------

/// A serde serializer whose output is a [`Value`] tree.
///
/// This is the staging half of the encoder; [`crate::to_value`] is the
/// friendly entry point.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::{ValueSerializer, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = Point { x: 1, y: 2 }.serialize(ValueSerializer).unwrap();
/// assert!(value.is_object());
/// ```
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    name: String,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    next_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: String,
    map: Map,
}

fn to_staged<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// Inserts a field, rejecting duplicates instead of silently deduping.
fn insert_unique(map: &mut Map, key: String, value: Value) -> Result<()> {
    if map.contains_key(&key) {
        return Err(Error::encoding(format!("duplicate field: {key}")));
    }
    map.insert(key, value);
    Ok(())
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Number(Number::Integer(v as i64)))
        } else {
            Ok(Value::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::from_f64(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::from_f64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v
            .iter()
            .map(|&b| Value::Number(Number::Integer(b as i64)))
            .collect();
        Ok(Value::Array(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::with_capacity(1);
        map.insert(variant.to_string(), to_staged(value)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.to_string(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: Map::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: Map::with_capacity(len),
            next_key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.to_string(),
            map: Map::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_staged(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_staged(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_staged(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_staged(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::with_capacity(1);
        map.insert(self.name, Value::Array(self.vec));
        Ok(Value::Object(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_staged(key)? {
            Value::String(s) => {
                self.next_key = Some(s);
                Ok(())
            }
            other => Err(Error::encoding(format!(
                "map keys must be strings, found {}",
                other.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::encoding("serialize_value called without serialize_key"))?;
        insert_unique(&mut self.map, key, to_staged(value)?)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        insert_unique(&mut self.map, key.to_string(), to_staged(value)?)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        insert_unique(&mut self.map, key.to_string(), to_staged(value)?)
    }

    fn end(self) -> Result<Value> {
        let mut outer = Map::with_capacity(1);
        outer.insert(self.name, Value::Object(self.map));
        Ok(Value::Object(outer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    fn encode(value: &Value) -> String {
        encode_value(value, &ToonOptions::default()).unwrap()
    }

    #[test]
    fn test_simple_object() {
        let v = toon!({"variety": "Granny Smith", "weight": 1.2});
        assert_eq!(encode(&v), "variety: Granny Smith\nweight: 1.2");
    }

    #[test]
    fn test_nested_object() {
        let v = toon!({"user": {"name": "Alice", "age": 30}});
        assert_eq!(encode(&v), "user:\n  name: Alice\n  age: 30");
    }

    #[test]
    fn test_inline_array() {
        let v = toon!({"tags": ["a", "b", "c"]});
        assert_eq!(encode(&v), "tags[3]: a,b,c");
    }

    #[test]
    fn test_tabular_array() {
        let v = toon!({"users": [{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]});
        assert_eq!(encode(&v), "users[2]{id,name}:\n  1,Alice\n  2,Bob");
    }

    #[test]
    fn test_tabular_requires_same_field_order() {
        // Same field names but different order falls back to expanded form
        let v = toon!({"rows": [{"a": 1, "b": 2}, {"b": 3, "a": 4}]});
        let out = encode(&v);
        assert!(out.starts_with("rows[2]:\n"));
        assert!(out.contains("- a: 1"));
    }

    #[test]
    fn test_root_array() {
        let v = toon!([1, 2, 3]);
        assert_eq!(encode(&v), "[3]: 1,2,3");
    }

    #[test]
    fn test_root_tabular_array() {
        let v = toon!([{"variety": "Granny Smith", "weight": 1.2}]);
        assert_eq!(encode(&v), "[1]{variety,weight}:\n  Granny Smith,1.2");
    }

    #[test]
    fn test_empty_array() {
        let v = toon!({"items": []});
        assert_eq!(encode(&v), "items[0]:");
        assert_eq!(encode(&toon!([])), "[0]:");
    }

    #[test]
    fn test_empty_object_field() {
        let v = toon!({"x": {}});
        assert_eq!(encode(&v), "x:");
    }

    #[test]
    fn test_pipe_delimiter() {
        let v = toon!({"tags": ["a", "b", "c"]});
        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        assert_eq!(encode_value(&v, &options).unwrap(), "tags[3|]: a|b|c");
    }

    #[test]
    fn test_tab_delimiter_tabular() {
        let v = toon!({"users": [{"id": 1, "name": "Alice"}]});
        let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
        assert_eq!(
            encode_value(&v, &options).unwrap(),
            "users[1\t]{id\tname}:\n  1\tAlice"
        );
    }

    #[test]
    fn test_nested_array_resets_delimiter() {
        let v = toon!({"data": [[1, 2], "x"]});
        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        let out = encode_value(&v, &options).unwrap();
        // Outer expanded array; inner inline array falls back to comma
        assert_eq!(out, "data[2]:\n  - [2]: 1,2\n  - x");
    }

    #[test]
    fn test_expanded_element_field_quotes_against_active_delimiter() {
        // element 2 forces expanded form; the scalar field keeps the
        // document delimiter for quoting
        let v = toon!({"items": [{"a": "x|y"}, 1]});
        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        assert_eq!(
            encode_value(&v, &options).unwrap(),
            "items[2]:\n  - a: \"x|y\"\n  - 1"
        );
        assert_eq!(encode(&v), "items[2]:\n  - a: x|y\n  - 1");
    }

    #[test]
    fn test_expanded_mixed_array() {
        let v = toon!({"items": [1, {"name": "Alice", "age": 30}, "text"]});
        let out = encode(&v);
        assert_eq!(
            out,
            "items[3]:\n  - 1\n  - name: Alice\n    age: 30\n  - text"
        );
    }

    #[test]
    fn test_quoting() {
        let v = toon!({
            "flag": "true",
            "digits": "123",
            "minus": "-1",
            "padded": " a ",
            "empty": "",
            "comma": "a,b",
            "colon": "a:b",
            "plain": "hello world"
        });
        let out = encode(&v);
        assert!(out.contains("flag: \"true\""));
        assert!(out.contains("digits: \"123\""));
        assert!(out.contains("minus: \"-1\""));
        assert!(out.contains("padded: \" a \""));
        assert!(out.contains("empty: \"\""));
        assert!(out.contains("comma: \"a,b\""));
        assert!(out.contains("colon: \"a:b\""));
        assert!(out.contains("plain: hello world"));
    }

    #[test]
    fn test_quoting_follows_active_delimiter() {
        let v = toon!({"tags": ["a,b", "c|d"]});
        let comma = encode(&v);
        assert_eq!(comma, "tags[2]: \"a,b\",c|d");

        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        let pipe = encode_value(&v, &options).unwrap();
        assert_eq!(pipe, "tags[2|]: a,b|\"c|d\"");
    }

    #[test]
    fn test_escapes() {
        let v = toon!({"s": "a\"b\\c\nd\re\tf"});
        assert_eq!(encode(&v), "s: \"a\\\"b\\\\c\\nd\\re\\tf\"");
    }

    #[test]
    fn test_key_quoting() {
        let v = toon!({"user-id": 1, "plain_key": 2, "dotted.key": 3});
        let out = encode(&v);
        assert!(out.contains("\"user-id\": 1"));
        assert!(out.contains("plain_key: 2"));
        assert!(out.contains("dotted.key: 3"));
    }

    #[test]
    fn test_number_canonicalization() {
        let v = toon!({"a": 1.0, "b": (-0.0), "c": 3.14, "d": 1e3});
        assert_eq!(encode(&v), "a: 1\nb: 0\nc: 3.14\nd: 1000");
    }

    #[test]
    fn test_nonfinite_floats_become_null() {
        let mut map = Map::new();
        map.insert("nan".to_string(), Value::Number(Number::Float(f64::NAN)));
        map.insert(
            "inf".to_string(),
            Value::Number(Number::Float(f64::INFINITY)),
        );
        assert_eq!(encode(&Value::Object(map)), "nan: null\ninf: null");
    }

    #[test]
    fn test_key_folding() {
        let v = toon!({"a": {"b": {"c": "value"}}});
        let options = ToonOptions::new().with_key_folding(KeyFolding::Safe);
        assert_eq!(encode_value(&v, &options).unwrap(), "a.b.c: value");
    }

    #[test]
    fn test_key_folding_stops_at_multi_field_object() {
        let v = toon!({"a": {"b": {"c": 1, "d": 2}}});
        let options = ToonOptions::new().with_key_folding(KeyFolding::Safe);
        assert_eq!(
            encode_value(&v, &options).unwrap(),
            "a.b:\n  c: 1\n  d: 2"
        );
    }

    #[test]
    fn test_key_folding_skips_non_identifier_segments() {
        let v = toon!({"a": {"odd key": {"c": 1}}});
        let options = ToonOptions::new().with_key_folding(KeyFolding::Safe);
        assert_eq!(
            encode_value(&v, &options).unwrap(),
            "a:\n  \"odd key\":\n    c: 1"
        );
    }

    #[test]
    fn test_flatten_depth() {
        let v = toon!({"a": {"b": {"c": {"d": "val"}}}});
        let options = ToonOptions::new()
            .with_key_folding(KeyFolding::Safe)
            .with_flatten_depth(2);
        assert_eq!(
            encode_value(&v, &options).unwrap(),
            "a.b:\n  c.d: val"
        );
    }

    #[test]
    fn test_duplicate_map_key_rejected() {
        use std::collections::BTreeMap;
        // serde maps cannot express duplicates, so go through the staging
        // helpers directly
        let mut map = Map::new();
        map.insert("k".to_string(), Value::from(1));
        assert!(insert_unique(&mut map, "k".to_string(), Value::from(2)).is_err());

        let ok: BTreeMap<String, i32> = [("a".to_string(), 1)].into();
        assert!(to_staged(&ok).is_ok());
    }

    #[test]
    fn test_indent_option() {
        let v = toon!({"user": {"name": "Alice"}});
        let options = ToonOptions::new().with_indent(4);
        assert_eq!(
            encode_value(&v, &options).unwrap(),
            "user:\n    name: Alice"
        );
        assert!(encode_value(&v, &ToonOptions::new().with_indent(0)).is_err());
    }
}
