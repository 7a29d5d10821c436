//! # toon-codec
//!
//! An encoder and decoder for **TOON** (Token-Oriented Object Notation) with
//! full serde support.
//!
//! ## What is TOON?
//!
//! TOON is a compact, human-readable text format for JSON-shaped data. It
//! replaces braces and repeated keys with indentation and table headers,
//! which typically saves 30–60% of the tokens an LLM spends reading the same
//! structure, while remaining fully round-trippable.
//!
//! ## Key Features
//!
//! - **Three array forms**: primitive arrays inline on one line, uniform
//!   object arrays as compact tables, mixed arrays as dash lists
//! - **Minimal quoting**: strings carry quotes only when a bare spelling
//!   would be ambiguous
//! - **Serde compatible**: works with `#[derive(Serialize, Deserialize)]`
//!   out of the box
//! - **Strict decoding**: declared array lengths, table widths, duplicate
//!   keys, and indentation are validated by default
//! - **Key folding / path expansion**: `{"a":{"b":{"c":1}}}` can encode as
//!   `a.b.c: 1` and decode back losslessly
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! toon-codec = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic round trip
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let toon = to_string(&user).unwrap();
//! assert_eq!(toon, "id: 123\nname: Alice\nactive: true");
//!
//! let back: User = from_str(&toon).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### Tabular arrays
//!
//! Arrays of uniform objects serialize as tables — field names appear once:
//!
//! ```rust
//! use serde::Serialize;
//! use toon_codec::to_string;
//!
//! #[derive(Serialize)]
//! struct Product { id: u32, name: String, price: f64 }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string(), price: 9.99 },
//!     Product { id: 2, name: "Gadget".to_string(), price: 14.99 },
//! ];
//!
//! let toon = to_string(&products).unwrap();
//! assert_eq!(toon, "[2]{id,name,price}:\n  1,Widget,9.99\n  2,Gadget,14.99");
//! ```
//!
//! ### Dynamic values
//!
//! ```rust
//! use toon_codec::{toon, Value};
//!
//! let data = toon!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let Value::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ### Working with the value tree directly
//!
//! [`encode`] and [`decode`] operate on [`Value`] trees without going through
//! serde, which is handy when the structure is only known at runtime:
//!
//! ```rust
//! use toon_codec::{decode, encode, toon, ToonOptions};
//!
//! let value = decode("users[2]{id,name}:\n  1,Alice\n  2,Bob", ToonOptions::default()).unwrap();
//! let text = encode(&value, ToonOptions::default()).unwrap();
//! assert_eq!(text, "users[2]{id,name}:\n  1,Alice\n  2,Bob");
//! ```
//!
//! ## Format Reference
//!
//! See the [`spec`] module for the complete wire-format description.

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod spec;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::Map;
pub use options::{Delimiter, KeyFolding, ToonOptions};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;

/// Render a value tree as TOON text.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon, ToonOptions};
///
/// let value = toon!({"tags": ["a", "b"]});
/// let text = encode(&value, ToonOptions::default()).unwrap();
/// assert_eq!(text, "tags[2]: a,b");
/// ```
///
/// # Errors
///
/// Returns an error when the options are invalid.
pub fn encode(value: &Value, options: ToonOptions) -> Result<String> {
    ser::encode_value(value, &options)
}

/// Parse TOON text into a value tree.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, toon, ToonOptions};
///
/// let value = decode("name: Alice\nage: 30", ToonOptions::default()).unwrap();
/// assert_eq!(value, toon!({"name": "Alice", "age": 30}));
/// ```
///
/// # Errors
///
/// Returns an error when the input is not valid TOON or fails strict-mode
/// validation. Parse and validation errors carry 1-based line and column
/// locations.
pub fn decode(input: &str, options: ToonOptions) -> Result<Value> {
    de::decode_value(input, &options)
}

/// Serialize any `T: Serialize` to a TOON string.
///
/// # Examples
///
/// ```rust
/// use toon_codec::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let toon = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(toon, "x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g., a map with
/// non-string keys or a duplicated field name).
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, ToonOptions::default())
}

/// Serialize any `T: Serialize` to a TOON string with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_string_with_options, ToonOptions, Delimiter};
///
/// let tags = vec!["a", "b", "c"];
/// let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
/// let toon = to_string_with_options(&tags, options).unwrap();
/// assert_eq!(toon, "[3|]: a|b|c");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the options are
/// invalid.
pub fn to_string_with_options<T>(value: &T, options: ToonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let staged = to_value(value)?;
    ser::encode_value(&staged, &options)
}

/// Convert any `T: Serialize` into a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a TOON value.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a writer in TOON format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, ToonOptions::default())
}

/// Serialize any `T: Serialize` to a writer in TOON format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: ToonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let toon_string = to_string_with_options(value, options)?;
    writer
        .write_all(toon_string.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of TOON text.
///
/// # Examples
///
/// ```rust
/// use toon_codec::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or cannot be deserialized
/// to type `T`. Parse errors include line and column information.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, ToonOptions::default())
}

/// Deserialize an instance of type `T` from TOON text with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{from_str_with_options, ToonOptions};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Data { items: Vec<String> }
///
/// // Non-strict decoding trusts the actual element count
/// let options = ToonOptions::new().with_strict(false);
/// let data: Data = from_str_with_options("items[3]: a,b", options).unwrap();
/// assert_eq!(data.items, vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON, fails strict-mode
/// validation, or cannot be deserialized to type `T`.
pub fn from_str_with_options<T>(s: &str, options: ToonOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = de::decode_value(s, &options)?;
    from_value(value)
}

/// Deserialize an instance of type `T` from an already-parsed [`Value`].
///
/// # Examples
///
/// ```rust
/// use toon_codec::{from_value, toon};
///
/// let numbers: Vec<i32> = from_value(toon!([1, 2, 3])).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the value does not fit type `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    de::value_into(value)
}

/// Deserialize an instance of type `T` from bytes of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOON, or
/// cannot be deserialized to type `T`.
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of TOON.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOON, or the
/// data cannot be deserialized to type `T`.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let toon = to_string(&point).unwrap();
        assert_eq!(toon, "x: 1\ny: 2");
        let point_back: Point = from_str(&toon).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let toon = to_string(&user).unwrap();
        let user_back: User = from_str(&toon).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_to_value() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            Value::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&Value::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&Value::Number(Number::Integer(2))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_from_value() {
        let point: Point = from_value(toon!({"x": 1, "y": 2})).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let toon = to_string(&numbers).unwrap();
        assert_eq!(toon, "[5]: 1,2,3,4,5");
        let numbers_back: Vec<i32> = from_str(&toon).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_value_roundtrip() {
        let value = toon!({
            "name": "Alice",
            "scores": [95, 87, 92],
            "meta": {"verified": true}
        });
        let text = encode(&value, ToonOptions::default()).unwrap();
        let back = decode(&text, ToonOptions::default()).unwrap();
        assert_eq!(value, back);
    }

    #[test]
    fn test_writer_reader() {
        let point = Point { x: 1, y: 2 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        let back: Point = from_reader(std::io::Cursor::new(buffer)).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn test_from_slice() {
        let point: Point = from_slice(b"x: 1\ny: 2").unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_custom_options() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
            let options = ToonOptions::new().with_delimiter(delimiter);
            let toon = to_string_with_options(&user, options).unwrap();
            let user_back: User = from_str(&toon).unwrap();
            assert_eq!(user, user_back);
        }
    }
}
