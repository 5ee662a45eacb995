//! # toon_codec
//!
//! A Serde-compatible codec for TOON, a line-oriented text format for
//! records, arrays, and scalars.
//!
//! ## What is TOON?
//!
//! TOON is a compact, human-readable notation: one `key : value` binding per
//! line, nesting by two-space indentation, and arrays that pick the tightest
//! of four shapes (inline, tabular, block, empty) based on their contents.
//! There are no braces, no trailing commas, and no escape sequences.
//!
//! ## Key Features
//!
//! - **Serde Compatible**: Works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`; `#[serde(rename)]` and
//!   `#[serde(skip_serializing_if)]` control key names and omission
//! - **Tabular Arrays**: Arrays of flat records serialize as a header plus
//!   one row per element
//! - **Order Preserving**: Records encode their fields in binding order and
//!   decode into an insertion-ordered map
//! - **Lenient Decoder**: Unknown keys and unrecognized lines are skipped;
//!   declared element counts are enforced
//! - **No Unsafe Code**: Written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id : 123\nname : Alice\nactive : true\n");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Tabular Arrays
//!
//! ```rust
//! use serde::Serialize;
//! use toon_codec::to_string;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Catalog {
//!     products: Vec<Product>,
//! }
//!
//! let catalog = Catalog {
//!     products: vec![
//!         Product { id: 1, name: "Widget".to_string() },
//!         Product { id: 2, name: "Gadget".to_string() },
//!     ],
//! };
//!
//! let text = to_string(&catalog).unwrap();
//! assert_eq!(text, "products[2]{id,name}:\n  1,Widget\n  2,Gadget\n");
//! ```
//!
//! ## Dynamic Values with the toon! Macro
//!
//! ```rust
//! use toon_codec::{toon, Value};
//!
//! let data = toon!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": [1, 2, 3]
//! });
//!
//! if let Value::Record(map) = data {
//!     assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Determinism
//!
//! Encoding is deterministic for struct sources and [`RecordMap`] values:
//! fields appear in declaration or insertion order. Encoding a
//! `std::collections::HashMap` is valid but its key order is unspecified, so
//! the output text can differ between runs for the same data.

pub mod de;
pub mod error;
pub mod format;
mod infer;
pub mod macros;
pub mod map;
pub mod ser;
pub mod value;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::RecordMap;
pub use ser::ValueSerializer;
pub use value::Value;

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to a TOON string.
///
/// The value must be record shaped at the top level (a struct, a map, or a
/// [`Value::Record`]); a document is exactly one record.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "x : 1\ny : 2\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedKind`] if the top-level value is not a record
/// or if a nested value has no TOON representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    ser::encode_value(&value)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Useful for working with TOON data dynamically when the structure isn't
/// known at compile time.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
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
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer.write_all(text.as_bytes()).map_err(Error::io)?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of TOON text.
///
/// `T` must be record shaped (a struct, a map, or [`Value`]); asking for a
/// scalar or sequence at the top level is [`Error::InvalidDestination`].
/// Keys in the input with no matching field are skipped. A field with no
/// matching key is an error unless it is an `Option` or carries a serde
/// default.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x : 1\ny : 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed TOON or its values do not fit
/// the destination type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let map = de::parse_document(s)?;
    T::deserialize(ValueDeserializer::document(Value::Record(map)))
}

/// Deserialize an instance of type `T` from an I/O stream of TOON.
///
/// # Errors
///
/// Returns an error if reading fails, the input is malformed TOON, or the
/// data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader.read_to_string(&mut string).map_err(Error::io)?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, the input is malformed
/// TOON, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an already-decoded [`Value`].
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] when a value's kind does not fit the
/// destination slot.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Decode TOON text into an existing record, merging key by key.
///
/// Keys already present in `dest` keep their position. A nested record in the
/// input merges into an existing nested record under the same key; any other
/// collision replaces the old value. This is the partial-update path: decode
/// several documents into one map to layer them.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, RecordMap, Value};
///
/// let mut config = RecordMap::new();
/// decode("host : localhost\n", &mut config).unwrap();
/// decode("port : 8080\n", &mut config).unwrap();
/// assert_eq!(config.get("port"), Some(&Value::Int(8080)));
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed TOON. `dest` keeps whatever
/// had been merged before the failing line.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(s: &str, dest: &mut RecordMap) -> Result<()> {
    de::parse_into(s, dest)
}
