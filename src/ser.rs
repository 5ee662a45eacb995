//! TOON encoding.
//!
//! Encoding is a two-stage walk: [`ValueSerializer`] lowers any
//! `T: serde::Serialize` into a [`Value`] graph (field declaration order
//! becomes binding order), then the writer functions emit text. A document is
//! exactly one record; bare scalars or arrays at top level are rejected.
//!
//! Array shape selection, in priority order:
//!
//! 1. empty            -> `key[0]: `
//! 2. same-kind scalars (nulls allowed) -> `key[N]: v1,v2,...,vN`
//! 3. all records with scalar cells -> `key[N]{f1,f2}:` plus one row per element
//! 4. anything else    -> `key[N]:` plus one `- value` line per element
//!
//! Tabular headers are the union of keys across elements in first-seen order;
//! an element missing a key contributes a literal `null` cell.

use crate::{Error, RecordMap, Result, Value};
use serde::{ser, Serialize};

static NULL: Value = Value::Null;

/// Characters that force a string scalar into double quotes.
///
/// Digits are in the set on purpose: the decoder's number rules only yield to
/// the string rule when a quote character is present, so any digit-bearing
/// string must carry quotes to survive a round trip.
const QUOTE_TRIGGERS: &str = "0123456789:,{}[]\"|\\-\t";

pub(crate) fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s == "true"
        || s == "false"
        || s == "null"
        || s.chars().any(|c| QUOTE_TRIGGERS.contains(c))
        || s.starts_with(' ')
        || s.ends_with(' ')
}

fn write_string(out: &mut String, s: &str) {
    if needs_quotes(s) {
        out.push('"');
        out.push_str(s);
        out.push('"');
    } else {
        out.push_str(s);
    }
}

fn write_scalar(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&f.to_string()),
        Value::String(s) => write_string(out, s),
        other => return Err(Error::unsupported_kind(format!("{} in scalar position", other.kind()))),
    }
    Ok(())
}

/// Emits a whole document. The top-level value must be a record.
pub(crate) fn encode_value(value: &Value) -> Result<String> {
    match value {
        Value::Record(map) => {
            let mut out = String::with_capacity(256);
            write_record(&mut out, map, 0)?;
            Ok(out)
        }
        other => Err(Error::unsupported_kind(format!(
            "top-level {}: a document is exactly one record",
            other.kind()
        ))),
    }
}

fn write_record(out: &mut String, map: &RecordMap, level: usize) -> Result<()> {
    for (key, value) in map {
        for _ in 0..level {
            out.push_str("  ");
        }
        match value {
            Value::Record(child) => {
                out.push_str(key);
                out.push_str(" :\n");
                write_record(out, child, level + 1)?;
            }
            Value::List(items) => {
                out.push_str(key);
                write_array(out, items, level)?;
            }
            scalar => {
                out.push_str(key);
                out.push_str(" : ");
                write_scalar(out, scalar)?;
                out.push('\n');
            }
        }
    }
    Ok(())
}

/// Emits the `[N]...` part of an array. The key (or `- ` for a nested array
/// element) has already been written by the caller.
fn write_array(out: &mut String, items: &[Value], level: usize) -> Result<()> {
    if items.is_empty() {
        out.push_str("[0]: \n");
        return Ok(());
    }

    if inline_shape(items) {
        out.push('[');
        out.push_str(&items.len().to_string());
        out.push_str("]: ");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_scalar(out, item)?;
        }
        out.push('\n');
        return Ok(());
    }

    if let Some((headers, rows)) = tabular_shape(items) {
        out.push('[');
        out.push_str(&rows.len().to_string());
        out.push_str("]{");
        out.push_str(&headers.join(","));
        out.push_str("}:\n");
        for row in rows {
            for _ in 0..=level {
                out.push_str("  ");
            }
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_scalar(out, cell)?;
            }
            out.push('\n');
        }
        return Ok(());
    }

    write_block_array(out, items, level)
}

fn write_block_array(out: &mut String, items: &[Value], level: usize) -> Result<()> {
    out.push('[');
    out.push_str(&items.len().to_string());
    out.push_str("]:\n");

    let pad = "  ".repeat(level + 1);
    for item in items {
        out.push_str(&pad);
        out.push_str("- ");
        match item {
            Value::List(sub) => write_array(out, sub, level + 1)?,
            Value::Record(map) => {
                // Record lines after the first are indented two spaces past
                // the dash so they line up with the element body.
                let mut body = String::new();
                write_record(&mut body, map, 0)?;
                if body.is_empty() {
                    out.push('\n');
                }
                for (i, line) in body.lines().enumerate() {
                    if i > 0 {
                        out.push_str(&pad);
                        out.push_str("  ");
                    }
                    out.push_str(line);
                    out.push('\n');
                }
            }
            scalar => {
                write_scalar(out, scalar)?;
                out.push('\n');
            }
        }
    }
    Ok(())
}

/// The inline shape needs every element scalar and, nulls aside, of one
/// kind. Mixed scalar kinds go to block form like any other heterogeneous
/// array; nulls are tolerated so optional values stay inline.
fn inline_shape(items: &[Value]) -> bool {
    let mut kind = None;
    for item in items {
        if !item.is_scalar() {
            return false;
        }
        if item.is_null() {
            continue;
        }
        match kind {
            None => kind = Some(item.kind()),
            Some(k) => {
                if k != item.kind() {
                    return false;
                }
            }
        }
    }
    true
}

/// Checks whether every element is a record whose values are all scalar.
/// Returns the union of keys in first-seen order and one row per element,
/// with `null` filling the cells an element lacks.
fn tabular_shape(items: &[Value]) -> Option<(Vec<&str>, Vec<Vec<&Value>>)> {
    let mut headers: Vec<&str> = Vec::new();
    let mut maps = Vec::with_capacity(items.len());

    for item in items {
        let map = match item {
            Value::Record(map) => map,
            _ => return None,
        };
        for (key, value) in map {
            if !value.is_scalar() {
                return None;
            }
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
        maps.push(map);
    }

    let rows = maps
        .into_iter()
        .map(|map| headers.iter().map(|h| map.get(h).unwrap_or(&NULL)).collect::<Vec<_>>())
        .collect();

    Some((headers, rows))
}

/// Serde serializer whose output is a [`Value`] graph.
///
/// This is the encode half of the schema boundary: `#[derive(Serialize)]`
/// (with `#[serde(rename)]` / `#[serde(skip_serializing_if)]` as needed)
/// supplies the ordered key bindings, and this serializer records them.
pub struct ValueSerializer;

pub struct SerializeList {
    items: Vec<Value>,
}

pub struct SerializeRecord {
    map: RecordMap,
    pending_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = SerializeRecord;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Int(v as i64))
        } else {
            Ok(Value::Float(v as f64))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::List(
            v.iter().map(|&b| Value::Int(b as i64)).collect(),
        ))
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
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_kind("newtype enum variant"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList> {
        Ok(SerializeList {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeList> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_kind("tuple enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeRecord> {
        Ok(SerializeRecord {
            map: RecordMap::new(),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeRecord> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_kind("struct enum variant"))
    }
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::String(s) => {
                self.pending_key = Some(s);
                Ok(())
            }
            other => Err(Error::unsupported_kind(format!(
                "{} map key: record keys must be strings",
                other.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.map))
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.map))
    }
}
