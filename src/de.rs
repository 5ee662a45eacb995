//! TOON decoding.
//!
//! Decoding is a two-stage walk, mirroring the encoder: a line-oriented
//! parser turns text into a [`Value::Record`] graph, then
//! [`ValueDeserializer`] feeds that graph into any `T: serde::Deserialize`.
//!
//! The parser is deliberately lenient about lines it does not understand:
//! lines with no `:` binding, blank lines, and lines indented deeper than
//! their context are skipped. Declared element counts are not lenient; input
//! ending before a count is satisfied is `UnexpectedEof`.

use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

use crate::infer::{classify, split_top_level};
use crate::{Error, RecordMap, Result, Value};

/// Recursion guard for nested records and arrays.
pub(crate) const MAX_DEPTH: usize = 64;

/// Parses a whole document into a fresh record.
pub(crate) fn parse_document(text: &str) -> Result<RecordMap> {
    let mut map = RecordMap::new();
    parse_into(text, &mut map)?;
    Ok(map)
}

/// Parses a document into an existing record. Keys already present keep
/// their position; nested records merge key by key, everything else is
/// replaced wholesale.
pub(crate) fn parse_into(text: &str, dest: &mut RecordMap) -> Result<()> {
    let lines: Vec<&str> = text.lines().collect();
    let mut parser = Parser { lines, pos: 0 };
    parser.parse_block(dest, 0, 0)
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

/// A parsed `name[count]` or `name[count sep]{fields}` binding.
struct ArrayHeader<'a> {
    name: &'a str,
    count: usize,
    sep: char,
    fields: Option<Vec<String>>,
}

/// Recognizes an array header in the text left of the colon. Returns
/// `Ok(None)` when the text is not header shaped at all (no brackets), so the
/// line falls through to the plain-key path. A bracket pair with a malformed
/// count or field list is `HeaderFormat`.
fn parse_array_header(lhs: &str, line: usize) -> Result<Option<ArrayHeader<'_>>> {
    let open = match lhs.find('[') {
        Some(i) => i,
        None => return Ok(None),
    };
    let close = match lhs[open..].find(']') {
        Some(i) => open + i,
        None => return Ok(None),
    };

    let name = lhs[..open].trim();
    // A trailing tab is the separator marker, not padding, so only spaces
    // may be trimmed before the suffix check.
    let mut inner = lhs[open + 1..close].trim_end_matches(' ');
    let mut sep = ',';
    if let Some(stripped) = inner.strip_suffix('|') {
        sep = '|';
        inner = stripped;
    } else if let Some(stripped) = inner.strip_suffix('\t') {
        sep = '\t';
        inner = stripped;
    }

    let count: usize = inner
        .trim()
        .parse()
        .map_err(|_| Error::header_format(line, format!("invalid element count {inner:?}")))?;

    let rest = lhs[close + 1..].trim();
    let fields = if rest.is_empty() {
        if sep != ',' {
            return Err(Error::header_format(
                line,
                "separator marker without a field list",
            ));
        }
        None
    } else {
        let body = rest
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .ok_or_else(|| {
                Error::header_format(line, format!("unexpected text after count: {rest:?}"))
            })?;
        let fields: Vec<String> = split_top_level(body, sep)
            .into_iter()
            .map(str::to_string)
            .collect();
        if fields.iter().any(String::is_empty) {
            return Err(Error::header_format(line, "empty field list"));
        }
        Some(fields)
    };

    Ok(Some(ArrayHeader {
        name,
        count,
        sep,
        fields,
    }))
}

impl<'a> Parser<'a> {
    /// Parses one record body: every line indented exactly `level * 2`
    /// spaces, until a shallower line or end of input.
    fn parse_block(&mut self, dest: &mut RecordMap, level: usize, depth: usize) -> Result<()> {
        if depth > MAX_DEPTH {
            return Err(Error::DepthLimit(MAX_DEPTH));
        }
        let expect = level * 2;

        while self.pos < self.lines.len() {
            let raw = self.lines[self.pos];
            let content = raw.trim_start_matches(' ');
            if content.trim().is_empty() {
                self.pos += 1;
                continue;
            }
            let indent = raw.len() - content.len();
            if indent < expect {
                return Ok(());
            }
            if indent > expect {
                // No opener claimed this line; skip it.
                self.pos += 1;
                continue;
            }

            let line_no = self.pos + 1;
            let (lhs, rhs) = match content.split_once(':') {
                Some((l, r)) => (l.trim(), r.trim()),
                None => {
                    self.pos += 1;
                    continue;
                }
            };
            self.pos += 1;

            if let Some(header) = parse_array_header(lhs, line_no)? {
                let value = self.parse_array(&header, rhs, depth + 1, line_no)?;
                dest.insert(header.name.to_string(), value);
            } else if rhs.is_empty() {
                let mut child = match dest.get_mut(lhs) {
                    Some(Value::Record(map)) => std::mem::take(map),
                    _ => RecordMap::new(),
                };
                self.parse_block(&mut child, level + 1, depth + 1)?;
                dest.insert(lhs.to_string(), Value::Record(child));
            } else {
                dest.insert(lhs.to_string(), classify(rhs, line_no)?);
            }
        }
        Ok(())
    }

    fn parse_array(
        &mut self,
        header: &ArrayHeader,
        rhs: &str,
        depth: usize,
        line_no: usize,
    ) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(Error::DepthLimit(MAX_DEPTH));
        }

        if let Some(fields) = &header.fields {
            if !rhs.is_empty() {
                return Err(Error::header_format(
                    line_no,
                    "unexpected value after tabular header",
                ));
            }
            return self.read_tabular_rows(header.count, fields, header.sep);
        }

        if !rhs.is_empty() {
            let items = match classify(rhs, line_no)? {
                Value::List(items) => items,
                single => vec![single],
            };
            if items.len() != header.count {
                return Err(Error::header_format(
                    line_no,
                    format!("declared {} elements, found {}", header.count, items.len()),
                ));
            }
            return Ok(Value::List(items));
        }

        if header.count == 0 {
            return Ok(Value::List(Vec::new()));
        }
        self.read_block_list(header.count, depth)
    }

    /// Reads exactly `count` tabular rows. Each row binds cells to `fields`
    /// positionally; missing cells become null, extra cells are dropped.
    fn read_tabular_rows(&mut self, count: usize, fields: &[String], sep: char) -> Result<Value> {
        let mut rows = Vec::with_capacity(count);
        while rows.len() < count {
            let raw = match self.lines.get(self.pos) {
                Some(l) => *l,
                None => {
                    return Err(Error::unexpected_eof(
                        self.lines.len(),
                        format!("{} more tabular rows", count - rows.len()),
                    ))
                }
            };
            self.pos += 1;
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }

            let cells = split_top_level(text, sep);
            let mut map = RecordMap::with_capacity(fields.len());
            for (j, field) in fields.iter().enumerate() {
                let value = match cells.get(j) {
                    Some(cell) => classify(cell, self.pos)?,
                    None => Value::Null,
                };
                map.insert(field.clone(), value);
            }
            rows.push(Value::Record(map));
        }
        Ok(Value::List(rows))
    }

    /// Reads exactly `count` dash elements. Lines that do not start with a
    /// dash are skipped without being counted.
    fn read_block_list(&mut self, count: usize, depth: usize) -> Result<Value> {
        let mut items = Vec::with_capacity(count);
        while items.len() < count {
            let raw = match self.lines.get(self.pos) {
                Some(l) => *l,
                None => {
                    return Err(Error::unexpected_eof(
                        self.lines.len(),
                        format!("{} more list elements", count - items.len()),
                    ))
                }
            };
            self.pos += 1;
            let line_no = self.pos;
            let text = raw.trim();
            if !text.starts_with('-') {
                continue;
            }
            let tail = text[1..].trim_start();
            items.push(self.parse_list_element(tail, depth, line_no)?);
        }
        Ok(Value::List(items))
    }

    /// Parses the text after a list dash: either a nested array header
    /// (`[N]: ...`, `[N]{...}:`) or a scalar token.
    fn parse_list_element(&mut self, tail: &str, depth: usize, line_no: usize) -> Result<Value> {
        if tail.starts_with('[') {
            if let Some((lhs, rhs)) = tail.split_once(':') {
                if let Some(header) = parse_array_header(lhs.trim(), line_no)? {
                    return self.parse_array(&header, rhs.trim(), depth + 1, line_no);
                }
            }
        }
        classify(tail, line_no)
    }
}

fn mismatch(document: bool, expected: &str, found: &str) -> Error {
    if document {
        Error::invalid_destination(format!(
            "cannot decode a document into {expected}; the destination must be record shaped"
        ))
    } else {
        Error::type_mismatch(expected, found)
    }
}

/// Serde deserializer over a decoded [`Value`] graph.
///
/// The `document` flag marks the top-level value of a decode call: a kind
/// mismatch there means the caller picked a non-record destination type, which
/// is `InvalidDestination` rather than `TypeMismatch`.
pub struct ValueDeserializer {
    value: Value,
    document: bool,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer {
            value,
            document: false,
        }
    }

    pub(crate) fn document(value: Value) -> Self {
        ValueDeserializer {
            value,
            document: true,
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        mismatch(self.document, expected, self.value.kind())
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::List(items) => visitor.visit_seq(SeqDeserializer {
                iter: items.into_iter(),
            }),
            Value::Record(map) => visitor.visit_map(MapDeserializer {
                iter: map.into_iter(),
                value: None,
            }),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Bool(b) => visitor.visit_bool(b),
            _ => Err(self.mismatch("bool")),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        // Integral floats count: a float written as `2` reads back as an
        // integer, and the reverse coercion keeps the pairing symmetric.
        match self.value.as_i64() {
            Some(i) => visitor.visit_i64(i),
            None => Err(self.mismatch("integer")),
        }
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value.as_f64() {
            Some(f) => visitor.visit_f64(f),
            None => Err(self.mismatch("float")),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if let Value::String(s) = &self.value {
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return visitor.visit_char(c);
            }
        }
        Err(self.mismatch("single-character string"))
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_string(s),
            _ => Err(self.mismatch("string")),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match &self.value {
            Value::List(items) => {
                let mut bytes = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_i64().and_then(|i| u8::try_from(i).ok()) {
                        Some(b) => bytes.push(b),
                        None => return Err(self.mismatch("byte list")),
                    }
                }
                visitor.visit_byte_buf(bytes)
            }
            _ => Err(self.mismatch("byte list")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(ValueDeserializer::new(value)),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            _ => Err(self.mismatch("null")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::List(items) => visitor.visit_seq(SeqDeserializer {
                iter: items.into_iter(),
            }),
            _ => Err(self.mismatch("list")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Record(map) => visitor.visit_map(MapDeserializer {
                iter: map.into_iter(),
                value: None,
            }),
            _ => Err(self.mismatch("record")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            _ => Err(self.mismatch("string (unit enum variant)")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(KeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::custom("next_value_seed called without next_key_seed"))?;
        seed.deserialize(ValueDeserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct KeyDeserializer {
    key: String,
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string bytes
        byte_buf option unit unit_struct newtype_struct seq tuple tuple_struct
        map struct enum identifier ignored_any
    }
}
