//! TOON decoding.
//!
//! Decoding runs in three stages: a line scanner splits the input into
//! logical lines with their indentation, a recursive-descent parser walks the
//! line stream into a [`Value`] tree, and a serde [`Deserializer`] maps that
//! tree onto the target type.
//!
//! The parser honors the configured strictness: with `strict` on (the
//! default), declared array lengths must match the body, tabular rows must
//! match the header width, keys must be unique, and blank lines may not
//! appear between the rows or elements of an array. With `strict` off the
//! decoder trusts the actual element count, skips stray blank lines, and
//! resolves duplicate assignments last-writer-wins.
//!
//! ## Usage
//!
//! ```rust
//! use toon_codec::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("x: 1\ny: 2").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::ser::is_unquoted_key;
use crate::{Delimiter, Error, Map, Number, Result, ToonOptions, Value};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Nesting levels beyond this are rejected to bound parser recursion.
const MAX_DEPTH: usize = 128;

/// Parses TOON text into a value tree.
pub(crate) fn decode_value(input: &str, options: &ToonOptions) -> Result<Value> {
    options.validate()?;
    let lines = scan(input, options)?;
    let mut parser = Parser {
        lines: &lines,
        pos: 0,
        depth: 0,
        options,
    };
    parser.parse_document()
}

// ---------------------------------------------------------------------------
// Line scanner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    /// 1-based line number
    number: usize,
    /// leading spaces
    indent: usize,
    /// indent translated to nesting levels
    level: usize,
    /// text after the indent, without the trailing newline
    content: &'a str,
    blank: bool,
}

/// Splits the input on `\n`, recording indentation per line. Tab characters
/// in the indent prefix are rejected; in strict mode the indent must be an
/// exact multiple of the configured width.
fn scan<'a>(input: &'a str, options: &ToonOptions) -> Result<Vec<Line<'a>>> {
    let mut lines = Vec::new();
    for (i, raw) in input.split('\n').enumerate() {
        let number = i + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = raw.trim_start_matches(' ');
        let indent = raw.len() - trimmed.len();
        if trimmed.starts_with('\t') {
            return Err(Error::parse(number, indent + 1, "tab character in indentation"));
        }
        let blank = trimmed.is_empty();
        let level = if blank {
            0
        } else if indent % options.indent == 0 {
            indent / options.indent
        } else if options.strict {
            return Err(Error::validation(
                number,
                indent + 1,
                format!("indentation of {indent} is not a multiple of {}", options.indent),
            ));
        } else {
            indent / options.indent
        };
        lines.push(Line {
            number,
            indent,
            level,
            content: trimmed,
            blank,
        });
    }
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Recursive-descent parser
// ---------------------------------------------------------------------------

/// A field produced by the delimited-value splitter.
struct FieldTok {
    text: String,
    quoted: bool,
}

struct Parser<'a, 'b> {
    lines: &'b [Line<'a>],
    pos: usize,
    depth: usize,
    options: &'b ToonOptions,
}

impl<'a, 'b> Parser<'a, 'b> {
    fn peek(&self) -> Option<&Line<'a>> {
        self.lines.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn next_nonblank_level(&self, from: usize) -> Option<usize> {
        self.lines[from..]
            .iter()
            .find(|l| !l.blank)
            .map(|l| l.level)
    }

    fn enter(&mut self, line: &Line) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::parse(
                line.number,
                line.indent + 1,
                "maximum nesting depth exceeded",
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_document(&mut self) -> Result<Value> {
        while matches!(self.peek(), Some(l) if l.blank) {
            self.advance();
        }
        let Some(&line) = self.peek() else {
            return Ok(Value::Object(Map::new()));
        };
        if self.options.strict && line.indent > 0 {
            return Err(Error::validation(
                line.number,
                1,
                "document root must not be indented",
            ));
        }

        let value = if line.content.starts_with('[') {
            self.advance();
            self.parse_array(line.content, &line, line.level, self.options.delimiter)?
        } else if split_key_boundary(line.content).is_some() {
            self.parse_object(line.level, self.options.delimiter)?
        } else {
            self.advance();
            self.parse_scalar(line.content, &line, 0)?
        };

        while matches!(self.peek(), Some(l) if l.blank) {
            self.advance();
        }
        if let Some(line) = self.peek() {
            if self.options.strict {
                return Err(Error::parse(
                    line.number,
                    line.indent + 1,
                    "unexpected content after document root",
                ));
            }
        }
        Ok(value)
    }

    /// Skips blank lines only when the next non-blank line continues an
    /// object at `level`; otherwise the blanks are left for the enclosing
    /// scope to judge.
    fn skip_field_blanks(&mut self, level: usize) {
        while matches!(self.peek(), Some(l) if l.blank) {
            let mut j = self.pos;
            while matches!(self.lines.get(j), Some(l) if l.blank) {
                j += 1;
            }
            match self.lines.get(j) {
                Some(l) if l.level == level => self.pos = j,
                _ => break,
            }
        }
    }

    fn parse_object(&mut self, level: usize, delimiter: Delimiter) -> Result<Value> {
        let mut map = Map::new();
        self.parse_object_into(&mut map, level, delimiter)?;
        Ok(Value::Object(map))
    }

    fn parse_object_into(
        &mut self,
        map: &mut Map,
        level: usize,
        delimiter: Delimiter,
    ) -> Result<()> {
        loop {
            self.skip_field_blanks(level);
            let Some(&line) = self.peek() else { break };
            if line.blank || line.level < level {
                break;
            }
            if line.level > level {
                return Err(Error::parse(
                    line.number,
                    line.indent + 1,
                    "unexpected indentation",
                ));
            }
            self.advance();
            let (key, quoted, rest) = self.parse_key(&line)?;
            let value = self.parse_field_value(rest, &line, level, delimiter)?;
            self.insert_field(map, key, quoted, value, &line)?;
        }
        Ok(())
    }

    /// Splits a field line into its key and the text starting at `:` or `[`.
    fn parse_key(&self, line: &Line<'a>) -> Result<(String, bool, &'a str)> {
        let content = line.content;
        if content.starts_with('"') {
            let (key, consumed) = parse_quoted(content, line.number, line.indent + 1)?;
            let rest = content[consumed..].trim_start_matches(' ');
            if rest.starts_with(':') || rest.starts_with('[') {
                Ok((key, true, rest))
            } else {
                Err(Error::parse(
                    line.number,
                    line.indent + consumed + 1,
                    "expected ':' after key",
                ))
            }
        } else {
            let boundary = match content.find([':', '[']) {
                Some(b) => b,
                None => {
                    return Err(Error::parse(
                        line.number,
                        line.indent + 1,
                        "expected ':' after key",
                    ));
                }
            };
            let key = content[..boundary].trim_end_matches([' ', '\t']);
            if key.is_empty() {
                return Err(Error::parse(line.number, line.indent + 1, "empty key"));
            }
            if self.options.strict && !is_unquoted_key(key) {
                return Err(Error::parse(
                    line.number,
                    line.indent + 1,
                    format!("invalid unquoted key: '{key}'"),
                ));
            }
            Ok((key.to_string(), false, &content[boundary..]))
        }
    }

    /// Parses the value part of a field. `rest` starts at `:` or `[`;
    /// `field_level` is the nesting level the field belongs to, so nested
    /// content sits at `field_level + 1`.
    fn parse_field_value(
        &mut self,
        rest: &'a str,
        line: &Line<'a>,
        field_level: usize,
        delimiter: Delimiter,
    ) -> Result<Value> {
        if rest.starts_with('[') {
            return self.parse_array(rest, line, field_level, delimiter);
        }
        debug_assert!(rest.starts_with(':'));
        let after = rest[1..].trim_matches([' ', '\t']);
        if after.is_empty() {
            self.parse_nested(field_level, line, delimiter)
        } else {
            self.parse_scalar(after, line, rest.as_ptr() as usize - line.content.as_ptr() as usize)
        }
    }

    /// Parses the indented block under `key:`, or yields an empty object when
    /// no deeper lines follow.
    fn parse_nested(
        &mut self,
        field_level: usize,
        line: &Line<'a>,
        delimiter: Delimiter,
    ) -> Result<Value> {
        let mut j = self.pos;
        while matches!(self.lines.get(j), Some(l) if l.blank) {
            j += 1;
        }
        let Some(&next) = self.lines.get(j) else {
            return Ok(Value::Object(Map::new()));
        };
        if next.level <= field_level {
            return Ok(Value::Object(Map::new()));
        }
        if self.options.strict && next.level != field_level + 1 {
            return Err(Error::validation(
                next.number,
                next.indent + 1,
                "invalid indentation for nested value",
            ));
        }
        self.pos = j;
        let child_level = next.level;

        self.enter(line)?;
        let value = if next.content.starts_with('[') {
            self.advance();
            self.parse_array(next.content, &next, child_level, delimiter)?
        } else if split_key_boundary(next.content).is_some() {
            self.parse_object(child_level, delimiter)?
        } else {
            self.advance();
            self.parse_scalar(next.content, &next, 0)?
        };
        self.leave();
        Ok(value)
    }

    /// Positions at the next body line of an array whose rows or elements sit
    /// at `body_level`, applying the blank-line policy for array interiors.
    fn next_body_line(&mut self, body_level: usize) -> Result<Option<Line<'a>>> {
        loop {
            let Some(&line) = self.peek() else {
                return Ok(None);
            };
            if line.blank {
                match self.next_nonblank_level(self.pos) {
                    Some(level) if level >= body_level => {
                        if self.options.strict {
                            return Err(Error::validation(
                                line.number,
                                1,
                                "blank line inside array",
                            ));
                        }
                        self.advance();
                        continue;
                    }
                    _ => return Ok(None),
                }
            }
            if line.level < body_level {
                return Ok(None);
            }
            if line.level > body_level {
                return Err(Error::parse(
                    line.number,
                    line.indent + 1,
                    "unexpected indentation",
                ));
            }
            return Ok(Some(line));
        }
    }

    /// Parses an array from its header. `header` starts at `[` on `line`;
    /// the body, if any, sits at `level + 1`. The delimiter advertised in the
    /// header overrides `inherited` within this array only.
    fn parse_array(
        &mut self,
        header: &'a str,
        line: &Line<'a>,
        level: usize,
        inherited: Delimiter,
    ) -> Result<Value> {
        self.enter(line)?;
        let value = self.parse_array_inner(header, line, level, inherited)?;
        self.leave();
        Ok(value)
    }

    fn parse_array_inner(
        &mut self,
        header: &'a str,
        line: &Line<'a>,
        level: usize,
        inherited: Delimiter,
    ) -> Result<Value> {
        let col = |offset: usize| line.indent + (header.as_ptr() as usize
            - line.content.as_ptr() as usize)
            + offset
            + 1;

        let bytes = header.as_bytes();
        debug_assert_eq!(bytes[0], b'[');
        let mut i = 1;
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == digits_start {
            return Err(Error::parse(line.number, col(i), "expected array length"));
        }
        let declared: usize = header[digits_start..i]
            .parse()
            .map_err(|_| Error::parse(line.number, col(digits_start), "invalid array length"))?;

        let header_delim = if i < bytes.len() {
            Delimiter::from_char(bytes[i] as char)
        } else {
            None
        };
        if header_delim.is_some() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b']' {
            return Err(Error::parse(line.number, col(i), "expected ']' in array header"));
        }
        i += 1;

        let active = header_delim.unwrap_or(inherited);

        let fields = if i < bytes.len() && bytes[i] == b'{' {
            let inner_start = i + 1;
            let inner_end = find_brace_end(header, inner_start).ok_or_else(|| {
                Error::parse(line.number, col(i), "expected '}' in array header")
            })?;
            let toks = split_fields(
                &header[inner_start..inner_end],
                active,
                line.number,
                col(inner_start),
            )?;
            i = inner_end + 1;
            Some(toks)
        } else {
            None
        };

        if i >= bytes.len() || bytes[i] != b':' {
            return Err(Error::parse(line.number, col(i), "expected ':' in array header"));
        }
        let rest = &header[i + 1..];

        if let Some(fields) = fields {
            self.parse_tabular_body(fields, declared, rest, line, level, active)
        } else if !rest.trim_matches([' ', '\t']).is_empty() {
            self.parse_inline_body(declared, rest, line, active)
        } else if declared == 0 {
            Ok(Value::Array(Vec::new()))
        } else {
            self.parse_expanded_body(declared, line, level)
        }
    }

    fn parse_inline_body(
        &mut self,
        declared: usize,
        rest: &'a str,
        line: &Line<'a>,
        active: Delimiter,
    ) -> Result<Value> {
        let segment = rest.trim_matches(' ');
        let toks = split_fields(segment, active, line.number, line.indent + 1)?;
        if self.options.strict && toks.len() != declared {
            return Err(Error::length_mismatch(line.number, declared, toks.len()));
        }
        let mut elements = Vec::with_capacity(toks.len());
        for tok in toks {
            elements.push(self.field_to_value(tok));
        }
        Ok(Value::Array(elements))
    }

    fn parse_tabular_body(
        &mut self,
        fields: Vec<FieldTok>,
        declared: usize,
        rest: &'a str,
        line: &Line<'a>,
        level: usize,
        active: Delimiter,
    ) -> Result<Value> {
        if !rest.trim_matches([' ', '\t']).is_empty() {
            return Err(Error::parse(
                line.number,
                line.indent + 1,
                "tabular rows must start on the next line",
            ));
        }
        if fields.iter().any(|f| f.text.is_empty()) {
            return Err(Error::parse(
                line.number,
                line.indent + 1,
                "empty field name in tabular header",
            ));
        }

        let mut rows = Vec::new();
        while let Some(row) = self.next_body_line(level + 1)? {
            self.advance();
            let toks = split_fields(row.content, active, row.number, row.indent + 1)?;
            if self.options.strict && toks.len() != fields.len() {
                return Err(Error::validation(
                    row.number,
                    row.indent + 1,
                    format!(
                        "row has {} fields, header declares {}",
                        toks.len(),
                        fields.len()
                    ),
                ));
            }
            let mut obj = Map::with_capacity(fields.len());
            let mut toks = toks.into_iter();
            for field in &fields {
                let value = match toks.next() {
                    Some(tok) => self.field_to_value(tok),
                    None => Value::Null,
                };
                self.insert_field(&mut obj, field.text.clone(), field.quoted, value, &row)?;
            }
            rows.push(Value::Object(obj));
        }
        if self.options.strict && rows.len() != declared {
            return Err(Error::length_mismatch(line.number, declared, rows.len()));
        }
        Ok(Value::Array(rows))
    }

    fn parse_expanded_body(
        &mut self,
        declared: usize,
        line: &Line<'a>,
        level: usize,
    ) -> Result<Value> {
        let mut items = Vec::new();
        while let Some(item_line) = self.next_body_line(level + 1)? {
            if !item_line.content.starts_with('-') {
                return Err(Error::parse(
                    item_line.number,
                    item_line.indent + 1,
                    "expected '- ' array element",
                ));
            }
            items.push(self.parse_list_item(&item_line, level + 1)?);
        }
        if self.options.strict && items.len() != declared {
            return Err(Error::length_mismatch(line.number, declared, items.len()));
        }
        Ok(Value::Array(items))
    }

    /// Parses one `- ` element whose dash line sits at `level`. Structure
    /// elements carry their first field on the dash line with the remaining
    /// fields one level deeper; arrays nested in an element reset the active
    /// delimiter to comma.
    fn parse_list_item(&mut self, line: &Line<'a>, level: usize) -> Result<Value> {
        self.advance();
        let content = line.content.trim_end_matches(' ');
        if content == "-" {
            return Ok(Value::Object(Map::new()));
        }
        let Some(rest) = content.strip_prefix("- ") else {
            return Err(Error::parse(
                line.number,
                line.indent + 2,
                "expected space after '-'",
            ));
        };
        let rest = rest.trim_start_matches(' ');

        if rest.starts_with('[') {
            return self.parse_array(rest, line, level, Delimiter::Comma);
        }

        if let Some(boundary) = split_key_boundary(rest) {
            self.enter(line)?;
            let mut map = Map::new();
            let (key, quoted, after) = self.parse_element_key(rest, boundary, line)?;
            let value = self.parse_field_value(after, line, level + 1, Delimiter::Comma)?;
            self.insert_field(&mut map, key, quoted, value, line)?;
            self.parse_object_into(&mut map, level + 1, Delimiter::Comma)?;
            self.leave();
            return Ok(Value::Object(map));
        }

        self.parse_scalar(rest, line, 2)
    }

    fn parse_element_key(
        &self,
        rest: &'a str,
        boundary: usize,
        line: &Line<'a>,
    ) -> Result<(String, bool, &'a str)> {
        if rest.starts_with('"') {
            let (key, consumed) = parse_quoted(rest, line.number, line.indent + 3)?;
            let after = rest[consumed..].trim_start_matches(' ');
            Ok((key, true, after))
        } else {
            let key = rest[..boundary].trim_end_matches([' ', '\t']);
            if self.options.strict && !is_unquoted_key(key) {
                return Err(Error::parse(
                    line.number,
                    line.indent + 3,
                    format!("invalid unquoted key: '{key}'"),
                ));
            }
            Ok((key.to_string(), false, &rest[boundary..]))
        }
    }

    /// Parses a standalone primitive token: a quoted string or a bare
    /// `null`/`true`/`false`/number/string literal.
    fn parse_scalar(&self, token: &str, line: &Line<'a>, offset: usize) -> Result<Value> {
        let token = token.trim_matches([' ', '\t']);
        if token.starts_with('"') {
            let (text, consumed) = parse_quoted(token, line.number, line.indent + offset + 1)?;
            if !token[consumed..].trim_matches([' ', '\t']).is_empty() {
                return Err(Error::parse(
                    line.number,
                    line.indent + offset + consumed + 1,
                    "unexpected characters after string",
                ));
            }
            return Ok(Value::String(text));
        }
        Ok(bare_scalar(token))
    }

    fn field_to_value(&self, tok: FieldTok) -> Value {
        if tok.quoted {
            Value::String(tok.text)
        } else {
            bare_scalar(&tok.text)
        }
    }

    /// Inserts a parsed field, applying the duplicate-key policy and, when
    /// enabled, dotted-key path expansion. Quoted keys never expand.
    fn insert_field(
        &self,
        map: &mut Map,
        key: String,
        quoted: bool,
        value: Value,
        line: &Line<'a>,
    ) -> Result<()> {
        if self.options.expand_paths && !quoted && key.contains('.') {
            let segments: Vec<&str> = key.split('.').collect();
            if segments.iter().all(|s| !s.is_empty()) {
                return self.insert_path(map, &segments, value, line);
            }
        }
        if map.contains_key(&key) {
            if self.options.strict {
                return Err(Error::validation(
                    line.number,
                    line.indent + 1,
                    format!("duplicate key: '{key}'"),
                ));
            }
        }
        map.insert(key, value);
        Ok(())
    }

    fn insert_path(
        &self,
        map: &mut Map,
        segments: &[&str],
        value: Value,
        line: &Line<'a>,
    ) -> Result<()> {
        let (first, rest) = match segments.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        if rest.is_empty() {
            match map.get_mut(*first) {
                Some(existing) => return self.merge_value(existing, value, first, line),
                None => {
                    map.insert((*first).to_string(), value);
                    return Ok(());
                }
            }
        }
        match map.get_mut(*first) {
            Some(Value::Object(inner)) => self.insert_path(inner, rest, value, line),
            Some(other) => {
                if self.options.strict {
                    return Err(Error::validation(
                        line.number,
                        line.indent + 1,
                        format!("path expansion conflict at '{first}': {} vs object", other.kind()),
                    ));
                }
                let mut fresh = Map::new();
                self.insert_path(&mut fresh, rest, value, line)?;
                *other = Value::Object(fresh);
                Ok(())
            }
            None => {
                let mut fresh = Map::new();
                self.insert_path(&mut fresh, rest, value, line)?;
                map.insert((*first).to_string(), Value::Object(fresh));
                Ok(())
            }
        }
    }

    /// Deep-merges `incoming` into an existing value at the same path.
    /// Objects merge field by field preserving first-insertion order; any
    /// other pairing is a conflict.
    fn merge_value(
        &self,
        existing: &mut Value,
        incoming: Value,
        key: &str,
        line: &Line<'a>,
    ) -> Result<()> {
        match (existing, incoming) {
            (Value::Object(a), Value::Object(b)) => {
                for (k, v) in b {
                    match a.get_mut(&k) {
                        Some(e) => self.merge_value(e, v, &k, line)?,
                        None => {
                            a.insert(k, v);
                        }
                    }
                }
                Ok(())
            }
            (existing, incoming) => {
                if self.options.strict {
                    return Err(Error::validation(
                        line.number,
                        line.indent + 1,
                        format!(
                            "path expansion conflict at '{key}': {} vs {}",
                            existing.kind(),
                            incoming.kind()
                        ),
                    ));
                }
                *existing = incoming;
                Ok(())
            }
        }
    }
}

/// Byte offset where an unquoted key ends (`:` or `[`), if the line has one.
fn split_key_boundary(content: &str) -> Option<usize> {
    if content.starts_with('"') {
        // Quoted key: boundary is wherever the closing quote lands; handled
        // by the quoted-key path, this only signals "looks like a field".
        let mut escaped = false;
        for (i, ch) in content.char_indices().skip(1) {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '"' => {
                    let rest = content[i + 1..].trim_start_matches(' ');
                    if rest.starts_with(':') || rest.starts_with('[') {
                        return Some(i + 1);
                    }
                    return None;
                }
                _ => {}
            }
        }
        None
    } else {
        content.find([':', '['])
    }
}

/// Parses a leading quoted string, returning the unescaped text and the byte
/// length consumed including both quotes. Exactly five escapes are accepted.
fn parse_quoted(s: &str, line: usize, col: usize) -> Result<(String, usize)> {
    debug_assert!(s.starts_with('"'));
    let mut result = String::new();
    let mut chars = s.char_indices().skip(1);
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Ok((result, i + 1)),
            '\\' => match chars.next() {
                Some((_, '\\')) => result.push('\\'),
                Some((_, '"')) => result.push('"'),
                Some((_, 'n')) => result.push('\n'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, 't')) => result.push('\t'),
                Some((j, other)) => {
                    return Err(Error::parse(
                        line,
                        col + j,
                        format!("invalid escape sequence '\\{other}'"),
                    ));
                }
                None => {
                    return Err(Error::parse(line, col + i, "unterminated string"));
                }
            },
            other => result.push(other),
        }
    }
    Err(Error::parse(line, col, "unterminated string"))
}

/// Interprets a bare (unquoted) token.
fn bare_scalar(token: &str) -> Value {
    match token {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if is_toon_number(token) {
        if token.contains('.') {
            if let Ok(f) = token.parse::<f64>() {
                return Value::Number(Number::from_f64(f));
            }
        } else if let Ok(i) = token.parse::<i64>() {
            return Value::Number(Number::Integer(i));
        } else if let Ok(f) = token.parse::<f64>() {
            // integer literal too large for i64
            return Value::Number(Number::from_f64(f));
        }
    }
    Value::String(token.to_string())
}

/// The TOON number grammar: `-? digits (. digits)?` with at least one digit.
/// Exponent forms are quoted-string territory, not numbers.
fn is_toon_number(s: &str) -> bool {
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
    i == b.len()
}

/// Finds the byte index of the `}` closing a tabular header's field list,
/// skipping quoted sections.
fn find_brace_end(s: &str, from: usize) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, ch) in s[from..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '}' if !in_quotes => return Some(from + i),
            _ => {}
        }
    }
    None
}

/// Splits a line segment on the active delimiter, honoring quoted fields.
/// Whitespace around delimiters is trimmed: spaces and tabs for comma and
/// pipe, spaces only when tab itself is the delimiter. Empty fields decode to
/// the empty string.
fn split_fields(
    segment: &str,
    delimiter: Delimiter,
    line: usize,
    col: usize,
) -> Result<Vec<FieldTok>> {
    let dch = delimiter.as_char();
    let trim: &[char] = if delimiter == Delimiter::Tab {
        &[' ']
    } else {
        &[' ', '\t']
    };
    let mut fields = Vec::new();
    let mut i = 0;

    loop {
        // leading whitespace of the field
        while let Some(ch) = segment[i..].chars().next() {
            if trim.contains(&ch) {
                i += ch.len_utf8();
            } else {
                break;
            }
        }

        if segment[i..].starts_with('"') {
            let (text, consumed) = parse_quoted(&segment[i..], line, col + i)?;
            i += consumed;
            while let Some(ch) = segment[i..].chars().next() {
                if trim.contains(&ch) {
                    i += ch.len_utf8();
                } else {
                    break;
                }
            }
            fields.push(FieldTok { text, quoted: true });
            if i >= segment.len() {
                break;
            }
            if !segment[i..].starts_with(dch) {
                return Err(Error::parse(
                    line,
                    col + i,
                    "unexpected characters after quoted field",
                ));
            }
            i += dch.len_utf8();
        } else {
            let start = i;
            while i < segment.len() && !segment[i..].starts_with(dch) {
                i += segment[i..].chars().next().map_or(1, char::len_utf8);
            }
            let text = segment[start..i].trim_matches(trim).to_string();
            fields.push(FieldTok {
                text,
                quoted: false,
            });
            if i >= segment.len() {
                break;
            }
            i += dch.len_utf8();
        }
    }

    Ok(fields)
}

// ---------------------------------------------------------------------------
// serde glue
// ---------------------------------------------------------------------------

/// The TOON deserializer.
///
/// Parses TOON text into a value tree and maps it onto any type implementing
/// `Deserialize`. Created via [`Deserializer::from_str`].
pub struct Deserializer<'de> {
    input: &'de str,
    options: ToonOptions,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            input,
            options: ToonOptions::default(),
        }
    }

    pub fn from_str_with_options(input: &'de str, options: ToonOptions) -> Self {
        Deserializer { input, options }
    }

    fn parse(&self) -> Result<Value> {
        decode_value(self.input, &self.options)
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse()?).deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse()?).deserialize_option(visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse()?).deserialize_enum(name, variants, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

/// Deserialize a type from an already-parsed [`Value`] tree.
pub(crate) fn value_into<T: de::DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(ValueDeserializer::new(value))
}

struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) => {
                let mut iter = obj.into_iter();
                let (variant, value) = match iter.next() {
                    Some(entry) => entry,
                    None => {
                        return Err(Error::type_mismatch("enum variant", "empty object"));
                    }
                };
                if iter.next().is_some() {
                    return Err(Error::type_mismatch(
                        "enum variant",
                        "object with multiple fields",
                    ));
                }
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    value: Some(value),
                })
            }
            other => Err(Error::type_mismatch("enum", other.kind())),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
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
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
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
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", other.kind())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::type_mismatch("newtype variant", "nothing")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Some(other) => Err(Error::type_mismatch("tuple variant", other.kind())),
            None => Err(Error::type_mismatch("tuple variant", "nothing")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            Some(other) => Err(Error::type_mismatch("struct variant", other.kind())),
            None => Err(Error::type_mismatch("struct variant", "nothing")),
        }
    }
}
