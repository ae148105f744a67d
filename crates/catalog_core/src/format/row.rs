//! Row codec for the delimited catalog text format.
//!
//! # Responsibility
//! - Read one logical row, joining physical lines inside quoted fields.
//! - Decode one data row into its four unquoted fields.
//! - Encode one record back into a row with the canonical separator.
//! - Own the quoting rules shared by load, save and insert.
//!
//! # Invariants
//! - Decoding splits on `,` outside double-quoted runs, so legacy `,` rows
//!   and canonical `", "` rows decode identically.
//! - Quoted fields double embedded `"`; decoding un-doubles them, so any
//!   key or description survives save then load unchanged.
//! - Descriptions are always quoted on save. Keys are quoted only when they
//!   hold a delimiter, a quote, a line break or edge whitespace.

use crate::error::{CatalogError, CatalogResult};
use std::borrow::Cow;
use std::io::BufRead;

/// Number of fields in every data row.
pub const FIELD_COUNT: usize = 4;

/// Separator written between fields on save.
pub const FIELD_SEPARATOR: &str = ", ";

/// Header row written as the first line of every saved file.
pub const HEADER_ROW: &str = "category, sub_category, name, description";

const QUOTE: char = '"';
const ESCAPED_QUOTE: &str = "\"\"";
const DELIMITER: char = ',';

/// Decoded data row with quoting removed from every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub category: String,
    pub sub_category: String,
    pub name: String,
    pub description: String,
}

/// Reads one logical row without its line terminator.
///
/// A row whose quotes are unbalanced continues on the next physical line.
/// `next_line` is the 1-based number of the next physical line; it is
/// advanced past every line consumed. Returns the row's first line number
/// with its text, or `None` at end of input.
///
/// # Errors
/// - `Io` when the reader fails.
/// - `CorruptData` when input ends inside a quoted field.
pub fn read_row(
    reader: &mut impl BufRead,
    next_line: &mut usize,
) -> CatalogResult<Option<(usize, String)>> {
    let first_line = *next_line;
    let mut row = String::new();
    loop {
        if reader.read_line(&mut row)? == 0 {
            if row.is_empty() {
                return Ok(None);
            }
            return Err(CatalogError::CorruptData {
                line: first_line,
                message: "unterminated quoted field".to_string(),
            });
        }
        *next_line += 1;
        if !has_open_quote(&row) {
            break;
        }
    }

    if row.ends_with('\n') {
        row.pop();
        if row.ends_with('\r') {
            row.pop();
        }
    }
    Ok(Some((first_line, row)))
}

/// Decodes one data row.
///
/// `line` is the 1-based line number used in error messages.
///
/// # Errors
/// - Returns `CorruptData` when the row does not split into exactly
///   `FIELD_COUNT` fields.
pub fn decode_row(row: &str, line: usize) -> CatalogResult<RowFields> {
    let fields = split_fields(row);
    let [category, sub_category, name, description] =
        <[&str; FIELD_COUNT]>::try_from(fields).map_err(|fields| CatalogError::CorruptData {
            line,
            message: format!(
                "expected row length of {FIELD_COUNT} but found {}",
                fields.len()
            ),
        })?;

    Ok(RowFields {
        category: unquote_field(category).into_owned(),
        sub_category: unquote_field(sub_category).into_owned(),
        name: unquote_field(name).into_owned(),
        description: unquote_field(description).into_owned(),
    })
}

/// Encodes one record as a data row, without the line terminator.
pub fn encode_row(category: &str, sub_category: &str, name: &str, description: &str) -> String {
    [
        &*encode_key(category),
        &*encode_key(sub_category),
        &*encode_key(name),
        &*quote_field(description),
    ]
    .join(FIELD_SEPARATOR)
}

/// Removes one layer of wrapping double quotes, if present at both ends.
///
/// Applied to user-supplied descriptions; no un-doubling happens here.
pub fn strip_wrapping_quotes(value: &str) -> &str {
    if is_wrapped(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Wraps a value in double quotes, doubling any embedded quote.
pub fn quote_field(value: &str) -> Cow<'_, str> {
    Cow::Owned(format!(
        "{QUOTE}{}{QUOTE}",
        value.replace(QUOTE, ESCAPED_QUOTE)
    ))
}

/// Removes the wrapping quotes of a decoded field and un-doubles inner
/// quotes. Unwrapped fields are returned as is.
pub fn unquote_field(field: &str) -> Cow<'_, str> {
    if !is_wrapped(field) {
        return Cow::Borrowed(field);
    }
    let inner = &field[1..field.len() - 1];
    if inner.contains(ESCAPED_QUOTE) {
        Cow::Owned(inner.replace(ESCAPED_QUOTE, "\""))
    } else {
        Cow::Borrowed(inner)
    }
}

fn encode_key(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.contains([DELIMITER, QUOTE, '\n', '\r']) || value.trim() != value;
    if needs_quotes {
        quote_field(value)
    } else {
        Cow::Borrowed(value)
    }
}

fn is_wrapped(value: &str) -> bool {
    value.len() >= 2 && value.starts_with(QUOTE) && value.ends_with(QUOTE)
}

fn has_open_quote(row: &str) -> bool {
    row.matches(QUOTE).count() % 2 == 1
}

fn split_fields(row: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut in_quotes = false;
    let mut start = 0;
    for (index, ch) in row.char_indices() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(row[start..index].trim());
                start = index + ch.len_utf8();
            }
            _ => {}
        }
    }
    fields.push(row[start..].trim());
    fields
}
