//! Composite format rendering
//!
//! Expands templates such as `"retrying {0} of {1}"` against positional
//! values. Items take the form `{index[,alignment][:format]}`; `{{` and
//! `}}` produce literal braces.

use serde_json::Value;
use std::fmt::Write;

use crate::domain::error::FormatError;

/// Render `format` with `values` substituted by position
///
/// # Errors
///
/// Returns a [`FormatError`] for an item referring past the end of
/// `values`, an unclosed item, a lone `}` or a malformed index/alignment.
///
/// # Examples
///
/// ```
/// use logbridge::infrastructure::logging::render;
/// use serde_json::json;
///
/// let text = render("retrying {0} of {1}", &[json!(1), json!(3)]).unwrap();
/// assert_eq!(text, "retrying 1 of 3");
/// ```
pub fn render(format: &str, values: &[Value]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let start = offset + 1;
                let end = loop {
                    match chars.next() {
                        Some((i, '}')) => break i,
                        Some(_) => {}
                        None => return Err(FormatError::UnclosedItem(offset)),
                    }
                };

                let item = FormatItem::parse(&format[start..end], offset)?;
                let value = values.get(item.index).ok_or(FormatError::IndexOutOfRange {
                    index: item.index,
                    count: values.len(),
                    offset,
                })?;
                item.write(&mut out, value);
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_some() {
                    out.push('}');
                } else {
                    return Err(FormatError::UnescapedBrace(offset));
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Upper bound (exclusive) on alignment and integer padding widths
const MAX_WIDTH: usize = 1_000_000;

/// One parsed `{index[,alignment][:format]}` item
#[derive(Debug, PartialEq, Eq)]
struct FormatItem<'a> {
    index: usize,
    alignment: i32,
    spec: Option<&'a str>,
}

impl<'a> FormatItem<'a> {
    fn parse(body: &'a str, offset: usize) -> Result<Self, FormatError> {
        let malformed = |reason: &str| FormatError::MalformedItem {
            offset,
            reason: reason.to_string(),
        };

        let (head, spec) = match body.split_once(':') {
            Some((head, spec)) => (head, Some(spec)),
            None => (body, None),
        };
        let (index, alignment) = match head.split_once(',') {
            Some((index, alignment)) => (index, Some(alignment)),
            None => (head, None),
        };

        let index = index.trim_end();
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("index must be a non-negative integer"));
        }
        let index = index
            .parse()
            .map_err(|_| malformed("index is too large"))?;

        let alignment: i32 = match alignment {
            Some(text) => text
                .trim()
                .parse()
                .map_err(|_| malformed("alignment must be an integer"))?,
            None => 0,
        };
        if alignment.unsigned_abs() as usize >= MAX_WIDTH {
            return Err(malformed("alignment is too large"));
        }
        if spec.and_then(integer_width).is_some_and(|width| width >= MAX_WIDTH) {
            return Err(malformed("format width is too large"));
        }

        Ok(Self {
            index,
            alignment,
            spec,
        })
    }

    fn write(&self, out: &mut String, value: &Value) {
        let text = format_value(value, self.spec);
        let width = self.alignment.unsigned_abs() as usize;
        let pad = width.saturating_sub(text.chars().count());

        if self.alignment > 0 {
            out.extend(std::iter::repeat_n(' ', pad));
            out.push_str(&text);
        } else {
            out.push_str(&text);
            out.extend(std::iter::repeat_n(' ', pad));
        }
    }
}

fn format_value(value: &Value, spec: Option<&str>) -> String {
    if let (Some(spec), Some(n)) = (spec, value.as_i64()) {
        if let Some(text) = format_integer(n, spec) {
            return text;
        }
    }

    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Padding width of a `D<n>`/`X<n>`/`x<n>` spec
fn integer_width(spec: &str) -> Option<usize> {
    let digits = spec.strip_prefix(['D', 'd', 'X', 'x'])?;
    if digits.is_empty() {
        Some(0)
    } else if digits.bytes().all(|b| b.is_ascii_digit()) {
        // Saturate so oversized widths are still caught
        Some(digits.parse().unwrap_or(usize::MAX))
    } else {
        None
    }
}

/// `D<n>` zero pads, `X<n>`/`x<n>` renders hex; anything else is ignored
///
/// Hex output of a negative value is 32-bit two's complement when the
/// value fits in an `i32`, 64-bit otherwise.
fn format_integer(n: i64, spec: &str) -> Option<String> {
    let kind = spec.chars().next()?;
    let width = integer_width(spec)?;

    let mut out = String::new();
    match kind {
        'D' | 'd' => {
            if n < 0 {
                out.push('-');
            }
            let _ = write!(out, "{:0width$}", n.unsigned_abs());
        }
        'X' => match i32::try_from(n) {
            Ok(narrow) => {
                let _ = write!(out, "{narrow:0width$X}");
            }
            Err(_) => {
                let _ = write!(out, "{n:0width$X}");
            }
        },
        'x' => match i32::try_from(n) {
            Ok(narrow) => {
                let _ = write!(out, "{narrow:0width$x}");
            }
            Err(_) => {
                let _ = write!(out, "{n:0width$x}");
            }
        },
        _ => return None,
    }
    Some(out)
}
