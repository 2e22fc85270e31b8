use crate::classify::{classify, Shape};
use crate::error::{RenderError, Result};
use crate::options::{is_visible, ViewOptions};
use crate::tabs::TabWriter;
use crate::value::{Record, Value};
use std::io::Write;

/// Render a value as a table, recursing into composite fields.
///
/// Output goes through the shared tab writer; the caller owns the single
/// `finish()` that aligns everything.
pub fn render(value: &Value, options: Option<&ViewOptions>, out: &mut TabWriter<'_>) -> Result<()> {
    match classify(value) {
        Shape::Null => Ok(()),
        Shape::Bytes => {
            let Value::Bytes(bytes) = value else {
                unreachable!()
            };
            out.write_all(bytes)?;
            Ok(())
        }
        Shape::Bool | Shape::Number | Shape::Text => {
            writeln!(out, "{}", display_scalar(value))?;
            Ok(())
        }
        Shape::TextList => {
            let Value::List(items) = value else {
                unreachable!()
            };
            for item in items {
                writeln!(out, "\t{}", display_scalar(item))?;
            }
            Ok(())
        }
        Shape::Stream => {
            let Value::Stream(stream) = value else {
                unreachable!()
            };
            stream.copy_to(out)?;
            Ok(())
        }
        Shape::Map => {
            let Value::Map(entries) = value else {
                unreachable!()
            };
            // BTreeMap iteration is already key-sorted.
            for (key, entry) in entries {
                if !is_visible(key, options) {
                    continue;
                }
                writeln!(out, "{}: -----------", key)?;
                render(entry, options, out)?;
            }
            Ok(())
        }
        Shape::List => {
            let Value::List(items) = value else {
                unreachable!()
            };
            for item in items {
                render(item, options, out)?;
            }
            Ok(())
        }
        Shape::Custom => {
            let Value::Custom(custom) = value else {
                unreachable!()
            };
            custom.print_table(out)
        }
        Shape::Record => {
            let Value::Record(record) = value else {
                unreachable!()
            };
            render_record(record, options, out)
        }
    }
}

/// The reflective record path: simple fields as `Name:\tvalue` lines,
/// non-empty composite fields as labeled sub-tables, both alphabetical.
fn render_record(
    record: &Record,
    options: Option<&ViewOptions>,
    out: &mut TabWriter<'_>,
) -> Result<()> {
    let mut simple: Vec<(&str, String)> = Vec::new();
    let mut complex: Vec<(&str, &Value)> = Vec::new();

    for (name, value) in record.fields() {
        if !is_visible(name, options) {
            continue;
        }
        match classify(value) {
            Shape::Null => {}
            Shape::Bool | Shape::Number | Shape::Text | Shape::Bytes => {
                simple.push((name, display_scalar(value)));
            }
            Shape::TextList => {
                // A string sequence is flattened to one comma-joined value;
                // an empty one counts as an empty composite and is omitted.
                if let Value::List(items) = value {
                    if items.is_empty() {
                        continue;
                    }
                }
                simple.push((name, display_scalar(value)));
            }
            Shape::Map => {
                if let Value::Map(entries) = value {
                    if entries.is_empty() {
                        continue;
                    }
                }
                complex.push((name, value));
            }
            Shape::List | Shape::Record | Shape::Custom => complex.push((name, value)),
            Shape::Stream => {
                return Err(RenderError::Unsupported("stream".to_string()));
            }
        }
    }

    simple.sort_by(|a, b| a.0.cmp(b.0));
    complex.sort_by(|a, b| a.0.cmp(b.0));

    for (name, value) in &simple {
        writeln!(out, "{}:\t{}", name, value)?;
    }
    for (name, value) in &complex {
        writeln!(out)?;
        writeln!(out, "{} ({}):", name, value.type_name())?;
        render_sub(value, options, out)?;
    }
    Ok(())
}

/// Flattened sub-table rendering, used for composite record fields and for
/// top-level collections. Assumes a list-of-records or list-of-strings
/// shape; bare maps and lists of maps have no rendering here.
pub fn render_sub(
    value: &Value,
    options: Option<&ViewOptions>,
    out: &mut TabWriter<'_>,
) -> Result<()> {
    match classify(value) {
        Shape::Null => Ok(()),
        Shape::Bytes => {
            let Value::Bytes(bytes) = value else {
                unreachable!()
            };
            out.write_all(bytes)?;
            Ok(())
        }
        Shape::Bool | Shape::Number | Shape::Text => {
            writeln!(out, "\t{}", display_scalar(value))?;
            Ok(())
        }
        Shape::TextList => {
            let Value::List(items) = value else {
                unreachable!()
            };
            for item in items {
                writeln!(out, "\t{}", display_scalar(item))?;
            }
            Ok(())
        }
        Shape::Stream => {
            let Value::Stream(stream) = value else {
                unreachable!()
            };
            stream.copy_to(out)?;
            Ok(())
        }
        Shape::Custom => {
            let Value::Custom(custom) = value else {
                unreachable!()
            };
            custom.print_table(out)
        }
        Shape::Record => {
            let Value::Record(record) = value else {
                unreachable!()
            };
            record_table(&[record], options, out)
        }
        Shape::List => {
            let Value::List(items) = value else {
                unreachable!()
            };
            if items.iter().all(|item| matches!(item, Value::Record(_))) {
                let records: Vec<&Record> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Record(record) => Some(record),
                        _ => None,
                    })
                    .collect();
                return record_table(&records, options, out);
            }
            if items.iter().any(|item| matches!(item, Value::Map(_))) {
                return Err(RenderError::NotImplemented("[]map".to_string()));
            }
            for item in items {
                match classify(item) {
                    Shape::Null => {}
                    Shape::Bool | Shape::Number | Shape::Text | Shape::Bytes
                    | Shape::TextList => {
                        writeln!(out, "\t{}", display_scalar(item))?;
                    }
                    _ => {
                        return Err(RenderError::Unsupported(item.type_name()));
                    }
                }
            }
            Ok(())
        }
        Shape::Map => Err(RenderError::NotImplemented("map".to_string())),
    }
}

/// One header row of column names, one tab-delimited row per record.
///
/// Columns are the first element's visible field names sorted
/// alphabetically; every element is assumed to share that field set. The
/// alphabetical order is a deliberate simplification kept so output stays
/// stable across runs.
fn record_table(
    records: &[&Record],
    options: Option<&ViewOptions>,
    out: &mut TabWriter<'_>,
) -> Result<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };

    let mut columns: Vec<&str> = first
        .fields()
        .filter(|(name, _)| is_visible(name, options))
        .map(|(name, _)| name)
        .collect();
    columns.sort_unstable();
    if columns.is_empty() {
        return Ok(());
    }

    writeln!(out, "\t{}", columns.join("\t"))?;
    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| record.get(column).map(cell_string).unwrap_or_default())
            .collect();
        writeln!(out, "\t{}", cells.join("\t"))?;
    }
    Ok(())
}

/// Single-line form of a simple value.
pub(crate) fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Uint(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Str(s) => s.clone(),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::List(items) => items
            .iter()
            .map(display_scalar)
            .collect::<Vec<_>>()
            .join(", "),
        _ => value.type_name(),
    }
}

/// Cell contents for a record-table row. Composite cells fall back to
/// compact json so a row always stays on one line.
fn cell_string(value: &Value) -> String {
    match classify(value) {
        Shape::Null => String::new(),
        Shape::Bool | Shape::Number | Shape::Text | Shape::Bytes | Shape::TextList => {
            display_scalar(value)
        }
        _ => serde_json::to_string(value).unwrap_or_else(|_| value.type_name()),
    }
}
