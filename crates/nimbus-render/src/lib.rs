//! Output rendering for the nimbus CLI.
//!
//! Every command hands its result to [`print_info`] or [`print_list`] with a
//! [`Format`] and optional [`ViewOptions`]; the dispatcher routes to the
//! table renderer or one of the structured encoders. The table path buffers
//! through a [`TabWriter`] so columns align globally across the whole
//! response, including nested sub-tables.

mod classify;
mod encode;
mod error;
mod options;
mod ser;
mod summary;
mod table;
mod tabs;
mod value;

pub use classify::{classify, Shape};
pub use encode::{to_json, to_json_pretty, to_yaml};
pub use error::{RenderError, Result};
pub use options::{is_visible, ViewOptions};
pub use ser::to_value;
pub use summary::{Detail, Summary};
pub use table::render_sub;
pub use tabs::TabWriter;
pub use value::{ByteStream, CustomRender, Record, Value};

use std::fmt;
use std::io;

/// Requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Table,
    Json,
    PrettyJson,
    Yaml,
}

impl Format {
    /// Normalize a format token from the CLI layer.
    ///
    /// Case-insensitive; anything unrecognized (including the empty string)
    /// maps to `Table`. This is the one place that normalization happens.
    pub fn parse(token: &str) -> Format {
        match token.to_lowercase().as_str() {
            "json" => Format::Json,
            "pretty-json" | "prettyjson" => Format::PrettyJson,
            "yaml" => Format::Yaml,
            _ => Format::Table,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Table => write!(f, "table"),
            Format::Json => write!(f, "json"),
            Format::PrettyJson => write!(f, "pretty-json"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render a single aggregate value.
///
/// A null value is a no-op: zero bytes written, no error. Errors from the
/// chosen encoder are returned as-is, without extra context, and nothing is
/// ever written anywhere but `out`.
pub fn print_info<W: io::Write>(
    out: &mut W,
    format: Format,
    value: &Value,
    options: Option<&ViewOptions>,
) -> Result<()> {
    if value.is_null() {
        return Ok(());
    }
    match format {
        Format::Json => encode::to_json(out, value),
        Format::PrettyJson => encode::to_json_pretty(out, value),
        Format::Yaml => encode::to_yaml(out, value),
        Format::Table => {
            let mut tw = TabWriter::new(out);
            table::render(value, options, &mut tw)?;
            tw.finish()?;
            Ok(())
        }
    }
}

/// Render a collection, defaulting the table path to the flattened
/// sub-table layout since list elements are typically homogeneous records.
pub fn print_list<W: io::Write>(
    out: &mut W,
    format: Format,
    value: &Value,
    options: Option<&ViewOptions>,
) -> Result<()> {
    if value.is_null() {
        return Ok(());
    }
    match format {
        Format::Json => encode::to_json(out, value),
        Format::PrettyJson => encode::to_json_pretty(out, value),
        Format::Yaml => encode::to_yaml(out, value),
        Format::Table => {
            let mut tw = TabWriter::new(out);
            table::render_sub(value, options, &mut tw)?;
            tw.finish()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tokens_are_lenient() {
        assert_eq!(Format::parse("json"), Format::Json);
        assert_eq!(Format::parse("JSON"), Format::Json);
        assert_eq!(Format::parse("pretty-json"), Format::PrettyJson);
        assert_eq!(Format::parse("PrettyJson"), Format::PrettyJson);
        assert_eq!(Format::parse("yaml"), Format::Yaml);
        assert_eq!(Format::parse("table"), Format::Table);
        assert_eq!(Format::parse(""), Format::Table);
        assert_eq!(Format::parse("bogus-format"), Format::Table);
    }

    #[test]
    fn null_produces_zero_bytes_in_every_format() {
        for format in [Format::Table, Format::Json, Format::PrettyJson, Format::Yaml] {
            let mut out = Vec::new();
            print_info(&mut out, format, &Value::Null, None).unwrap();
            assert!(out.is_empty(), "{format} wrote {out:?}");

            let mut out = Vec::new();
            print_list(&mut out, format, &Value::Null, None).unwrap();
            assert!(out.is_empty(), "{format} wrote {out:?}");
        }
    }

    #[test]
    fn unrecognized_format_falls_back_to_table() {
        let value = Value::from(serde_json::json!({"a": 1}));
        let mut bogus = Vec::new();
        print_info(&mut bogus, Format::parse("bogus-format"), &value, None).unwrap();
        let mut plain = Vec::new();
        print_info(&mut plain, Format::parse("table"), &value, None).unwrap();
        assert_eq!(bogus, plain);
    }

    #[test]
    fn list_table_path_flattens_records() {
        let plans = Value::List(vec![
            Value::Record(Record::new("Plan").field("Name", "small").field("Memory", 512u64)),
            Value::Record(Record::new("Plan").field("Name", "large").field("Memory", 4096u64)),
        ]);
        let mut out = Vec::new();
        print_list(&mut out, Format::Table, &plans, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  Memory  Name\n  512     small\n  4096    large\n"
        );
    }

    #[test]
    fn json_and_table_routes_disagree_only_on_layout() {
        let value = Value::from(serde_json::json!({"name": "myapp"}));
        let mut json = Vec::new();
        print_info(&mut json, Format::Json, &value, None).unwrap();
        assert_eq!(json, b"{\"name\":\"myapp\"}\n");

        let mut table = Vec::new();
        print_info(&mut table, Format::Table, &value, None).unwrap();
        assert_eq!(table, b"name: -----------\nmyapp\n");
    }
}
