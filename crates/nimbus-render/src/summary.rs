use crate::error::Result;
use crate::table::display_scalar;
use crate::tabs::TabWriter;
use crate::value::{CustomRender, Record, Value};
use std::io::Write;

/// Hand-curated presentation aggregate for commands like `app info`.
///
/// Holds already-flattened data: scalar (name, value) pairs plus named
/// detail blocks with fixed column headers. Implements [`CustomRender`], so
/// the table renderer delegates here instead of reflecting over the
/// original response type; the structured encoders see it as a record.
#[derive(Debug, Default)]
pub struct Summary {
    fields: Vec<(String, Value)>,
    details: Vec<Detail>,
}

/// One named block of rows under a fixed header list.
#[derive(Debug)]
pub struct Detail {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Summary {
    pub fn new() -> Self {
        Summary::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn detail(
        mut self,
        name: impl Into<String>,
        headers: impl IntoIterator<Item = impl Into<String>>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        self.details.push(Detail {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows,
        });
        self
    }
}

impl CustomRender for Summary {
    fn print_table(&self, out: &mut TabWriter<'_>) -> Result<()> {
        let mut fields: Vec<&(String, Value)> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, value) in fields {
            writeln!(out, "{}:\t{}", name, display_scalar(value))?;
        }

        // Detail blocks keep their insertion order; each one starts with a
        // blank line so it aligns independently of the scalar block.
        for detail in &self.details {
            writeln!(out)?;
            writeln!(out, "{}:", detail.name)?;
            let headers: Vec<String> = detail
                .headers
                .iter()
                .map(|header| header.to_uppercase())
                .collect();
            writeln!(out, "\t{}", headers.join("\t"))?;
            for row in &detail.rows {
                writeln!(out, "\t{}", row.join("\t"))?;
            }
        }
        Ok(())
    }

    fn as_value(&self) -> Value {
        let mut record = Record::new("Summary");
        for (name, value) in &self.fields {
            record.push(name.clone(), clone_scalar(value));
        }
        for detail in &self.details {
            let rows: Vec<Value> = detail
                .rows
                .iter()
                .map(|row| {
                    let mut entry = Record::new(&detail.name);
                    for (header, cell) in detail.headers.iter().zip(row) {
                        entry.push(header.clone(), Value::Str(cell.clone()));
                    }
                    Value::Record(entry)
                })
                .collect();
            record.push(detail.name.clone(), Value::List(rows));
        }
        Value::Record(record)
    }
}

// Summary fields are scalars by construction; anything else degrades to its
// display form.
fn clone_scalar(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Int(i) => Value::Int(*i),
        Value::Uint(u) => Value::Uint(*u),
        Value::Float(f) => Value::Float(*f),
        Value::Str(s) => Value::Str(s.clone()),
        other => Value::Str(display_scalar(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Summary {
        Summary::new()
            .field("Name", "myapp")
            .field("Deploys", 7u64)
            .detail(
                "Units",
                ["id", "status"],
                vec![
                    vec!["unit1".to_string(), "started".to_string()],
                    vec!["unit2".to_string(), "stopped".to_string()],
                ],
            )
    }

    #[test]
    fn table_layout_matches_curated_format() {
        let mut out = Vec::new();
        let mut tw = TabWriter::new(&mut out);
        sample().print_table(&mut tw).unwrap();
        tw.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Deploys:  7\n\
             Name:     myapp\n\
             \n\
             Units:\n\
             \x20\x20ID     STATUS\n\
             \x20\x20unit1  started\n\
             \x20\x20unit2  stopped\n"
        );
    }

    #[test]
    fn structured_form_keeps_detail_rows() {
        let value = sample().as_value();
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(
            text,
            r#"{"Name":"myapp","Deploys":7,"Units":[{"id":"unit1","status":"started"},{"id":"unit2","status":"stopped"}]}"#
        );
    }
}
