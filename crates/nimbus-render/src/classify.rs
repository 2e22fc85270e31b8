use crate::value::Value;

/// How a value must be rendered.
///
/// Exactly one tag per value. `Custom` wins over `Record` so curated types
/// pre-empt the generic reflective path, and `Stream` is never mistaken for
/// an opaque record. Optional indirection does not appear here: it is
/// collapsed to the referent (or `Null`) when the value is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    Bool,
    Number,
    Text,
    Bytes,
    /// A sequence whose elements are all strings.
    TextList,
    List,
    Map,
    Record,
    Stream,
    Custom,
}

/// Classify a value by its runtime shape.
///
/// Every rendering call, at every depth, re-dispatches through this one
/// function; there is no other type switch in the renderer.
pub fn classify(value: &Value) -> Shape {
    match value {
        Value::Null => Shape::Null,
        Value::Bool(_) => Shape::Bool,
        Value::Int(_) | Value::Uint(_) | Value::Float(_) => Shape::Number,
        Value::Str(_) => Shape::Text,
        Value::Bytes(_) => Shape::Bytes,
        Value::List(items) => {
            if items.iter().all(|item| matches!(item, Value::Str(_))) {
                Shape::TextList
            } else {
                Shape::List
            }
        }
        Value::Map(_) => Shape::Map,
        Value::Record(_) => Shape::Record,
        Value::Stream(_) => Shape::Stream,
        Value::Custom(_) => Shape::Custom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;

    #[test]
    fn scalars() {
        assert_eq!(classify(&Value::Null), Shape::Null);
        assert_eq!(classify(&Value::Bool(true)), Shape::Bool);
        assert_eq!(classify(&Value::Int(-3)), Shape::Number);
        assert_eq!(classify(&Value::Uint(3)), Shape::Number);
        assert_eq!(classify(&Value::Float(0.5)), Shape::Number);
        assert_eq!(classify(&Value::Str("x".into())), Shape::Text);
        assert_eq!(classify(&Value::Bytes(vec![1, 2])), Shape::Bytes);
    }

    #[test]
    fn lists_split_on_element_shape() {
        let strings = Value::List(vec![Value::Str("a".into()), Value::Str("b".into())]);
        assert_eq!(classify(&strings), Shape::TextList);

        let mixed = Value::List(vec![Value::Str("a".into()), Value::Int(1)]);
        assert_eq!(classify(&mixed), Shape::List);

        // An empty sequence is vacuously a string sequence; renderers skip
        // empty composites before shape matters.
        assert_eq!(classify(&Value::List(vec![])), Shape::TextList);
    }

    #[test]
    fn composites() {
        assert_eq!(classify(&Value::Map(Default::default())), Shape::Map);
        assert_eq!(
            classify(&Value::Record(Record::new("App"))),
            Shape::Record
        );
        assert_eq!(classify(&Value::stream(std::io::empty())), Shape::Stream);
    }
}
