use std::fmt;

use duckdb::types::Value as DuckValue;

/// A single report cell, reduced to the shapes the canned queries produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format!("{f:.2}"),
            Value::Text(s) => s.clone(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<DuckValue> for Value {
    fn from(value: DuckValue) -> Self {
        match value {
            DuckValue::Null => Value::Null,
            DuckValue::Boolean(b) => Value::Text(b.to_string()),
            DuckValue::TinyInt(i) => Value::Integer(i.into()),
            DuckValue::SmallInt(i) => Value::Integer(i.into()),
            DuckValue::Int(i) => Value::Integer(i.into()),
            DuckValue::BigInt(i) => Value::Integer(i),
            DuckValue::UTinyInt(i) => Value::Integer(i.into()),
            DuckValue::USmallInt(i) => Value::Integer(i.into()),
            DuckValue::UInt(i) => Value::Integer(i.into()),
            DuckValue::UBigInt(i) => match i64::try_from(i) {
                Ok(i) => Value::Integer(i),
                Err(_) => Value::Float(i as f64),
            },
            DuckValue::HugeInt(i) => match i64::try_from(i) {
                Ok(i) => Value::Integer(i),
                Err(_) => Value::Float(i as f64),
            },
            DuckValue::Float(f) => Value::Float(f.into()),
            DuckValue::Double(f) => Value::Float(f),
            DuckValue::Text(s) => Value::Text(s),
            other => Value::Text(format!("{other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_render_with_two_decimals() {
        assert_eq!(Value::Float(100000.0).as_display(), "100000.00");
        assert_eq!(Value::Float(1234.567).as_display(), "1234.57");
        assert_eq!(Value::Integer(2020).to_string(), "2020");
        assert_eq!(Value::Null.to_string(), "NULL");
    }

    #[test]
    fn duckdb_integers_collapse_to_i64() {
        assert_eq!(Value::from(DuckValue::Int(2020)), Value::Integer(2020));
        assert_eq!(Value::from(DuckValue::UBigInt(3)), Value::Integer(3));
        assert_eq!(Value::from(DuckValue::HugeInt(7)), Value::Integer(7));
        assert_eq!(Value::from(DuckValue::Double(1.5)), Value::Float(1.5));
        assert_eq!(
            Value::from(DuckValue::Text("Colleges".into())),
            Value::Text("Colleges".into())
        );
    }
}
