//! Conversion of arbitrary PostgreSQL rows into JSON objects.
//!
//! The shape of a row is only known at runtime, so each column is decoded by
//! inspecting its type name. Rows are expected in text format (simple-query
//! protocol), which lets any type without a dedicated mapping fall back to the
//! store's own text rendering. Column order is preserved (`serde_json` is built
//! with `preserve_order`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::{PgRow, PgTypeInfo};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use uuid::Uuid;

/// A materialized result row keyed by column name.
pub type Record = Map<String, Value>;

/// Converts one row into a JSON object, keeping the store's column order.
///
/// When two columns share a name the later one wins.
pub fn row_to_record(row: &PgRow) -> Result<Record, sqlx::Error> {
    let mut record = Map::with_capacity(row.len());
    for column in row.columns() {
        let value = column_value(row, column.ordinal(), column.type_info())?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn column_value(row: &PgRow, index: usize, type_info: &PgTypeInfo) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_info.name() {
        "BOOL" => Value::Bool(row.try_get::<bool, _>(index)?),
        "INT2" => Value::from(row.try_get::<i16, _>(index)?),
        "INT4" => Value::from(row.try_get::<i32, _>(index)?),
        "INT8" => Value::from(row.try_get::<i64, _>(index)?),
        "FLOAT4" => float(f64::from(row.try_get::<f32, _>(index)?)),
        "FLOAT8" => float(row.try_get::<f64, _>(index)?),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Value::String(row.try_get::<String, _>(index)?),
        "UUID" => Value::String(row.try_get::<Uuid, _>(index)?.to_string()),
        "TIMESTAMPTZ" => Value::String(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339()),
        "TIMESTAMP" => Value::String(row.try_get::<NaiveDateTime, _>(index)?.to_string()),
        "DATE" => Value::String(row.try_get::<NaiveDate, _>(index)?.to_string()),
        "TIME" => Value::String(row.try_get::<NaiveTime, _>(index)?.to_string()),
        "JSON" | "JSONB" => row.try_get::<Value, _>(index)?,
        "NUMERIC" => numeric(&row.try_get_unchecked::<String, _>(index)?),
        other => {
            // Enums, arrays, intervals, ...: keep the text the store sent
            log::debug!("Returning column type {} as text", other);
            Value::String(row.try_get_unchecked::<String, _>(index)?)
        }
    };
    Ok(value)
}

// JSON has no NaN or infinity.
fn float(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Maps NUMERIC text to a JSON number when that loses nothing.
///
/// Integers become integers. Other values become floats only if the float
/// prints back to the same digits (ignoring trailing fractional zeros), so
/// `NaN` and high-precision values stay strings.
fn numeric(text: &str) -> Value {
    if let Ok(int) = text.parse::<i64>() {
        return Value::from(int);
    }
    let digits = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    };
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f.to_string() == digits => float(f),
        _ => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_float_mapping() {
        assert_eq!(float(1.5), serde_json::json!(1.5));
        assert_eq!(float(f64::NAN), Value::Null);
        assert_eq!(float(f64::INFINITY), Value::Null);
    }

    #[test]
    fn test_numeric_mapping() {
        assert_eq!(numeric("3"), serde_json::json!(3));
        assert_eq!(numeric("1.5000000000000000"), serde_json::json!(1.5));
        assert_eq!(numeric("-0.25"), serde_json::json!(-0.25));
        assert_eq!(numeric("100.00"), serde_json::json!(100.0));
        assert_eq!(numeric("NaN"), Value::from("NaN"));
        assert_eq!(
            numeric("12345678901234567890.123456789"),
            Value::from("12345678901234567890.123456789")
        );
        assert_eq!(
            numeric("123456789012345678901234"),
            Value::from("123456789012345678901234")
        );
    }

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut record = Record::new();
        record.insert("user_id".into(), Value::from(1));
        record.insert("username".into(), Value::from("alice"));
        record.insert("email".into(), Value::from("a@x.com"));

        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["user_id", "username", "email"]);
    }
}
