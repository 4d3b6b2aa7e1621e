use serde_json::Value;

use crate::core::{FieldValue, PlotPoint};
use crate::error::{PlotError, PlotResult};

/// Converts a JSON array of flat host records into plot points.
///
/// Recognized keys: `id` (or the legacy short `i`), `x`, `name`,
/// `mean_color` (passthrough color) and `image` (icon key). Every other
/// string or numeric member becomes a named field; other value types are
/// skipped.
pub fn points_from_json(value: &Value) -> PlotResult<Vec<PlotPoint>> {
    let records = value.as_array().ok_or_else(|| {
        PlotError::InvalidData("expected a JSON array of point records".to_owned())
    })?;

    records.iter().map(parse_record).collect()
}

fn parse_record(record: &Value) -> PlotResult<PlotPoint> {
    let object = record
        .as_object()
        .ok_or_else(|| PlotError::InvalidData("point record must be an object".to_owned()))?;

    let id = object
        .get("id")
        .or_else(|| object.get("i"))
        .and_then(Value::as_u64)
        .ok_or_else(|| PlotError::InvalidData("point record lacks an id".to_owned()))?;
    let x = object
        .get("x")
        .and_then(Value::as_f64)
        .filter(|x| x.is_finite())
        .ok_or_else(|| {
            PlotError::InvalidData(format!("point {id} lacks a finite x value"))
        })?;
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mut point = PlotPoint::new(id, x, name);
    if let Some(color) = object.get("mean_color").and_then(Value::as_str) {
        point.color = Some(color.to_owned());
    }
    if let Some(image) = object.get("image").and_then(Value::as_str) {
        point.image_ref = Some(image.to_owned());
    }

    for (key, member) in object {
        if matches!(key.as_str(), "id" | "i" | "x" | "name" | "mean_color" | "image") {
            continue;
        }
        match member {
            Value::Number(number) => {
                if let Some(number) = number.as_f64() {
                    point
                        .fields
                        .insert(key.clone(), FieldValue::Number(number));
                }
            }
            Value::String(text) => {
                point
                    .fields
                    .insert(key.clone(), FieldValue::Text(text.clone()));
            }
            _ => {}
        }
    }

    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_flat_records_with_legacy_ids() {
        let value = json!([
            {"i": 3, "x": 1.5, "name": "acme", "mean_color": "#123456",
             "industry": "tech", "pc1": -0.25}
        ]);

        let points = points_from_json(&value).expect("parse records");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, 3);
        assert_eq!(points[0].name, "acme");
        assert_eq!(points[0].color.as_deref(), Some("#123456"));
        assert_eq!(points[0].text_field("industry"), Some("tech"));
        assert_eq!(points[0].number_field("pc1"), Some(-0.25));
    }

    #[test]
    fn rejects_records_without_id_or_x() {
        assert!(points_from_json(&json!([{"x": 1.0}])).is_err());
        assert!(points_from_json(&json!([{"id": 1}])).is_err());
        assert!(points_from_json(&json!([{"id": 1, "x": f64::NAN}])).is_err());
        assert!(points_from_json(&json!({"id": 1})).is_err());
    }
}
