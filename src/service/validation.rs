//! Request validation against declared document schemas.
//!
//! A [`Schema`] is both the validator and the source of the JSON schema
//! advertised in POST/PUT controls, so the two cannot drift apart.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

#[derive(Clone, Copy, Debug)]
pub enum FieldType {
    String,
    Integer,
    Number,
    /// Array of objects matching the nested schema.
    Array(&'static Schema),
}

impl FieldType {
    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Array(_) => "array",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldType,
    pub required: bool,
    pub minimum: Option<i64>,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldType) -> Self {
        Field {
            name,
            kind,
            required: false,
            minimum: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn minimum(mut self, min: i64) -> Self {
        self.minimum = Some(min);
        self
    }
}

#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [Field],
}

impl Schema {
    /// JSON schema (draft 7 subset) describing this document.
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        for f in self.fields {
            let mut prop = Map::new();
            prop.insert("type".into(), json!(f.kind.name()));
            if let FieldType::Array(items) = f.kind {
                prop.insert("items".into(), items.to_json());
            }
            if let Some(min) = f.minimum {
                prop.insert("minimum".into(), json!(min));
            }
            properties.insert(f.name.into(), Value::Object(prop));
        }
        let required: Vec<&str> = self.fields.iter().filter(|f| f.required).map(|f| f.name).collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against the schema. Missing required fields and type mismatches are errors;
    /// `null` on an optional field counts as absent.
    pub fn validate(body: &Value, schema: &Schema) -> Result<(), AppError> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::Validation(format!("{} is not of type 'object'", body)))?;
        for field in schema.fields {
            match obj.get(field.name) {
                None => {
                    if field.required {
                        return Err(AppError::Validation(format!(
                            "'{}' is a required property",
                            field.name
                        )));
                    }
                }
                Some(Value::Null) if !field.required => {}
                Some(v) => validate_field(field, v)?,
            }
        }
        Ok(())
    }

    /// Validate, then deserialize into the typed input. Integer fields sent as
    /// integral floats (`4.0`) are stored as integers first.
    pub fn parse<T: DeserializeOwned>(mut body: Value, schema: &Schema) -> Result<T, AppError> {
        Self::validate(&body, schema)?;
        normalize_integers(&mut body, schema);
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
    }
}

/// Draft 7 counts any number with a zero fractional part as an integer.
fn is_integer(v: &Value) -> bool {
    v.is_i64() || v.is_u64() || v.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

fn normalize_integers(body: &mut Value, schema: &Schema) {
    let Some(obj) = body.as_object_mut() else {
        return;
    };
    for field in schema.fields {
        let Some(v) = obj.get_mut(field.name) else {
            continue;
        };
        match field.kind {
            FieldType::Integer if !(v.is_i64() || v.is_u64()) => {
                if let Some(f) = v.as_f64() {
                    *v = Value::from(f as i64);
                }
            }
            FieldType::Array(items) => {
                if let Some(arr) = v.as_array_mut() {
                    for item in arr {
                        normalize_integers(item, items);
                    }
                }
            }
            _ => {}
        }
    }
}

fn validate_field(field: &Field, v: &Value) -> Result<(), AppError> {
    let type_ok = match field.kind {
        FieldType::String => v.is_string(),
        FieldType::Integer => is_integer(v),
        FieldType::Number => v.is_number(),
        FieldType::Array(_) => v.is_array(),
    };
    if !type_ok {
        return Err(AppError::Validation(format!(
            "{} is not of type '{}' ({})",
            v,
            field.kind.name(),
            field.name
        )));
    }
    if let Some(min) = field.minimum {
        if let Some(n) = v.as_f64() {
            if n < min as f64 {
                return Err(AppError::Validation(format!(
                    "{} is less than the minimum of {} ({})",
                    v, min, field.name
                )));
            }
        }
    }
    if let (FieldType::Array(items), Some(arr)) = (field.kind, v.as_array()) {
        for item in arr {
            RequestValidator::validate(item, items)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    static LINE: Schema = Schema {
        fields: &[Field::new("qty", FieldType::Integer).required().minimum(1)],
    };
    static DOC: Schema = Schema {
        fields: &[
            Field::new("name", FieldType::String).required(),
            Field::new("price", FieldType::Number).required(),
            Field::new("note", FieldType::String),
            Field::new("lines", FieldType::Array(&LINE)),
        ],
    };

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(m) => m,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_document() {
        let body = json!({"name": "x", "price": 2, "note": null, "lines": [{"qty": 1}]});
        RequestValidator::validate(&body, &DOC).unwrap();
    }

    #[test]
    fn reports_missing_required() {
        let err = RequestValidator::validate(&json!({"name": "x"}), &DOC).unwrap_err();
        assert_eq!(message(err), "'price' is a required property");
    }

    #[test]
    fn rejects_wrong_types_and_minimum() {
        assert!(RequestValidator::validate(&json!({"name": 1, "price": 2}), &DOC).is_err());
        assert!(RequestValidator::validate(&json!({"name": "x", "price": "2"}), &DOC).is_err());
        assert!(RequestValidator::validate(&json!({"name": "x", "price": 2, "lines": [{"qty": 0}]}), &DOC).is_err());
        assert!(RequestValidator::validate(&json!({"name": "x", "price": 2, "lines": [{"qty": 1.5}]}), &DOC).is_err());
        assert!(RequestValidator::validate(&json!("notjson"), &DOC).is_err());
    }

    #[test]
    fn integral_floats_count_as_integers() {
        #[derive(serde::Deserialize)]
        struct Line {
            qty: i64,
        }
        #[derive(serde::Deserialize)]
        struct Doc {
            lines: Vec<Line>,
        }
        let body = json!({"name": "x", "price": 2, "lines": [{"qty": 4.0}]});
        let doc: Doc = RequestValidator::parse(body, &DOC).unwrap();
        assert_eq!(doc.lines[0].qty, 4);
        assert!(RequestValidator::validate(&json!({"name": "x", "price": 2, "lines": [{"qty": 4.5}]}), &DOC).is_err());
    }

    #[test]
    fn schema_json_lists_required_and_minimum() {
        let v = DOC.to_json();
        assert_eq!(v["type"], "object");
        assert_eq!(v["required"], json!(["name", "price"]));
        assert_eq!(v["properties"]["price"]["type"], "number");
        assert_eq!(v["properties"]["lines"]["items"]["properties"]["qty"]["minimum"], 1);
    }
}
