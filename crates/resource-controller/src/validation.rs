//! # Payload Validation
//!
//! A successful HTTP response is not the same as usable data. Before a load
//! is allowed to resolve to `Success`, the payload is classified against a
//! [`PayloadShape`]:
//!
//! - **Empty**: a zero-length collection. Still a success.
//! - **Well-formed**: required fields present, types consistent, no duplicate
//!   identifying keys.
//! - **Malformed**: anything else, reported as a [`ValidationError`].
//!
//! ```rust
//! use resource_controller::validation::{FieldKind, PayloadClass, PayloadShape, RecordShape};
//! use serde_json::json;
//!
//! let shape = PayloadShape::Collection(
//!     RecordShape::new()
//!         .required("id", FieldKind::Unsigned)
//!         .required("name", FieldKind::String)
//!         .identified_by("id"),
//! );
//!
//! assert_eq!(shape.classify(&json!([])), Ok(PayloadClass::Empty));
//! assert!(shape.classify(&json!([{ "id": 1 }])).is_err());
//! ```

use crate::error::ValidationError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// JSON value kinds, as far as shape checking cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Any JSON number.
    Number,
    /// A number that fits a `u64`: no sign, no fraction.
    Unsigned,
    Bool,
    Array,
    Object,
    Null,
}

impl FieldKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => FieldKind::String,
            Value::Number(_) => FieldKind::Number,
            Value::Bool(_) => FieldKind::Bool,
            Value::Array(_) => FieldKind::Array,
            Value::Object(_) => FieldKind::Object,
            Value::Null => FieldKind::Null,
        }
    }

    /// Whether `value` is of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Unsigned => value.is_u64(),
            kind => *kind == FieldKind::of(value),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Unsigned => "unsigned integer",
            FieldKind::Bool => "bool",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Null => "null",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
struct Field {
    name: String,
    kind: FieldKind,
    required: bool,
    items: Option<RecordShape>,
}

/// Expected layout of a single JSON object.
#[derive(Debug, Clone, Default)]
pub struct RecordShape {
    fields: Vec<Field>,
    identity: Option<String>,
    strict: bool,
}

impl RecordShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, name: &str, kind: FieldKind) -> Self {
        self.field(name, kind, true, None)
    }

    /// An optional field may be absent or `null`.
    pub fn optional(self, name: &str, kind: FieldKind) -> Self {
        self.field(name, kind, false, None)
    }

    /// A required array field whose items are themselves checked as records.
    pub fn collection(self, name: &str, items: RecordShape) -> Self {
        self.field(name, FieldKind::Array, true, Some(items))
    }

    /// Names the key that must be unique across items when this record sits
    /// inside a collection. Without one, whole items are compared.
    pub fn identified_by(mut self, key: &str) -> Self {
        self.identity = Some(key.to_string());
        self
    }

    /// Reject keys that are not declared.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn field(mut self, name: &str, kind: FieldKind, required: bool, items: Option<RecordShape>) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            kind,
            required,
            items,
        });
        self
    }

    fn check(&self, object: &Map<String, Value>, at: &str) -> Result<(), ValidationError> {
        let mut missing = Vec::new();

        for field in &self.fields {
            match object.get(&field.name) {
                None => {
                    if field.required {
                        missing.push(field.name.clone());
                    }
                }
                Some(Value::Null) if !field.required => {}
                Some(value) => {
                    if !field.kind.accepts(value) {
                        return Err(ValidationError::TypeMismatch {
                            at: at.to_string(),
                            field: field.name.clone(),
                            expected: field.kind,
                            found: FieldKind::of(value),
                        });
                    }
                    if let (Some(items), Value::Array(values)) = (&field.items, value) {
                        items.check_items(values, &format!("{at}.{}", field.name))?;
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields {
                at: at.to_string(),
                fields: missing,
            });
        }

        if self.strict {
            let unknown: Vec<&str> = object
                .keys()
                .filter(|key| !self.fields.iter().any(|f| &f.name == *key))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                return Err(ValidationError::unexpected(
                    at,
                    format!("unexpected keys: {}", unknown.join(", ")),
                ));
            }
        }

        Ok(())
    }

    fn check_items(&self, items: &[Value], at: &str) -> Result<(), ValidationError> {
        // identity value -> index of the first item carrying it
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (index, item) in items.iter().enumerate() {
            let item_at = format!("{at}[{index}]");
            let Value::Object(object) = item else {
                return Err(ValidationError::unexpected(
                    item_at,
                    format!("expected an object, found {}", FieldKind::of(item)),
                ));
            };
            self.check(object, &item_at)?;

            let (key, identity) = match &self.identity {
                Some(key) => match object.get(key) {
                    Some(value) => (key.as_str(), value.to_string()),
                    None => continue,
                },
                None => ("item", item.to_string()),
            };
            if let Some(&first) = seen.get(&identity) {
                return Err(ValidationError::DuplicateItems {
                    at: at.to_string(),
                    key: key.to_string(),
                    value: identity,
                    first,
                    second: index,
                });
            }
            seen.insert(identity, index);
        }

        Ok(())
    }
}

/// The shape a resource's payload is expected to have.
#[derive(Debug, Clone, Default)]
pub enum PayloadShape {
    /// No checks; decoding into the target type is the only gate.
    #[default]
    Any,
    /// A single JSON object.
    Record(RecordShape),
    /// A JSON array of objects.
    Collection(RecordShape),
}

/// Outcome of a successful classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadClass {
    Empty,
    WellFormed,
}

impl PayloadShape {
    pub fn classify(&self, payload: &Value) -> Result<PayloadClass, ValidationError> {
        match (self, payload) {
            (PayloadShape::Any, _) => Ok(PayloadClass::WellFormed),
            (PayloadShape::Record(record), Value::Object(object)) => {
                record.check(object, "$")?;
                Ok(PayloadClass::WellFormed)
            }
            (PayloadShape::Collection(record), Value::Array(items)) => {
                if items.is_empty() {
                    return Ok(PayloadClass::Empty);
                }
                record.check_items(items, "$")?;
                Ok(PayloadClass::WellFormed)
            }
            (PayloadShape::Record(_), other) => Err(ValidationError::unexpected(
                "$",
                format!("expected an object, found {}", FieldKind::of(other)),
            )),
            (PayloadShape::Collection(_), other) => Err(ValidationError::unexpected(
                "$",
                format!("expected a collection, found {}", FieldKind::of(other)),
            )),
        }
    }
}
