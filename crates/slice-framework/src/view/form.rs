//! Form values, field schema and validation for edit panels.

use crate::entity::Resource;
use std::collections::BTreeMap;

/// Raw form state: field name to the text the user typed.
pub type FormValues = BTreeMap<String, String>;

/// Validation failures: field name to message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Decimal,
    Integer,
}

impl FieldKind {
    /// The value a blank form starts with.
    pub fn empty_value(self) -> &'static str {
        match self {
            FieldKind::Text => "",
            FieldKind::Decimal | FieldKind::Integer => "0",
        }
    }
}

/// One required field of an edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required_message: &'static str,
}

impl FieldSpec {
    fn check(&self, raw: Option<&str>) -> Option<String> {
        let raw = raw.unwrap_or("");
        if raw.is_empty() {
            return Some(self.required_message.to_string());
        }
        let parses = match self.kind {
            FieldKind::Text => true,
            FieldKind::Decimal => raw.trim().parse::<f64>().is_ok_and(f64::is_finite),
            FieldKind::Integer => raw.trim().parse::<i64>().is_ok(),
        };
        (!parses).then(|| format!("{} debe ser un número", self.label))
    }
}

/// Fixed field set of one entity's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Entity-specific empty defaults used in create mode.
    pub fn empty_values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|field| (field.name.to_string(), field.kind.empty_value().to_string()))
            .collect()
    }

    pub fn validate(&self, values: &FormValues) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .check(values.get(field.name).map(String::as_str))
                    .map(|message| (field.name.to_string(), message))
            })
            .collect()
    }
}

/// A scalar that can live in a form field and a table cell.
pub trait FormField: Sized {
    const KIND: FieldKind;

    fn to_form_value(&self) -> String;

    fn from_form_value(raw: &str) -> Option<Self>;

    /// Cell text, or `None` when the value should render as the placeholder.
    fn cell(&self) -> Option<String>;
}

impl FormField for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_form_value(&self) -> String {
        self.clone()
    }

    fn from_form_value(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn cell(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.clone())
    }
}

impl FormField for f64 {
    const KIND: FieldKind = FieldKind::Decimal;

    fn to_form_value(&self) -> String {
        self.to_string()
    }

    fn from_form_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().filter(|value: &f64| value.is_finite())
    }

    fn cell(&self) -> Option<String> {
        Some(format!("{self:.2}"))
    }
}

impl FormField for i64 {
    const KIND: FieldKind = FieldKind::Integer;

    fn to_form_value(&self) -> String {
        self.to_string()
    }

    fn from_form_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn cell(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Reads a validated field out of the form.
///
/// Missing or unparsable values fall back to the field's empty value; callers validate with
/// [`FormSchema::validate`] first.
pub fn form_value<F: FormField + Default>(values: &FormValues, name: &str) -> F {
    values
        .get(name)
        .and_then(|raw| F::from_form_value(raw))
        .unwrap_or_default()
}

/// A resource that can be edited through a validated form.
pub trait Editable: Resource {
    fn schema() -> FormSchema;

    /// Form defaults populated from an existing record.
    fn to_form(&self) -> FormValues;

    /// Builds the write payload from a validated form.
    fn input_from_form(values: &FormValues) -> Self::Input;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec {
                name: "nombre",
                label: "Nombre",
                kind: FieldKind::Text,
                required_message: "Nombre es requerido",
            },
            FieldSpec {
                name: "precio",
                label: "Precio",
                kind: FieldKind::Decimal,
                required_message: "Precio es requerido",
            },
            FieldSpec {
                name: "idCategoria",
                label: "Categoría",
                kind: FieldKind::Integer,
                required_message: "Categoría es requerida",
            },
        ])
    }

    #[test]
    fn empty_values_follow_field_kind() {
        let values = product_schema().empty_values();
        assert_eq!(values["nombre"], "");
        assert_eq!(values["precio"], "0");
        assert_eq!(values["idCategoria"], "0");
    }

    #[test]
    fn validation_reports_required_and_numeric_errors() {
        let mut values = product_schema().empty_values();
        values.insert("precio".into(), "doce".into());
        values.insert("idCategoria".into(), "2.5".into());

        let errors = product_schema().validate(&values);

        let expected: FieldErrors = [
            ("idCategoria".to_string(), "Categoría debe ser un número".to_string()),
            ("nombre".to_string(), "Nombre es requerido".to_string()),
            ("precio".to_string(), "Precio debe ser un número".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(errors, expected);
    }

    #[test]
    fn valid_form_has_no_errors() {
        let mut values = product_schema().empty_values();
        values.insert("nombre".into(), "Leche".into());
        values.insert("precio".into(), "4.50".into());
        assert!(product_schema().validate(&values).is_empty());
    }

    #[test]
    fn cells_and_parsing() {
        assert_eq!(String::new().cell(), None);
        assert_eq!(12.5f64.cell().as_deref(), Some("12.50"));
        assert_eq!(form_value::<f64>(&FormValues::new(), "precio"), 0.0);
        assert_eq!(i64::from_form_value(" 7 "), Some(7));
    }
}
