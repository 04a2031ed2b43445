//! # Inventory Resources
//!
//! Every REST resource the admin back office manages. Each one is declared once through
//! [`admin_resource!`], which generates:
//!
//! - the record (`Product`) with every attribute optional, as the API may omit or null them
//! - a typed identifier (`ProductId`) rendered as the bare number the API routes expect
//! - the write payload (`ProductInput`) which carries no identifier field at all
//! - the [`Resource`], [`Editable`] and [`Tabular`] implementations
//!
//! Field keys are the API's camelCase names; they double as form field names.

use serde::{Deserialize, Serialize};
use slice_framework::view::{
    form_value, Column, Editable, FieldSpec, FormField, FormSchema, FormValues, Tabular,
};
use slice_framework::Resource;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Declares one resource: record, id, input, form schema and table columns.
///
/// Each field line reads `rust_name: Type => "jsonKey", "Header", "Required message";`.
macro_rules! admin_resource {
    (
        $(#[$doc:meta])*
        $name:ident {
            endpoint: $endpoint:literal,
            id: $id:ident => $id_json:literal,
            label: $label:literal,
            title: $title:literal,
            create_label: $create_label:literal,
            empty: $empty:literal,
            fields: {
                $( $field:ident : $ty:ty => $json:literal, $header:literal, $required:literal; )+
            }
        }
    ) => {
        paste::paste! {
            #[doc = "Identifier of [`" $name "`], assigned by the API."]
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct [<$name Id>](pub i64);

            impl From<i64> for [<$name Id>] {
                fn from(id: i64) -> Self {
                    Self(id)
                }
            }

            impl fmt::Display for [<$name Id>] {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for [<$name Id>] {
                type Err = std::num::ParseIntError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.trim().parse().map(Self)
                }
            }

            $(#[$doc])*
            #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
            pub struct $name {
                #[serde(rename = $id_json)]
                pub $id: [<$name Id>],
                $(
                    #[serde(rename = $json, default)]
                    pub $field: Option<$ty>,
                )+
            }

            #[doc = "Create and update payload of [`" $name "`]."]
            #[derive(Debug, Clone, PartialEq, Serialize)]
            pub struct [<$name Input>] {
                $(
                    #[serde(rename = $json)]
                    pub $field: $ty,
                )+
            }

            impl Resource for $name {
                type Id = [<$name Id>];
                type Input = [<$name Input>];

                const ENDPOINT: &'static str = $endpoint;
                const ID_FIELD: &'static str = $id_json;
                const LABEL: &'static str = $label;

                fn id(&self) -> &Self::Id {
                    &self.$id
                }

                fn to_input(&self) -> Self::Input {
                    [<$name Input>] {
                        $( $field: self.$field.clone().unwrap_or_default(), )+
                    }
                }
            }

            impl Editable for $name {
                fn schema() -> FormSchema {
                    FormSchema::new(vec![
                        $(
                            FieldSpec {
                                name: $json,
                                label: $header,
                                kind: <$ty as FormField>::KIND,
                                required_message: $required,
                            },
                        )+
                    ])
                }

                fn to_form(&self) -> FormValues {
                    let input = self.to_input();
                    FormValues::from([
                        $( ($json.to_string(), input.$field.to_form_value()), )+
                    ])
                }

                fn input_from_form(values: &FormValues) -> Self::Input {
                    [<$name Input>] {
                        $( $field: form_value(values, $json), )+
                    }
                }
            }

            impl Tabular for $name {
                const TITLE: &'static str = $title;
                const CREATE_LABEL: &'static str = $create_label;
                const EMPTY_MESSAGE: &'static str = $empty;

                fn columns() -> Vec<Column<Self>> {
                    vec![
                        $(
                            Column::new($header, |record: &$name| {
                                record.$field.as_ref().and_then(FormField::cell)
                            }),
                        )+
                    ]
                }
            }
        }
    };
}

mod catalog;
mod movements;
mod parties;
mod vouchers;

pub use catalog::*;
pub use movements::*;
pub use parties::*;
pub use vouchers::*;

/// Runs `$body` with `$T` bound to the record type of a [`ResourceKind`].
///
/// Lets callers that hold a runtime kind use the generic, statically typed slice API.
#[macro_export]
macro_rules! with_resource {
    ($kind:expr, $T:ident => $body:expr) => {{
        use $crate::model::*;
        match $kind {
            ResourceKind::Category => { type $T = Category; $body }
            ResourceKind::Product => { type $T = Product; $body }
            ResourceKind::Storage => { type $T = Storage; $body }
            ResourceKind::Client => { type $T = Client; $body }
            ResourceKind::Provider => { type $T = Provider; $body }
            ResourceKind::Person => { type $T = Person; $body }
            ResourceKind::User => { type $T = User; $body }
            ResourceKind::Document => { type $T = Document; $body }
            ResourceKind::Receipt => { type $T = Receipt; $body }
            ResourceKind::ReceiptDetail => { type $T = ReceiptDetail; $body }
            ResourceKind::Kardex => { type $T = Kardex; $body }
            ResourceKind::KardexDetail => { type $T = KardexDetail; $body }
            ResourceKind::Existence => { type $T = Existence; $body }
            ResourceKind::IncomeNote => { type $T = IncomeNote; $body }
            ResourceKind::IncomeNoteDetail => { type $T = IncomeNoteDetail; $body }
            ResourceKind::OutcomeNote => { type $T = OutcomeNote; $body }
            ResourceKind::OutcomeNoteDetail => { type $T = OutcomeNoteDetail; $body }
        }
    }};
}

/// Runtime name of a resource, parsed from its endpoint (`productos`, `incomeNotes`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Category,
    Product,
    Storage,
    Client,
    Provider,
    Person,
    User,
    Document,
    Receipt,
    ReceiptDetail,
    Kardex,
    KardexDetail,
    Existence,
    IncomeNote,
    IncomeNoteDetail,
    OutcomeNote,
    OutcomeNoteDetail,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 17] = [
        ResourceKind::Category,
        ResourceKind::Product,
        ResourceKind::Storage,
        ResourceKind::Client,
        ResourceKind::Provider,
        ResourceKind::Person,
        ResourceKind::User,
        ResourceKind::Document,
        ResourceKind::Receipt,
        ResourceKind::ReceiptDetail,
        ResourceKind::Kardex,
        ResourceKind::KardexDetail,
        ResourceKind::Existence,
        ResourceKind::IncomeNote,
        ResourceKind::IncomeNoteDetail,
        ResourceKind::OutcomeNote,
        ResourceKind::OutcomeNoteDetail,
    ];

    pub fn endpoint(self) -> &'static str {
        with_resource!(self, T => <T as Resource>::ENDPOINT)
    }

    pub fn label(self) -> &'static str {
        with_resource!(self, T => <T as Resource>::LABEL)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource '{0}', expected one of: {known}", known = known_endpoints())]
pub struct UnknownResource(pub String);

fn known_endpoints() -> String {
    ResourceKind::ALL
        .iter()
        .map(|kind| kind.endpoint())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.endpoint().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownResource(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn endpoints_are_unique_and_parse_back() {
        let endpoints: HashSet<_> = ResourceKind::ALL.iter().map(|k| k.endpoint()).collect();
        assert_eq!(endpoints.len(), ResourceKind::ALL.len());

        for kind in ResourceKind::ALL {
            assert_eq!(kind.endpoint().parse::<ResourceKind>(), Ok(kind));
        }
        assert_eq!("INCOMENOTES".parse::<ResourceKind>(), Ok(ResourceKind::IncomeNote));
    }

    #[test]
    fn unknown_resource_lists_known_endpoints() {
        let err = "marcas".parse::<ResourceKind>().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("unknown resource 'marcas'"));
        assert!(message.contains("productos"));
        assert!(message.contains("outcomeNoteDetails"));
    }

    #[test]
    fn identifiers_render_as_bare_numbers() {
        assert_eq!(ProductId(12).to_string(), "12");
        assert_eq!(" 7 ".parse::<KardexId>(), Ok(KardexId(7)));
        assert!("siete".parse::<KardexId>().is_err());
    }
}
