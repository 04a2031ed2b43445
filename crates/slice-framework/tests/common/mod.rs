#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use slice_framework::view::{
    form_value, Column, Editable, FieldKind, FieldSpec, FormField, FormSchema, FormValues,
    Tabular,
};
use slice_framework::{
    BroadcastNotifier, Notification, Resource, ResourceApi, SliceActor, SliceClient,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id_marca: i64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub precio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInput {
    pub nombre: String,
    pub precio: f64,
}

impl Resource for Brand {
    type Id = i64;
    type Input = BrandInput;

    const ENDPOINT: &'static str = "marcas";
    const ID_FIELD: &'static str = "idMarca";
    const LABEL: &'static str = "Marca";

    fn id(&self) -> &i64 {
        &self.id_marca
    }

    fn to_input(&self) -> BrandInput {
        BrandInput {
            nombre: self.nombre.clone().unwrap_or_default(),
            precio: self.precio.unwrap_or_default(),
        }
    }
}

impl Editable for Brand {
    fn schema() -> FormSchema {
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
        ])
    }

    fn to_form(&self) -> FormValues {
        let input = self.to_input();
        FormValues::from([
            ("nombre".to_string(), input.nombre.to_form_value()),
            ("precio".to_string(), input.precio.to_form_value()),
        ])
    }

    fn input_from_form(values: &FormValues) -> BrandInput {
        BrandInput {
            nombre: form_value(values, "nombre"),
            precio: form_value(values, "precio"),
        }
    }
}

impl Tabular for Brand {
    const TITLE: &'static str = "Registro de Marcas";
    const CREATE_LABEL: &'static str = "Agregar Marca";
    const EMPTY_MESSAGE: &'static str = "No hay marcas";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Nombre", |b: &Brand| b.nombre.as_ref().and_then(FormField::cell)),
            Column::new("Precio", |b: &Brand| b.precio.as_ref().and_then(FormField::cell)),
        ]
    }
}

pub fn brand(id: i64, nombre: &str) -> Brand {
    Brand {
        id_marca: id,
        nombre: Some(nombre.to_string()),
        precio: Some(1.5),
    }
}

pub fn input(nombre: &str) -> BrandInput {
    BrandInput {
        nombre: nombre.to_string(),
        precio: 1.5,
    }
}

pub struct Harness {
    pub slice: SliceClient<Brand>,
    pub notifications: broadcast::Receiver<Notification>,
    pub handle: JoinHandle<()>,
}

pub fn spawn_slice(api: Arc<dyn ResourceApi<Brand>>) -> Harness {
    let notifier = BroadcastNotifier::new(16);
    let notifications = notifier.subscribe();
    let (actor, slice) = SliceActor::new(api, Arc::new(notifier), 8);
    let handle = tokio::spawn(actor.run());
    Harness {
        slice,
        notifications,
        handle,
    }
}
