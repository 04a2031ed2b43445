//! Catalog: categories, products and the storages that hold them.

use super::*;

admin_resource! {
    /// A product category.
    Category {
        endpoint: "categorias",
        id: id_categoria => "idCategoria",
        label: "Categoría",
        title: "Registro de Categorías",
        create_label: "Agregar Categoría",
        empty: "No hay categorías",
        fields: {
            nombre: String => "nombre", "Nombre", "Nombre es requerido";
        }
    }
}

admin_resource! {
    /// A sellable product. `estado` is either `"Activo"` or `"Desactivo"`.
    Product {
        endpoint: "productos",
        id: id_producto => "idProducto",
        label: "Producto",
        title: "Registro de Productos",
        create_label: "Agregar Producto",
        empty: "No hay productos",
        fields: {
            nombre: String => "nombre", "Nombre", "Nombre es requerido";
            precio: f64 => "precio", "Precio", "Precio es requerido";
            id_categoria: i64 => "idCategoria", "Categoría", "Categoría es requerida";
            unid_medida: String => "unidMedida", "Unidad de medida", "Unidad de medida es requerida";
            estado: String => "estado", "Estado", "Estado es requerido";
        }
    }
}

admin_resource! {
    /// A warehouse location.
    Storage {
        endpoint: "almacenes",
        id: id_almacen => "idAlmacen",
        label: "Almacén",
        title: "Registro de Almacenes",
        create_label: "Agregar Almacén",
        empty: "No hay almacenes",
        fields: {
            nombre: String => "nombre", "Nombre", "Nombre es requerido";
            ubicacion: String => "ubicacion", "Ubicación", "Ubicación es requerida";
        }
    }
}

/// Values accepted by [`Product::estado`].
pub const PRODUCT_STATES: [&str; 2] = ["Activo", "Desactivo"];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use slice_framework::view::FieldErrors;

    #[test]
    fn product_decodes_missing_and_null_attributes() {
        let product: Product = serde_json::from_value(json!({
            "idProducto": 3,
            "nombre": "Leche",
            "precio": null,
            "categoria": {"idCategoria": 1, "nombre": "Lácteos"}
        }))
        .unwrap();

        assert_eq!(product.id_producto, ProductId(3));
        assert_eq!(product.nombre.as_deref(), Some("Leche"));
        assert_eq!(product.precio, None);
        assert_eq!(product.estado, None);
    }

    #[test]
    fn input_carries_no_identifier() {
        let product = Product {
            id_producto: ProductId(3),
            nombre: Some("Leche".into()),
            precio: Some(4.5),
            id_categoria: Some(1),
            unid_medida: Some("L".into()),
            estado: Some("Activo".into()),
        };

        let body = serde_json::to_value(product.to_input()).unwrap();

        assert_eq!(
            body,
            json!({
                "nombre": "Leche",
                "precio": 4.5,
                "idCategoria": 1,
                "unidMedida": "L",
                "estado": "Activo"
            })
        );
    }

    #[test]
    fn storage_form_requires_location() {
        let mut values = Storage::schema().empty_values();
        values.insert("nombre".into(), "Central".into());

        let errors = Storage::schema().validate(&values);

        let expected: FieldErrors =
            [("ubicacion".to_string(), "Ubicación es requerida".to_string())].into();
        assert_eq!(errors, expected);
    }

    #[test]
    fn product_form_defaults_and_parsing() {
        let defaults = Product::schema().empty_values();
        assert_eq!(defaults["precio"], "0");
        assert_eq!(defaults["unidMedida"], "");

        let mut values = defaults;
        values.insert("nombre".into(), "Queso".into());
        values.insert("precio".into(), "12.5".into());
        values.insert("idCategoria".into(), "2".into());
        values.insert("unidMedida".into(), "kg".into());
        values.insert("estado".into(), PRODUCT_STATES[0].into());
        assert!(Product::schema().validate(&values).is_empty());

        let input = Product::input_from_form(&values);
        assert_eq!(input.precio, 12.5);
        assert_eq!(input.id_categoria, 2);
        assert_eq!(input.estado, "Activo");
    }

    #[test]
    fn product_columns_render_placeholders_for_missing_values() {
        let product = Product {
            id_producto: ProductId(1),
            nombre: Some("Pan".into()),
            precio: Some(2.0),
            id_categoria: None,
            unid_medida: Some(String::new()),
            estado: Some("Activo".into()),
        };

        let cells: Vec<_> = Product::columns()
            .iter()
            .map(|column| (column.cell)(&product))
            .collect();

        assert_eq!(
            cells,
            vec![
                Some("Pan".to_string()),
                Some("2.00".to_string()),
                None,
                None,
                Some("Activo".to_string()),
            ]
        );
    }
}
