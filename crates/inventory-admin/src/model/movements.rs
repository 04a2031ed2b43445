//! Stock movements: kardex, existences and income/outcome notes.

use super::*;

admin_resource! {
    /// Stock card of one product in one storage.
    Kardex {
        endpoint: "kardexes",
        id: id_kardex => "idKardex",
        label: "Kardex",
        title: "Registro de Kardex",
        create_label: "Agregar Kardex",
        empty: "No hay kardex",
        fields: {
            id_producto: i64 => "idProducto", "Producto", "Producto es requerido";
            id_almacen: i64 => "idAlmacen", "Almacén", "Almacén es requerido";
            fecha: String => "fecha", "Fecha", "Fecha es requerida";
        }
    }
}

admin_resource! {
    KardexDetail {
        endpoint: "kardexDetails",
        id: id_detail_kardex => "idDetailKardex",
        label: "Detalle de kardex",
        title: "Registro de Detalles de Kardex",
        create_label: "Agregar Detalle",
        empty: "No hay detalles de kardex",
        fields: {
            id_kardex: i64 => "idKardex", "Kardex", "Kardex es requerido";
            tipo_movimiento: String => "tipoMovimiento", "Movimiento", "Movimiento es requerido";
            cantidad: f64 => "cantidad", "Cantidad", "Cantidad es requerida";
            saldo: f64 => "saldo", "Saldo", "Saldo es requerido";
        }
    }
}

admin_resource! {
    /// Quantity on hand of one product in one storage.
    Existence {
        endpoint: "existences",
        id: id_existencia => "idExistencia",
        label: "Existencia",
        title: "Registro de Existencias",
        create_label: "Agregar Existencia",
        empty: "No hay existencias",
        fields: {
            id_producto: i64 => "idProducto", "Producto", "Producto es requerido";
            id_almacen: i64 => "idAlmacen", "Almacén", "Almacén es requerido";
            cantidad: f64 => "cantidad", "Cantidad", "Cantidad es requerida";
        }
    }
}

admin_resource! {
    /// Goods received from a provider into a storage.
    IncomeNote {
        endpoint: "incomeNotes",
        id: id_nota_ingreso => "idNotaIngreso",
        label: "Nota de ingreso",
        title: "Registro de Notas de Ingreso",
        create_label: "Agregar Nota de Ingreso",
        empty: "No hay notas de ingreso",
        fields: {
            fecha: String => "fecha", "Fecha", "Fecha es requerida";
            id_proveedor: i64 => "idProveedor", "Proveedor", "Proveedor es requerido";
            id_almacen: i64 => "idAlmacen", "Almacén", "Almacén es requerido";
            observacion: String => "observacion", "Observación", "Observación es requerida";
        }
    }
}

admin_resource! {
    IncomeNoteDetail {
        endpoint: "incomeNoteDetails",
        id: id_detail_not_ing => "idDetailNotIng",
        label: "Detalle de nota de ingreso",
        title: "Registro de Detalles de Ingreso",
        create_label: "Agregar Detalle",
        empty: "No hay detalles de ingreso",
        fields: {
            id_nota_ingreso: i64 => "idNotaIngreso", "Nota de ingreso", "Nota de ingreso es requerida";
            id_producto: i64 => "idProducto", "Producto", "Producto es requerido";
            cantidad: f64 => "cantidad", "Cantidad", "Cantidad es requerida";
            precio: f64 => "precio", "Precio", "Precio es requerido";
        }
    }
}

admin_resource! {
    /// Goods dispatched from a storage to a client.
    OutcomeNote {
        endpoint: "outcomeNotes",
        id: id_nota_salida => "idNotaSalida",
        label: "Nota de salida",
        title: "Registro de Notas de Salida",
        create_label: "Agregar Nota de Salida",
        empty: "No hay notas de salida",
        fields: {
            fecha: String => "fecha", "Fecha", "Fecha es requerida";
            id_cliente: i64 => "idCliente", "Cliente", "Cliente es requerido";
            id_almacen: i64 => "idAlmacen", "Almacén", "Almacén es requerido";
            observacion: String => "observacion", "Observación", "Observación es requerida";
        }
    }
}

admin_resource! {
    OutcomeNoteDetail {
        endpoint: "outcomeNoteDetails",
        id: id_detail_not_sal => "idDetailNotSal",
        label: "Detalle de nota de salida",
        title: "Registro de Detalles de Salida",
        create_label: "Agregar Detalle",
        empty: "No hay detalles de salida",
        fields: {
            id_nota_salida: i64 => "idNotaSalida", "Nota de salida", "Nota de salida es requerida";
            id_producto: i64 => "idProducto", "Producto", "Producto es requerido";
            cantidad: f64 => "cantidad", "Cantidad", "Cantidad es requerida";
        }
    }
}
