//! Document types, receipts and their line items.

use super::*;

admin_resource! {
    /// A document type (DNI, RUC, factura, ...).
    Document {
        endpoint: "documents",
        id: id_documento => "idDocumento",
        label: "Documento",
        title: "Registro de Documentos",
        create_label: "Agregar Documento",
        empty: "No hay documentos",
        fields: {
            nombre: String => "nombre", "Nombre", "Nombre es requerido";
            descripcion: String => "descripcion", "Descripción", "Descripción es requerida";
        }
    }
}

admin_resource! {
    Receipt {
        endpoint: "receipts",
        id: id_comprobante => "idComprobante",
        label: "Comprobante",
        title: "Registro de Comprobantes",
        create_label: "Agregar Comprobante",
        empty: "No hay comprobantes",
        fields: {
            id_documento: i64 => "idDocumento", "Documento", "Documento es requerido";
            serie: String => "serie", "Serie", "Serie es requerida";
            numero: String => "numero", "Número", "Número es requerido";
            fecha: String => "fecha", "Fecha", "Fecha es requerida";
            total: f64 => "total", "Total", "Total es requerido";
        }
    }
}

admin_resource! {
    /// One line of a [`Receipt`].
    ReceiptDetail {
        endpoint: "receiptDetails",
        id: id_detail => "idDetail",
        label: "Detalle de comprobante",
        title: "Registro de Detalles de Comprobante",
        create_label: "Agregar Detalle",
        empty: "No hay detalles de comprobante",
        fields: {
            id_comprobante: i64 => "idComprobante", "Comprobante", "Comprobante es requerido";
            id_producto: i64 => "idProducto", "Producto", "Producto es requerido";
            cantidad: f64 => "cantidad", "Cantidad", "Cantidad es requerida";
            precio: f64 => "precio", "Precio", "Precio es requerido";
        }
    }
}
