//! People and organizations: clients, providers, persons and system users.

use super::*;

admin_resource! {
    Client {
        endpoint: "clients",
        id: id_cliente => "idCliente",
        label: "Cliente",
        title: "Registro de Clientes",
        create_label: "Agregar Cliente",
        empty: "No hay clientes",
        fields: {
            nombre: String => "nombre", "Nombre", "Nombre es requerido";
            documento: String => "documento", "Documento", "Documento es requerido";
            telefono: String => "telefono", "Teléfono", "Teléfono es requerido";
            direccion: String => "direccion", "Dirección", "Dirección es requerida";
        }
    }
}

admin_resource! {
    Provider {
        endpoint: "providers",
        id: id_proveedor => "idProveedor",
        label: "Proveedor",
        title: "Registro de Proveedores",
        create_label: "Agregar Proveedor",
        empty: "No hay proveedores",
        fields: {
            razon_social: String => "razonSocial", "Razón social", "Razón social es requerida";
            ruc: String => "ruc", "RUC", "RUC es requerido";
            telefono: String => "telefono", "Teléfono", "Teléfono es requerido";
            direccion: String => "direccion", "Dirección", "Dirección es requerida";
        }
    }
}

admin_resource! {
    Person {
        endpoint: "persons",
        id: id_persona => "idPersona",
        label: "Persona",
        title: "Registro de Personas",
        create_label: "Agregar Persona",
        empty: "No hay personas",
        fields: {
            nombre: String => "nombre", "Nombre", "Nombre es requerido";
            apellido: String => "apellido", "Apellido", "Apellido es requerido";
            documento: String => "documento", "Documento", "Documento es requerido";
            email: String => "email", "Correo", "Correo es requerido";
        }
    }
}

admin_resource! {
    /// A back-office account. Credentials are managed by the API, never through this form.
    User {
        endpoint: "users",
        id: id_usuario => "idUsuario",
        label: "Usuario",
        title: "Registro de Usuarios",
        create_label: "Agregar Usuario",
        empty: "No hay usuarios",
        fields: {
            usuario: String => "usuario", "Usuario", "Usuario es requerido";
            id_persona: i64 => "idPersona", "Persona", "Persona es requerida";
            rol: String => "rol", "Rol", "Rol es requerido";
        }
    }
}
