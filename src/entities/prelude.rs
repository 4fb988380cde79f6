pub use super::actividad::Entity as Actividad;
pub use super::asesor_clientes::Entity as AsesorClientes;
pub use super::asesores::Entity as Asesores;
pub use super::renovaciones::Entity as Renovaciones;
