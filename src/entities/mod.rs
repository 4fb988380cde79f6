pub mod prelude;

pub mod actividad;
pub mod asesor_clientes;
pub mod asesores;
pub mod renovaciones;
