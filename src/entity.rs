pub mod prelude;

pub mod calculo_detalle;
pub mod empleado;
pub mod fichaje;
pub mod licencia;
pub mod nomina;
pub mod notificacion;
pub mod sea_orm_active_enums;
