pub use super::{
    calculo_detalle::Entity as CalculoDetalle, empleado::Entity as Empleado,
    fichaje::Entity as Fichaje, licencia::Entity as Licencia, nomina::Entity as Nomina,
    notificacion::Entity as Notificacion,
};
