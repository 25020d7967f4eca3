/// Hours a fichaje counts for, regardless of what was actually clocked.
pub const HORAS_JORNADA: f64 = 8.0;

/// Divisor for the hourly rate used by the horas extras concept.
pub const HORAS_MENSUALES: f64 = 160.0;

/// Reference working days per month. Fixed at 22 for every período,
/// independent of the actual calendar month length.
pub const DIAS_LABORALES_REFERENCIA: i32 = 22;

pub const PORC_ANTIGUEDAD: f64 = 0.25;
pub const PORC_PRESENTISMO: f64 = 0.10;
pub const PORC_VIATICOS: f64 = 0.05;

pub const PORC_JUBILACION: f64 = 0.11;
pub const PORC_OBRA_SOCIAL: f64 = 0.03;
pub const PORC_LEY19032: f64 = 0.015;
pub const PORC_SINDICATO: f64 = 0.02;
