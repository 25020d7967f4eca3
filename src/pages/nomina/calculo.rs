use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::{consts, entity::{fichaje, licencia, nomina::{Deducciones, Haberes}, prelude::*, sea_orm_active_enums::{EstadoLicencia, TipoConcepto}}, utils::Periodo};

use super::{model::DetalleConcepto, NominaError};

pub(super) struct DiasDelPeriodo {
    pub(super) dias_trabajados: i32,
    pub(super) dias_ausencia: i32,
}

/// Worked days = calendar days of the month minus approved licencias whose
/// interval overlaps the período (inclusive on both ends), floored at 1.
pub(super) async fn calcular_dias_trabajados(db: &impl ConnectionTrait, empleado_id: Uuid, periodo: Periodo) -> Result<DiasDelPeriodo, DbErr> {
    let licencias = Licencia::find()
        .filter(licencia::Column::EmpleadoId.eq(empleado_id))
        .filter(licencia::Column::Estado.eq(EstadoLicencia::Aprobado))
        .filter(licencia::Column::FechaInicio.lte(periodo.ultimo_dia()))
        .filter(licencia::Column::FechaFin.gte(periodo.primer_dia()))
        .count(db).await?;

    let dias_ausencia = licencias as i32;
    let dias_trabajados = (periodo.dias_del_mes() - dias_ausencia).max(1);

    Ok(DiasDelPeriodo { dias_trabajados, dias_ausencia })
}

pub(super) struct HorasDelPeriodo {
    pub(super) total_horas: f64,
    pub(super) horas_extras: f64,
}

/// Every fichaje counts as a flat 8-hour day no matter what was clocked;
/// only the excess over 8 of an entry that did record hours counts as
/// overtime. Entries without recorded hours contribute no overtime.
pub(super) async fn calcular_horas_trabajadas(db: &impl ConnectionTrait, empleado_id: Uuid, periodo: Periodo) -> Result<HorasDelPeriodo, DbErr> {
    let fichajes = Fichaje::find()
        .filter(fichaje::Column::EmpleadoId.eq(empleado_id))
        .filter(fichaje::Column::Fecha.between(periodo.primer_dia(), periodo.ultimo_dia()))
        .all(db).await?;

    let total_horas = fichajes.len() as f64 * consts::HORAS_JORNADA;
    let horas_extras = fichajes.iter()
        .filter_map(|fichaje| fichaje.horas_trabajadas)
        .map(|horas| (horas - consts::HORAS_JORNADA).max(0.0))
        .sum();

    Ok(HorasDelPeriodo { total_horas, horas_extras })
}

pub(super) struct Componentes {
    pub(super) haberes: Haberes,
    pub(super) deducciones: Deducciones,
    pub(super) total_neto: i64,
}

/// Half-away-from-zero, applied to every individual formula result. The
/// stored totals depend on rounding at each step, not only at the end.
pub(super) fn redondear(valor: f64) -> i64 {
    valor.round() as i64
}

/// The payroll formula. Deductions are percentages of `total_haberes`, not
/// of the base salary. The reference month is fixed at 22 working days
/// regardless of the actual calendar month.
pub(super) fn calcular_componentes(sueldo_basico: i64, dias_trabajados: i32, horas_extras: f64) -> Result<Componentes, NominaError> {
    if sueldo_basico <= 0 {
        return Err(NominaError::SueldoInvalido(sueldo_basico));
    }

    let sueldo = sueldo_basico as f64;

    let antiguedad = redondear(sueldo * consts::PORC_ANTIGUEDAD * dias_trabajados as f64 / consts::DIAS_LABORALES_REFERENCIA as f64);
    let presentismo = if dias_trabajados == consts::DIAS_LABORALES_REFERENCIA {
        redondear(sueldo * consts::PORC_PRESENTISMO)
    } else {
        0
    };
    let horas_extras = redondear(horas_extras * sueldo / consts::HORAS_MENSUALES);
    let viaticos = redondear(sueldo * consts::PORC_VIATICOS);
    let otros_haberes = 0;

    let total_haberes = redondear((sueldo_basico + antiguedad + presentismo + horas_extras + viaticos + otros_haberes) as f64);

    let jubilacion = redondear(total_haberes as f64 * consts::PORC_JUBILACION);
    let obra_social = redondear(total_haberes as f64 * consts::PORC_OBRA_SOCIAL);
    let ley19032 = redondear(total_haberes as f64 * consts::PORC_LEY19032);
    let sindicato = redondear(total_haberes as f64 * consts::PORC_SINDICATO);
    let otros_des = 0;

    let total_deducciones = redondear((jubilacion + obra_social + ley19032 + sindicato + otros_des) as f64);

    let total_neto = redondear((total_haberes - total_deducciones) as f64);

    Ok(Componentes {
        haberes: Haberes {
            sueldo_basico,
            antiguedad,
            presentismo,
            horas_extras,
            viaticos,
            otros_haberes,
            total_haberes,
        },
        deducciones: Deducciones {
            jubilacion,
            obra_social,
            ley19032,
            sindicato,
            otros_des,
            total_deducciones,
        },
        total_neto,
    })
}

/// The fixed 9-row breakdown of a nómina, in display order. Quantity is 1
/// for every concept except horas extras, which carries the hour count and
/// the hourly rate as unit value.
pub(super) fn armar_detalles(sueldo_basico: i64, horas_extras: f64, componentes: &Componentes) -> Vec<DetalleConcepto> {
    let Componentes { haberes, deducciones, .. } = componentes;

    vec![
        DetalleConcepto {
            tipo_concepto: TipoConcepto::Remunerativo,
            concepto: "Sueldo Básico".to_string(),
            cantidad: 1.0,
            valor_unitario: haberes.sueldo_basico,
            total_concepto: haberes.sueldo_basico,
            orden: 1,
        },
        DetalleConcepto {
            tipo_concepto: TipoConcepto::Remunerativo,
            concepto: "Antigüedad".to_string(),
            cantidad: 1.0,
            valor_unitario: haberes.antiguedad,
            total_concepto: haberes.antiguedad,
            orden: 2,
        },
        DetalleConcepto {
            tipo_concepto: TipoConcepto::Remunerativo,
            concepto: "Presentismo".to_string(),
            cantidad: 1.0,
            valor_unitario: haberes.presentismo,
            total_concepto: haberes.presentismo,
            orden: 3,
        },
        DetalleConcepto {
            tipo_concepto: TipoConcepto::Remunerativo,
            concepto: "Horas Extras".to_string(),
            cantidad: horas_extras,
            valor_unitario: redondear(sueldo_basico as f64 / consts::HORAS_MENSUALES),
            total_concepto: haberes.horas_extras,
            orden: 4,
        },
        DetalleConcepto {
            tipo_concepto: TipoConcepto::NoRemunerativo,
            concepto: "Viáticos".to_string(),
            cantidad: 1.0,
            valor_unitario: haberes.viaticos,
            total_concepto: haberes.viaticos,
            orden: 5,
        },
        DetalleConcepto {
            tipo_concepto: TipoConcepto::Deduccion,
            concepto: "Jubilación (11%)".to_string(),
            cantidad: 1.0,
            valor_unitario: deducciones.jubilacion,
            total_concepto: deducciones.jubilacion,
            orden: 6,
        },
        DetalleConcepto {
            tipo_concepto: TipoConcepto::Deduccion,
            concepto: "Obra Social (3%)".to_string(),
            cantidad: 1.0,
            valor_unitario: deducciones.obra_social,
            total_concepto: deducciones.obra_social,
            orden: 7,
        },
        DetalleConcepto {
            tipo_concepto: TipoConcepto::Deduccion,
            concepto: "Ley 19032 (1.5%)".to_string(),
            cantidad: 1.0,
            valor_unitario: deducciones.ley19032,
            total_concepto: deducciones.ley19032,
            orden: 8,
        },
        DetalleConcepto {
            tipo_concepto: TipoConcepto::Deduccion,
            concepto: "Sindicato (2%)".to_string(),
            cantidad: 1.0,
            valor_unitario: deducciones.sindicato,
            total_concepto: deducciones.sindicato,
            orden: 9,
        },
    ]
}
