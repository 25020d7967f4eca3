use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CalcularNomina {
    pub(super) empleado_id: Uuid,
    pub(super) periodo: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CalcularNominasMultiples {
    pub(super) empleado_ids: Vec<Uuid>,
    pub(super) periodo: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct AprobarNomina {
    pub(super) aprobado_por: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ListarNominas {
    pub(super) empleado_id: Option<Uuid>,
    pub(super) estado: Option<EstadoNomina>,
    pub(super) periodo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct Nominas {
    pub(super) nominas: Vec<nomina::Model>,
    pub(super) total: usize,
}

/// One row of the breakdown as computed, before persistence. Also the
/// response shape, so a recalculation answers with exactly what it stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct DetalleConcepto {
    pub(super) tipo_concepto: TipoConcepto,
    pub(super) concepto: String,
    pub(super) cantidad: f64,
    pub(super) valor_unitario: i64,
    pub(super) total_concepto: i64,
    pub(super) orden: i16,
}

impl DetalleConcepto {
    pub(super) fn active_model(&self, nomina_id: Uuid, empleado_id: Uuid, ahora: DateTimeWithTimeZone) -> calculo_detalle::ActiveModel {
        calculo_detalle::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(ahora),
            updated_at: Set(ahora),
            nomina_id: Set(nomina_id),
            empleado_id: Set(empleado_id),
            tipo_concepto: Set(self.tipo_concepto.clone()),
            concepto: Set(self.concepto.clone()),
            cantidad: Set(self.cantidad),
            valor_unitario: Set(self.valor_unitario),
            total_concepto: Set(self.total_concepto),
            orden: Set(self.orden),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct NominaCalculada {
    pub(super) nomina: nomina::Model,
    pub(super) detalles: Vec<DetalleConcepto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct NominaConDetalles {
    pub(super) nomina: nomina::Model,
    pub(super) detalles: Vec<calculo_detalle::Model>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct NominaDelLote {
    pub(super) empleado_id: Uuid,
    pub(super) nomina_id: Uuid,
    pub(super) total_neto: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ErrorDelLote {
    pub(super) empleado_id: Uuid,
    pub(super) error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ResultadoLote {
    pub(super) calculadas: Vec<NominaDelLote>,
    pub(super) errores: Vec<ErrorDelLote>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ResumenEmpleado {
    pub(super) id: Uuid,
    pub(super) nombre: String,
    pub(super) apellido: String,
    pub(super) numero_legajo: String,
}

impl From<empleado::Model> for ResumenEmpleado {
    fn from(empleado: empleado::Model) -> Self {
        Self {
            id: empleado.id,
            nombre: empleado.nombre,
            apellido: empleado.apellido,
            numero_legajo: empleado.numero_legajo,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct NominaAprobada {
    pub(super) nomina: nomina::Model,
    pub(super) empleado: Option<ResumenEmpleado>,
    pub(super) aprobado_por: ResumenEmpleado,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct ConteoPorEstado {
    pub(super) pendiente: usize,
    pub(super) calculado: usize,
    pub(super) aprobado: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ResumenPeriodo {
    pub(super) periodo: String,
    pub(super) total_empleados: usize,
    pub(super) total_haberes: i64,
    pub(super) total_deducciones: i64,
    pub(super) total_neto: i64,
    pub(super) por_estado: ConteoPorEstado,
    pub(super) nominas: Vec<nomina::Model>,
}
