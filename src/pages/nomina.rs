use std::str::FromStr;

use actix_web::{body, dev, get, http::{self, header::ContentType, StatusCode}, post, put, web, FromRequest, HttpRequest, HttpResponse};
use chrono::Local;
use futures_util::future::LocalBoxFuture;
use sea_orm::{prelude::DateTimeWithTimeZone, ActiveModelTrait, ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::{auth::Admin, entity::{calculo_detalle, empleado, nomina, notificacion, prelude::*, sea_orm_active_enums::{EstadoNomina, RoleType, TipoConcepto}}, utils::{Periodo, PeriodoInvalido}};

use calculo::*;
use model::*;

mod calculo;
mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(calcular_nomina)
        .service(calcular_nominas_multiples)
        .service(obtener_resumen_periodo)
        .service(obtener_nominas)
        .service(aprobar_nomina)
        .service(obtener_nomina);
}

#[derive(Debug, Error)]
enum NominaError {
    #[error("Período debe estar en formato YYYY-MM")]
    PeriodoInvalido(#[from] PeriodoInvalido),
    #[error("Empleado no encontrado")]
    EmpleadoNoEncontrado,
    #[error("Usuario que aprueba no encontrado")]
    AprobadorNoEncontrado,
    #[error("Nómina no encontrada")]
    NominaNoEncontrada,
    #[error("No se puede recalcular una nómina ya aprobada")]
    NominaYaAprobada,
    #[error("Ya existe nómina para este período")]
    NominaExistente,
    #[error("Sueldo básico inválido: {0}. Empleado debe tener sueldo bruto definido")]
    SueldoInvalido(i64),
    #[error("empleadoIds debe ser un listado no vacío")]
    LoteVacio,
    #[error("Error de base de datos")]
    Db(#[from] sea_orm::DbErr),
}

impl actix_web::error::ResponseError for NominaError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> http::StatusCode {
        match self {
            NominaError::PeriodoInvalido(_)
            | NominaError::NominaYaAprobada
            | NominaError::NominaExistente
            | NominaError::SueldoInvalido(_)
            | NominaError::LoteVacio => StatusCode::BAD_REQUEST,
            NominaError::EmpleadoNoEncontrado
            | NominaError::AprobadorNoEncontrado
            | NominaError::NominaNoEncontrada => StatusCode::NOT_FOUND,
            NominaError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[get("")]
async fn obtener_nominas(db: web::Data<DatabaseConnection>, _admin: Admin, filtro: web::Query<ListarNominas>) -> Result<HttpResponse, NominaError> {
    let mut consulta = Nomina::find();

    if let Some(empleado_id) = filtro.empleado_id {
        consulta = consulta.filter(nomina::Column::EmpleadoId.eq(empleado_id));
    }

    if let Some(estado) = &filtro.estado {
        consulta = consulta.filter(nomina::Column::Estado.eq(estado.clone()));
    }

    if let Some(periodo) = &filtro.periodo {
        let periodo = Periodo::from_str(periodo)?;
        consulta = consulta.filter(nomina::Column::Periodo.eq(periodo.to_string()));
    }

    let nominas = consulta
        .order_by_desc(nomina::Column::Periodo)
        .all(db.as_ref()).await?;

    Ok(HttpResponse::Ok().json(Nominas {
        total: nominas.len(),
        nominas,
    }))
}

#[get("/{nomina_id}")]
async fn obtener_nomina(db: web::Data<DatabaseConnection>, solicitante: empleado::Model, nomina: nomina::Model) -> Result<HttpResponse, actix_web::Error> {
    // Cada empleado puede ver su propia nómina; el resto es cosa de RRHH
    if solicitante.role != RoleType::Admin && nomina.empleado_id != solicitante.id {
        return Err(actix_web::error::ErrorForbidden("forbidden"));
    }

    let detalles = CalculoDetalle::find()
        .filter(calculo_detalle::Column::NominaId.eq(nomina.id))
        .order_by_asc(calculo_detalle::Column::Orden)
        .all(db.as_ref()).await.map_err(NominaError::from)?;

    Ok(HttpResponse::Ok().json(NominaConDetalles { nomina, detalles }))
}

#[post("/calcular")]
async fn calcular_nomina(db: web::Data<DatabaseConnection>, _admin: Admin, payload: web::Json<CalcularNomina>) -> Result<HttpResponse, NominaError> {
    let periodo = Periodo::from_str(&payload.periodo)?;

    let empleado = Empleado::find_by_id(payload.empleado_id)
        .one(db.as_ref()).await?
        .ok_or(NominaError::EmpleadoNoEncontrado)?;

    let existente = Nomina::find()
        .filter(nomina::Column::EmpleadoId.eq(empleado.id))
        .filter(nomina::Column::Periodo.eq(periodo.to_string()))
        .one(db.as_ref()).await?;

    if existente.as_ref().is_some_and(|nomina| nomina.estado == EstadoNomina::Aprobado) {
        return Err(NominaError::NominaYaAprobada);
    }

    let (nomina, detalles) = recalcular(db.as_ref(), &empleado, periodo, existente).await?;

    Ok(HttpResponse::Created().json(NominaCalculada { nomina, detalles }))
}

/// Runs the aggregation and the formula, then persists the nomina and its
/// replaced breakdown in one transaction so a crash can't leave detalle rows
/// out of sync with the record they describe.
async fn recalcular(db: &DatabaseConnection, empleado: &empleado::Model, periodo: Periodo, existente: Option<nomina::Model>) -> Result<(nomina::Model, Vec<DetalleConcepto>), NominaError> {
    let dias = calcular_dias_trabajados(db, empleado.id, periodo).await?;
    let horas = calcular_horas_trabajadas(db, empleado.id, periodo).await?;

    let sueldo_basico = empleado.sueldo_base().unwrap_or(0);
    let componentes = calcular_componentes(sueldo_basico, dias.dias_trabajados, horas.horas_extras)?;

    let detalles = armar_detalles(sueldo_basico, horas.horas_extras, &componentes);

    let ahora = Local::now().fixed_offset();
    let txn = db.begin().await?;

    let nomina = match existente {
        Some(existente) => {
            nomina::ActiveModel {
                id: Unchanged(existente.id),
                updated_at: Set(ahora),
                estado: Set(EstadoNomina::Calculado),
                dias_trabajados: Set(dias.dias_trabajados),
                dias_ausencia: Set(dias.dias_ausencia),
                horas_trabajadas: Set(horas.total_horas),
                horas_extras: Set(horas.horas_extras),
                sueldo_basico: Set(sueldo_basico),
                haberes: Set(componentes.haberes.clone()),
                deducciones: Set(componentes.deducciones.clone()),
                total_neto: Set(componentes.total_neto),
                calculado_en: Set(ahora),
                ..Default::default()
            }.update(&txn).await?
        },
        None => {
            Nomina::insert(nomina::ActiveModel {
                id: Set(Uuid::new_v4()),
                created_at: Set(ahora),
                updated_at: Set(ahora),
                empleado_id: Set(empleado.id),
                periodo: Set(periodo.to_string()),
                estado: Set(EstadoNomina::Calculado),
                dias_trabajados: Set(dias.dias_trabajados),
                dias_ausencia: Set(dias.dias_ausencia),
                horas_trabajadas: Set(horas.total_horas),
                horas_extras: Set(horas.horas_extras),
                sueldo_basico: Set(sueldo_basico),
                haberes: Set(componentes.haberes.clone()),
                deducciones: Set(componentes.deducciones.clone()),
                total_neto: Set(componentes.total_neto),
                calculado_en: Set(ahora),
                aprobado_por: Set(None),
                fecha_aprobacion: Set(None),
            }).exec_with_returning(&txn).await?
        },
    };

    CalculoDetalle::delete_many()
        .filter(calculo_detalle::Column::NominaId.eq(nomina.id))
        .exec(&txn).await?;

    CalculoDetalle::insert_many(detalles.iter().map(|detalle| detalle.active_model(nomina.id, empleado.id, ahora)))
        .exec_without_returning(&txn).await?;

    txn.commit().await?;

    Ok((nomina, detalles))
}

#[post("/calcular-multiples")]
async fn calcular_nominas_multiples(db: web::Data<DatabaseConnection>, _admin: Admin, payload: web::Json<CalcularNominasMultiples>) -> Result<HttpResponse, NominaError> {
    if payload.empleado_ids.is_empty() {
        return Err(NominaError::LoteVacio);
    }

    let periodo = Periodo::from_str(&payload.periodo)?;

    let mut calculadas = Vec::new();
    let mut errores = Vec::new();

    for &empleado_id in &payload.empleado_ids {
        match calcular_del_lote(db.as_ref(), empleado_id, periodo).await {
            Ok(calculada) => calculadas.push(calculada),
            Err(error) => errores.push(ErrorDelLote {
                empleado_id,
                error: error.to_string(),
            }),
        }
    }

    Ok(HttpResponse::Created().json(ResultadoLote { calculadas, errores }))
}

/// The batch path never overwrites: any existing nomina for the pair is a
/// recorded error, and no detalle rows are written. The single-calculation
/// path behaves differently on both counts.
async fn calcular_del_lote(db: &DatabaseConnection, empleado_id: Uuid, periodo: Periodo) -> Result<NominaDelLote, NominaError> {
    let empleado = Empleado::find_by_id(empleado_id)
        .one(db).await?
        .ok_or(NominaError::EmpleadoNoEncontrado)?;

    let existente = Nomina::find()
        .filter(nomina::Column::EmpleadoId.eq(empleado.id))
        .filter(nomina::Column::Periodo.eq(periodo.to_string()))
        .one(db).await?;

    if existente.is_some() {
        return Err(NominaError::NominaExistente);
    }

    let dias = calcular_dias_trabajados(db, empleado.id, periodo).await?;
    let horas = calcular_horas_trabajadas(db, empleado.id, periodo).await?;

    let sueldo_basico = empleado.sueldo_base().unwrap_or(0);
    let componentes = calcular_componentes(sueldo_basico, dias.dias_trabajados, horas.horas_extras)?;

    let ahora = Local::now().fixed_offset();
    let nomina_id = Uuid::new_v4();

    Nomina::insert(nomina::ActiveModel {
        id: Set(nomina_id),
        created_at: Set(ahora),
        updated_at: Set(ahora),
        empleado_id: Set(empleado.id),
        periodo: Set(periodo.to_string()),
        estado: Set(EstadoNomina::Calculado),
        dias_trabajados: Set(dias.dias_trabajados),
        dias_ausencia: Set(dias.dias_ausencia),
        horas_trabajadas: Set(horas.total_horas),
        horas_extras: Set(horas.horas_extras),
        sueldo_basico: Set(sueldo_basico),
        haberes: Set(componentes.haberes),
        deducciones: Set(componentes.deducciones),
        total_neto: Set(componentes.total_neto),
        calculado_en: Set(ahora),
        aprobado_por: Set(None),
        fecha_aprobacion: Set(None),
    }).exec_without_returning(db).await?;

    Ok(NominaDelLote {
        empleado_id: empleado.id,
        nomina_id,
        total_neto: componentes.total_neto,
    })
}

#[put("/{nomina_id}/aprobar")]
async fn aprobar_nomina(db: web::Data<DatabaseConnection>, _admin: Admin, nomina_id: web::Path<Uuid>, payload: web::Json<AprobarNomina>) -> Result<HttpResponse, NominaError> {
    let aprobador = Empleado::find_by_id(payload.aprobado_por)
        .one(db.as_ref()).await?
        .ok_or(NominaError::AprobadorNoEncontrado)?;

    let nomina = Nomina::find_by_id(*nomina_id)
        .one(db.as_ref()).await?
        .ok_or(NominaError::NominaNoEncontrada)?;

    if nomina.estado == EstadoNomina::Aprobado {
        return Err(NominaError::NominaYaAprobada);
    }

    let ahora = Local::now().fixed_offset();

    let nomina = nomina::ActiveModel {
        id: Unchanged(nomina.id),
        updated_at: Set(ahora),
        estado: Set(EstadoNomina::Aprobado),
        aprobado_por: Set(Some(aprobador.id)),
        fecha_aprobacion: Set(Some(ahora)),
        ..Default::default()
    }.update(db.as_ref()).await?;

    // Fire-and-forget: la aprobación ya quedó persistida
    if let Err(error) = Notificacion::insert(notificacion_de_aprobacion(&nomina, ahora))
        .exec_without_returning(db.as_ref()).await
    {
        warn!(%error, nomina_id = %nomina.id, "no se pudo crear la notificación de aprobación");
    }

    let empleado = Empleado::find_by_id(nomina.empleado_id)
        .one(db.as_ref()).await?;

    Ok(HttpResponse::Ok().json(NominaAprobada {
        empleado: empleado.map(ResumenEmpleado::from),
        aprobado_por: ResumenEmpleado::from(aprobador),
        nomina,
    }))
}

fn notificacion_de_aprobacion(nomina: &nomina::Model, ahora: DateTimeWithTimeZone) -> notificacion::ActiveModel {
    notificacion::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(ahora),
        updated_at: Set(ahora),
        empleado_id: Set(nomina.empleado_id),
        tipo: Set("aprobacion".to_string()),
        asunto: Set("Tu recibo de haberes está disponible".to_string()),
        descripcion: Set(format!(
            "Tu nómina del período {} ha sido aprobada. Ya puedes descargar tu recibo de haberes desde la sección \"Mis Documentos\".",
            nomina.periodo
        )),
        leida: Set(false),
    }
}

#[get("/resumen/{periodo}")]
async fn obtener_resumen_periodo(db: web::Data<DatabaseConnection>, _admin: Admin, periodo: web::Path<String>) -> Result<HttpResponse, NominaError> {
    let periodo = Periodo::from_str(&periodo)?;

    let nominas = Nomina::find()
        .filter(nomina::Column::Periodo.eq(periodo.to_string()))
        .all(db.as_ref()).await?;

    let mut por_estado = ConteoPorEstado::default();
    let mut total_haberes = 0;
    let mut total_deducciones = 0;
    let mut total_neto = 0;

    for nomina in &nominas {
        total_haberes += nomina.haberes.total_haberes;
        total_deducciones += nomina.deducciones.total_deducciones;
        total_neto += nomina.total_neto;

        match nomina.estado {
            EstadoNomina::Pendiente => por_estado.pendiente += 1,
            EstadoNomina::Calculado => por_estado.calculado += 1,
            EstadoNomina::Aprobado => por_estado.aprobado += 1,
        }
    }

    Ok(HttpResponse::Ok().json(ResumenPeriodo {
        periodo: periodo.to_string(),
        total_empleados: nominas.len(),
        total_haberes,
        total_deducciones,
        total_neto,
        por_estado,
        nominas,
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use actix_web::{body::MessageBody, http::Method, test, App};
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    use crate::{auth::Authority, entity::{fichaje, nomina::{Deducciones, Haberes}}};

    use super::*;

    const SECRET: &[u8] = b"secret";

    pub(crate) fn empleado_de_prueba(role: RoleType, sueldo_bruto: Option<i64>) -> empleado::Model {
        empleado::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            nombre: "Marta".to_string(),
            apellido: "Sosa".to_string(),
            numero_legajo: "L-0007".to_string(),
            email: "msosa@dosrobles.test".to_string(),
            password: Vec::new(),
            role,
            sueldo_bruto,
            sueldo_basico: None,
        }
    }

    /// Nómina del escenario de referencia: 160000 de sueldo, 22 días
    /// trabajados sobre junio (8 ausencias), 5 horas extras.
    pub(crate) fn nomina_de_prueba(empleado_id: Uuid, estado: EstadoNomina) -> nomina::Model {
        nomina::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            empleado_id,
            periodo: "2025-06".to_string(),
            estado,
            dias_trabajados: 22,
            dias_ausencia: 8,
            horas_trabajadas: 176.0,
            horas_extras: 5.0,
            sueldo_basico: 160_000,
            haberes: Haberes {
                sueldo_basico: 160_000,
                antiguedad: 40_000,
                presentismo: 16_000,
                horas_extras: 5_000,
                viaticos: 8_000,
                otros_haberes: 0,
                total_haberes: 229_000,
            },
            deducciones: Deducciones {
                jubilacion: 25_190,
                obra_social: 6_870,
                ley19032: 3_435,
                sindicato: 4_580,
                otros_des: 0,
                total_deducciones: 40_075,
            },
            total_neto: 188_925,
            calculado_en: Local::now().into(),
            aprobado_por: None,
            fecha_aprobacion: None,
        }
    }

    fn token_de_admin() -> String {
        Authority::new(SECRET).issue_for(&empleado_de_prueba(RoleType::Admin, None))
    }

    #[actix_web::test]
    async fn test_calcular_periodo_invalido() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(calcular_nomina)
        ).await;

        let req = test::TestRequest::default()
            .uri("/calcular")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(CalcularNomina {
                empleado_id: Uuid::new_v4(),
                periodo: "2025-6".to_string(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.into_body().try_into_bytes().unwrap(), "Período debe estar en formato YYYY-MM".as_bytes());
    }

    #[actix_web::test]
    async fn test_calcular_empleado_no_encontrado() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ Vec::<empleado::Model>::new() ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(calcular_nomina)
        ).await;

        let req = test::TestRequest::default()
            .uri("/calcular")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(CalcularNomina {
                empleado_id: Uuid::new_v4(),
                periodo: "2025-06".to_string(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_calcular_rechaza_aprobada() {
        let empleado = empleado_de_prueba(RoleType::Empleado, Some(160_000));
        let aprobada = nomina_de_prueba(empleado.id, EstadoNomina::Aprobado);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ empleado.clone() ] ])
            .append_query_results([ vec![ aprobada ] ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(calcular_nomina)
        ).await;

        let req = test::TestRequest::default()
            .uri("/calcular")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(CalcularNomina {
                empleado_id: empleado.id,
                periodo: "2025-06".to_string(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.into_body().try_into_bytes().unwrap(), "No se puede recalcular una nómina ya aprobada".as_bytes());
    }

    #[actix_web::test]
    async fn test_calcular_crea_nomina_con_detalles() {
        let empleado = empleado_de_prueba(RoleType::Empleado, Some(160_000));
        let creada = nomina_de_prueba(empleado.id, EstadoNomina::Calculado);

        // Junio 2025: 30 días, 8 licencias aprobadas -> 22 trabajados.
        // 22 fichajes de 8 horas, el primero con 13 -> 5 horas extras.
        let fichajes = (1..=22)
            .map(|dia| fichaje::Model {
                id: Uuid::new_v4(),
                created_at: Local::now().into(),
                updated_at: Local::now().into(),
                empleado_id: empleado.id,
                fecha: NaiveDate::from_ymd_opt(2025, 6, dia).unwrap(),
                horas_trabajadas: Some(if dia == 1 { 13.0 } else { 8.0 }),
            })
            .collect::<Vec<_>>();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ empleado.clone() ] ])
            .append_query_results([ Vec::<nomina::Model>::new() ])
            .append_query_results([ vec![ BTreeMap::from([("num_items", Into::<Value>::into(8i64))]) ] ])
            .append_query_results([ fichajes ])
            .append_query_results([ vec![ creada.clone() ] ])
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 0 },
                MockExecResult { last_insert_id: 0, rows_affected: 9 },
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(calcular_nomina)
        ).await;

        let req = test::TestRequest::default()
            .uri("/calcular")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(CalcularNomina {
                empleado_id: empleado.id,
                periodo: "2025-06".to_string(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let calculada: NominaCalculada = test::read_body_json(response).await;
        assert_eq!(calculada.nomina, creada);

        assert_eq!(calculada.detalles.len(), 9);
        assert_eq!(calculada.detalles.iter().map(|d| d.orden).collect::<Vec<_>>(), (1..=9).collect::<Vec<_>>());
        assert_eq!(calculada.detalles.iter().map(|d| d.total_concepto).collect::<Vec<_>>(), vec![
            160_000, 40_000, 16_000, 5_000, 8_000, 25_190, 6_870, 3_435, 4_580,
        ]);

        let horas_extras = &calculada.detalles[3];
        assert_eq!(horas_extras.cantidad, 5.0);
        assert_eq!(horas_extras.valor_unitario, 1_000);
    }

    #[actix_web::test]
    async fn test_recalcular_actualiza_nomina_existente() {
        let empleado = empleado_de_prueba(RoleType::Empleado, Some(160_000));
        let existente = nomina_de_prueba(empleado.id, EstadoNomina::Calculado);
        let actualizada = nomina::Model {
            updated_at: Local::now().into(),
            calculado_en: Local::now().into(),
            ..existente.clone()
        };

        let fichajes = (1..=22)
            .map(|dia| fichaje::Model {
                id: Uuid::new_v4(),
                created_at: Local::now().into(),
                updated_at: Local::now().into(),
                empleado_id: empleado.id,
                fecha: NaiveDate::from_ymd_opt(2025, 6, dia).unwrap(),
                horas_trabajadas: Some(if dia == 1 { 13.0 } else { 8.0 }),
            })
            .collect::<Vec<_>>();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ empleado.clone() ] ])
            .append_query_results([ vec![ existente.clone() ] ])
            .append_query_results([ vec![ BTreeMap::from([("num_items", Into::<Value>::into(8i64))]) ] ])
            .append_query_results([ fichajes ])
            .append_query_results([ vec![ actualizada.clone() ] ])
            .append_exec_results([
                // los detalles anteriores se borran y se reinsertan, nunca se acumulan
                MockExecResult { last_insert_id: 0, rows_affected: 9 },
                MockExecResult { last_insert_id: 0, rows_affected: 9 },
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(calcular_nomina)
        ).await;

        let req = test::TestRequest::default()
            .uri("/calcular")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(CalcularNomina {
                empleado_id: empleado.id,
                periodo: "2025-06".to_string(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let calculada: NominaCalculada = test::read_body_json(response).await;
        assert_eq!(calculada.nomina.id, existente.id);
        assert_eq!(calculada.nomina.estado, EstadoNomina::Calculado);

        assert_eq!(calculada.detalles.len(), 9);
        assert_eq!(calculada.detalles.iter().map(|d| d.orden).collect::<Vec<_>>(), (1..=9).collect::<Vec<_>>());
        assert_eq!(calculada.nomina.total_neto, 188_925);
    }

    #[actix_web::test]
    async fn test_calcular_multiples_sin_empleados() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(calcular_nominas_multiples)
        ).await;

        let req = test::TestRequest::default()
            .uri("/calcular-multiples")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(CalcularNominasMultiples {
                empleado_ids: Vec::new(),
                periodo: "2025-06".to_string(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_calcular_multiples_aisla_errores() {
        let primero = empleado_de_prueba(RoleType::Empleado, Some(200_000));
        let desconocido = Uuid::new_v4();
        let tercero = empleado_de_prueba(RoleType::Empleado, Some(180_000));

        let sin_licencias = || vec![ BTreeMap::from([("num_items", Into::<Value>::into(0i64))]) ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // primero: se calcula
            .append_query_results([ vec![ primero.clone() ] ])
            .append_query_results([ Vec::<nomina::Model>::new() ])
            .append_query_results([ sin_licencias() ])
            .append_query_results([ Vec::<fichaje::Model>::new() ])
            // desconocido: no existe
            .append_query_results([ Vec::<empleado::Model>::new() ])
            // tercero: se calcula
            .append_query_results([ vec![ tercero.clone() ] ])
            .append_query_results([ Vec::<nomina::Model>::new() ])
            .append_query_results([ sin_licencias() ])
            .append_query_results([ Vec::<fichaje::Model>::new() ])
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(calcular_nominas_multiples)
        ).await;

        let req = test::TestRequest::default()
            .uri("/calcular-multiples")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(CalcularNominasMultiples {
                empleado_ids: vec![primero.id, desconocido, tercero.id],
                periodo: "2025-06".to_string(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let resultado: ResultadoLote = test::read_body_json(response).await;
        assert_eq!(resultado.calculadas.len(), 2);
        assert_eq!(resultado.calculadas[0].empleado_id, primero.id);
        assert_eq!(resultado.calculadas[1].empleado_id, tercero.id);

        assert_eq!(resultado.errores.len(), 1);
        assert_eq!(resultado.errores[0].empleado_id, desconocido);
        assert_eq!(resultado.errores[0].error, "Empleado no encontrado");
    }

    #[actix_web::test]
    async fn test_calcular_multiples_rechaza_existente() {
        let empleado = empleado_de_prueba(RoleType::Empleado, Some(200_000));
        let existente = nomina_de_prueba(empleado.id, EstadoNomina::Calculado);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ empleado.clone() ] ])
            .append_query_results([ vec![ existente ] ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(calcular_nominas_multiples)
        ).await;

        let req = test::TestRequest::default()
            .uri("/calcular-multiples")
            .method(Method::POST)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(CalcularNominasMultiples {
                empleado_ids: vec![empleado.id],
                periodo: "2025-06".to_string(),
            })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let resultado: ResultadoLote = test::read_body_json(response).await;
        assert!(resultado.calculadas.is_empty());
        assert_eq!(resultado.errores.len(), 1);
        assert_eq!(resultado.errores[0].error, "Ya existe nómina para este período");
    }

    #[actix_web::test]
    async fn test_aprobar_nomina() {
        let empleado = empleado_de_prueba(RoleType::Empleado, Some(160_000));
        let aprobador = empleado_de_prueba(RoleType::Admin, None);

        let calculada = nomina_de_prueba(empleado.id, EstadoNomina::Calculado);
        let aprobada = nomina::Model {
            estado: EstadoNomina::Aprobado,
            aprobado_por: Some(aprobador.id),
            fecha_aprobacion: Some(Local::now().into()),
            ..calculada.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ aprobador.clone() ] ])
            .append_query_results([ vec![ calculada.clone() ] ])
            .append_query_results([ vec![ aprobada.clone() ] ])
            .append_query_results([ vec![ empleado.clone() ] ])
            .append_exec_results([
                // alta de la notificación
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(aprobar_nomina)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}/aprobar", calculada.id))
            .method(Method::PUT)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(AprobarNomina { aprobado_por: aprobador.id })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::OK);

        let resultado: NominaAprobada = test::read_body_json(response).await;
        assert_eq!(resultado.nomina.estado, EstadoNomina::Aprobado);
        assert_eq!(resultado.nomina.aprobado_por, Some(aprobador.id));
        assert!(resultado.nomina.fecha_aprobacion.unwrap() >= resultado.nomina.calculado_en);

        assert_eq!(resultado.aprobado_por.id, aprobador.id);
        assert_eq!(resultado.empleado.unwrap().id, empleado.id);
    }

    #[actix_web::test]
    async fn test_aprobar_rechaza_aprobada() {
        let aprobador = empleado_de_prueba(RoleType::Admin, None);
        let aprobada = nomina_de_prueba(Uuid::new_v4(), EstadoNomina::Aprobado);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ aprobador.clone() ] ])
            .append_query_results([ vec![ aprobada.clone() ] ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(aprobar_nomina)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}/aprobar", aprobada.id))
            .method(Method::PUT)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(AprobarNomina { aprobado_por: aprobador.id })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.into_body().try_into_bytes().unwrap(), "No se puede recalcular una nómina ya aprobada".as_bytes());
    }

    #[actix_web::test]
    async fn test_aprobar_aprobador_no_encontrado() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ Vec::<empleado::Model>::new() ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(aprobar_nomina)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}/aprobar", Uuid::new_v4()))
            .method(Method::PUT)
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .set_json(AprobarNomina { aprobado_por: Uuid::new_v4() })
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.into_body().try_into_bytes().unwrap(), "Usuario que aprueba no encontrado".as_bytes());
    }

    #[::core::prelude::v1::test]
    fn test_notificacion_de_aprobacion() {
        let nomina = nomina_de_prueba(Uuid::new_v4(), EstadoNomina::Aprobado);

        let notificacion = notificacion_de_aprobacion(&nomina, Local::now().into());

        assert_eq!(notificacion.empleado_id.clone().unwrap(), nomina.empleado_id);
        assert_eq!(notificacion.tipo.clone().unwrap(), "aprobacion");
        assert_eq!(notificacion.asunto.clone().unwrap(), "Tu recibo de haberes está disponible");
        assert!(notificacion.descripcion.clone().unwrap().contains("2025-06"));
        assert!(!notificacion.leida.clone().unwrap());
    }

    #[actix_web::test]
    async fn test_resumen_periodo() {
        let nominas = vec![
            nomina_de_prueba(Uuid::new_v4(), EstadoNomina::Calculado),
            nomina_de_prueba(Uuid::new_v4(), EstadoNomina::Calculado),
            nomina_de_prueba(Uuid::new_v4(), EstadoNomina::Aprobado),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ nominas ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(obtener_resumen_periodo)
        ).await;

        let req = test::TestRequest::default()
            .uri("/resumen/2025-06")
            .insert_header(("Authorization", format!("JWT {}", token_de_admin())))
            .to_request();

        let resumen: ResumenPeriodo = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resumen.periodo, "2025-06");
        assert_eq!(resumen.total_empleados, 3);
        assert_eq!(resumen.total_haberes, 687_000);
        assert_eq!(resumen.total_deducciones, 120_225);
        assert_eq!(resumen.total_neto, 566_775);

        assert_eq!(resumen.por_estado.pendiente, 0);
        assert_eq!(resumen.por_estado.calculado, 2);
        assert_eq!(resumen.por_estado.aprobado, 1);
        assert_eq!(resumen.nominas.len(), 3);
    }

    #[actix_web::test]
    async fn test_obtener_nomina_de_otro_empleado() {
        let solicitante = empleado_de_prueba(RoleType::Empleado, Some(160_000));
        let ajena = nomina_de_prueba(Uuid::new_v4(), EstadoNomina::Calculado);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ vec![ ajena.clone() ] ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(obtener_nomina)
        ).await;

        let token = Authority::new(SECRET).issue_for(&solicitante);

        let req = test::TestRequest::default()
            .uri(&format!("/{}", ajena.id))
            .insert_header(("Authorization", format!("JWT {token}")))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
