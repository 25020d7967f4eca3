use super::*;

impl FromRequest for nomina::Model {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let nomina_id = req.match_info().get("nomina_id").expect("This extractor must be used under `nomina_id` path");
            let Ok(nomina_id) = Uuid::from_str(nomina_id) else {
                return Err(actix_web::error::ErrorBadRequest("invalid `nomina_id`"))
            };

            let db = req.app_data::<web::Data<DatabaseConnection>>().expect("DatabaseConnection must be attached");

            let Some(nomina) = Nomina::find_by_id(nomina_id)
                .one(db.as_ref()).await.map_err(NominaError::from)?
            else {
                return Err(NominaError::NominaNoEncontrada.into())
            };

            Ok(nomina)
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{get, http::StatusCode, test, App, Responder};
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    #[actix_web::test]
    async fn test_nomina_extractor() {
        #[get("/{nomina_id}")]
        async fn test_handler(nomina: nomina::Model) -> impl Responder {
            web::Json(nomina)
        }

        let nomina = super::super::tests::nomina_de_prueba(Uuid::new_v4(), EstadoNomina::Calculado);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ nomina.clone() ],
                vec![ ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.into_connection()))
                .service(test_handler)
        ).await;

        {
            let req = test::TestRequest::default()
                .uri(&format!("/{}", nomina.id))
                .to_request();

            let returned: nomina::Model = test::call_and_read_body_json(&app, req).await;
            assert_eq!(returned, nomina);
        }

        {
            let req = test::TestRequest::default()
                .uri(&format!("/{}", Uuid::new_v4()))
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }

        {
            let req = test::TestRequest::default()
                .uri("/esto-no-es-un-uuid")
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
