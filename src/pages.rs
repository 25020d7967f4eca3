use actix_web::web;

mod auth;
mod nomina;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/auth")
            .configure(auth::config))
        .service(web::scope("/nominas")
            .configure(nomina::config));
}
