use actix_web::web;

pub mod domain;
pub mod upload;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(upload::form_config())
        .app_data(upload::text_config())
        .service(
        web::resource("/")
            .route(web::post().to(upload::receive))
            .route(web::route().to(upload::ready)),
    );
}
