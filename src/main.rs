mod api;
mod config;
mod storage;

use crate::config::config::ReceiverConfig;
use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use env_logger::Env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ReceiverConfig::load();

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level())).init();
    config.log_flags();

    start_server(config).await
}

async fn start_server(config: ReceiverConfig) -> std::io::Result<()> {
    log::info!("listening on {}:{}", config.listen, config.port);

    HttpServer::new(|| {
        App::new()
            .configure(api::configure)
            .wrap(Logger::default())
            .default_service(web::route().to(|req: actix_web::HttpRequest| async move {
                log::info!("404 Not Found: {}", req.path());
                HttpResponse::NotFound().finish()
            }))
    })
    .workers(num_cpus::get())
    .bind(config.addr())?
    .run()
    .await
}
