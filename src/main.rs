use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::{sync::Arc, time::Duration};

mod config;
mod errors;
mod handlers;
mod models;
mod schema;
mod store;
mod templates;
mod utils;

use config::Config;
use store::{NoteStore, PgNoteStore};
use templates::{HtmlRenderer, Renderer};

/// Everything a handler needs, built once at startup.
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
    pub renderer: Arc<dyn Renderer>,
    pub store_timeout: Duration,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(handlers::note::home))
            .default_service(web::to(handlers::get_only)),
    )
    .service(
        web::resource("/snippet")
            .route(web::get().to(handlers::note::show))
            .default_service(web::to(handlers::get_only)),
    )
    .route("/snippet/new", web::route().to(handlers::note::create_page))
    .route("/snippet/create", web::route().to(handlers::note::create_fixed))
    .default_service(web::to(handlers::not_found));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(startup_error)?;
    let pool = store::build_pool(&config).map_err(startup_error)?;
    store::run_migrations(&pool).map_err(startup_error)?;

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(config.rate_limit_per_second)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| startup_error("invalid rate limit settings"))?;

    let state = web::Data::new(AppState {
        store: Arc::new(PgNoteStore::new(pool)),
        renderer: Arc::new(HtmlRenderer),
        store_timeout: config.store_timeout,
    });

    log::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Governor::new(&governor_conf))
            .wrap(Logger::default())
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn startup_error<E: std::fmt::Display>(err: E) -> std::io::Error {
    log::error!("startup failed: {}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
