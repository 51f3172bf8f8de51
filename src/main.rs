#[macro_use]
extern crate diesel;

mod admin;
mod auth;
mod config;
mod database;
mod error;
mod export;
mod models;
mod protocol;
mod public;
mod schedule;
mod schema;
#[cfg(test)]
mod testing;
mod utils;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, SqliteConnection};
use log::{info, warn};

use crate::{config::Config, export::ExportState};

type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let pool = database::build_pool(&config.database_url, config.pool_size)?;
    {
        let conn = pool.get().context("DB connection")?;
        database::init_schema(&conn)?;
        database::seed::seed(&conn, &config.admin_username, &config.admin_password)?;
    }

    let fonts = match export::render::load_font_family(&config.font_dir, &config.font_name) {
        Ok(fonts) => Some(fonts),
        Err(err) => {
            warn!("PDF export disabled: {:#}", err);
            None
        }
    };
    let export_state = web::Data::new(ExportState {
        fonts,
        venue_name: config.venue_name.clone(),
    });

    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        info!("No static directory at {}", static_dir.display());
    }

    info!("Listening on {}", config.bind);
    HttpServer::new(move || {
        let app = App::new()
            .wrap(middleware::Logger::default())
            .data(pool.clone())
            .app_data(export_state.clone())
            .service(web::scope("/auth").configure(auth::config))
            .service(web::scope("/admin").configure(admin::config))
            .service(web::scope("/public").configure(public::config))
            .service(web::scope("/export").configure(export::config));
        if serve_static {
            app.service(Files::new("/", &static_dir).index_file("index.html"))
        } else {
            app
        }
    })
    .bind(&config.bind)
    .with_context(|| format!("Failed to bind {}", config.bind))?
    .run()
    .await
    .context("Server error")
}
