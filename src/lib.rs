//! Lead intake and triage for an EV service workshop.
//!
//! The `server` feature builds the REST API storing contact requests, the
//! `dashboard` feature builds the admin client that polls it.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "dashboard")]
pub mod dashboard;

#[cfg(feature = "server")]
pub use server::{build_app_state, run};

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_web::{App, HttpServer, middleware, web};

    use crate::auth::AuthSettings;
    use crate::db::{establish_connection_pool, run_migrations};
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes;

    /// Opens the database, applies migrations and prepares shared state.
    pub fn build_app_state(
        server_config: &ServerConfig,
    ) -> std::io::Result<(web::Data<DieselRepository>, web::Data<AuthSettings>)> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        run_migrations(&pool).map_err(std::io::Error::other)?;

        if server_config.admin_password_hash.is_empty() {
            log::warn!("No admin password hash configured; admin sign-in is disabled");
        }

        Ok((
            web::Data::new(DieselRepository::new(pool)),
            web::Data::new(AuthSettings::from(server_config)),
        ))
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let (repo, auth_settings) = build_app_state(&server_config)?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .app_data(repo.clone())
                .app_data(auth_settings.clone())
                .configure(routes::configure)
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
