use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use sqlx::PgPool;

use ticklist::auth::{AuthMiddleware, TokenService};
use ticklist::config::Config;
use ticklist::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // One signing key for the process lifetime: tokens issued by any login
    // stay verifiable until they expire, across all workers.
    let tokens = web::Data::new(TokenService::new(config.jwt_secret.as_bytes()));
    let pool_data = web::Data::new(pool.clone());

    log::info!("Starting ticklist server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(tokens.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await?;

    // Release the connection pool before the process exits.
    pool.close().await;

    Ok(())
}
