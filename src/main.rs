use actix_cors::Cors;
use actix_web::{middleware::from_fn, middleware::Logger, App, HttpServer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

use storefront_cms::config::AppConfig;
use storefront_cms::database::{bootstrap_admin, initialize_database};
use storefront_cms::middleware::rate_limit;
use storefront_cms::openapi_config::{configure_openapi, ApiDoc};
use storefront_cms::routes;
use storefront_cms::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let pool = initialize_database(&config.database_url).await?;
    bootstrap_admin(&pool, config.bootstrap_admin.as_ref()).await?;

    let state = AppState::from_config(pool, &config);

    tracing::info!(
        "Storefront CMS ({}) listening on http://{}",
        config.environment,
        config.bind_address
    );
    tracing::info!("API Documentation: http://{}/swagger-ui/", config.bind_address);

    // Build the OpenAPI spec once, outside the worker factory
    let openapi_spec = configure_openapi(ApiDoc::openapi());

    HttpServer::new(move || {
        App::new()
            .configure(|cfg| state.register(cfg))
            .wrap(from_fn(rate_limit))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
            )
            .wrap(Logger::default())
            .service(
                utoipa_swagger_ui::SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi_spec.clone()),
            )
            .configure(routes::configure)
    })
    .bind(config.bind_address)?
    .run()
    .await?;

    Ok(())
}
