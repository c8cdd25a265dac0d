use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpResponse, HttpServer, Responder};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod contract;
pub mod render;
pub mod state;

pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

async fn index() -> impl Responder {
    HttpResponse::Ok().body("API is running...")
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(crate::contract::handlers::generate_contract),
        components(
            schemas(
                contract::models::ContractRequest,
                contract::models::PartyDetails,
                contract::models::CropDetails,
                contract::models::DealTerms,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Contract Service", description = "Farming agreement PDF generation.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok();
    let server_config = match crate::config::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid server configuration: {e}");
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new());

    let prometheus = PrometheusMetricsBuilder::new("contract_farming_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!(
        "Starting server at http://{}:{}",
        server_config.host,
        server_config.port
    );

    let bind_address = (server_config.host.clone(), server_config.port);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();

        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);
        for origin in &server_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(contract::handlers::config))
            .service(web::resource("/").route(web::get().to(index)))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
