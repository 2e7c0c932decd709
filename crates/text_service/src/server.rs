use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{error::JsonPayloadError, web, App, HttpRequest, HttpServer};
use gemini_client::{GeminiClient, TextGenerator};
use log::{error, info};

use crate::config::AppConfig;
use crate::controllers::{system_controller, text_controller};
use crate::error::AppError;
use crate::middleware::TracingMiddleware;

pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub model: String,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Builds the Gemini-backed state from startup configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        let client = GeminiClient::new(config.api_key.clone())
            .with_http_client(http_client)
            .with_base_url(config.api_base.clone())
            .with_model(config.text_model.clone());

        Ok(Self::new(Arc::new(client), config.text_model.clone()))
    }
}

const DEFAULT_WORKER_COUNT: usize = 4;

/// Bodies are parsed as JSON whatever their content type; parse failures
/// answer with the same `{"error": ...}` shape as every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            AppError::InvalidBody(err.to_string()).into()
        })
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(text_controller::config)
        .configure(system_controller::config);
}

pub async fn run(config: AppConfig) -> Result<(), String> {
    info!("Starting text service...");

    let app_state = web::Data::new(AppState::from_config(&config)?);
    let bind_address = config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .wrap(TracingMiddleware)
            .configure(app_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(&bind_address)
    .map_err(|e| format!("Failed to bind server to {bind_address}: {e}"))?
    .run();

    info!(
        "Text service listening on http://{} (model '{}')",
        bind_address, config.text_model
    );

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
