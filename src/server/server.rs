//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::core::batch::WorkerPool;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{Result, ServiceError};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with its store and batch worker pool
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(&config.storage).await?;
        let pool = WorkerPool::new(config.batch.concurrency);
        let state = AppState::new(config.clone(), storage, pool);

        Ok(Self::from_state(state))
    }

    /// Create a server around an existing application state
    pub fn from_state(state: AppState) -> Self {
        Self {
            config: state.config.server.clone(),
            state,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let server_config = &state.config.server;
        let cors = Self::build_cors(server_config);
        let max_body_size = server_config.max_body_size;

        App::new()
            .app_data(state)
            .app_data(routes::items::json_config(max_body_size))
            .app_data(routes::items::path_config())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "items-rs")))
            .configure(routes::health::configure_routes)
            .configure(routes::items::configure_item_routes)
    }

    fn build_cors(config: &ServerConfig) -> Cors {
        let cors_config = &config.cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.any_origin() {
                warn!("CORS admits every origin");
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.origins {
                    cors = cors.allowed_origin(origin);
                }
            }

            let methods: Vec<actix_web::http::Method> = cors_config
                .methods
                .iter()
                .filter_map(|m| m.parse().ok())
                .collect();
            if !methods.is_empty() {
                cors = cors.allowed_methods(methods);
            }

            cors = cors.allow_any_header().max_age(cors_config.max_age);
        }

        cors
    }

    /// Start the HTTP server and block until it stops.
    ///
    /// The batch worker pool is drained and closed once actix has stopped
    /// accepting requests.
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;
        let workers = self.config.worker_count();
        let timeout = Duration::from_secs(self.config.timeout);

        info!("Starting HTTP server on {} ({} workers)", bind_addr, workers);

        let state = web::Data::new(self.state);
        let app_state = state.clone();

        let server = ActixHttpServer::new(move || Self::create_app(app_state.clone()))
            .workers(workers)
            .client_request_timeout(timeout)
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let served = server
            .await
            .map_err(|e| ServiceError::server(format!("Server error: {}", e)));

        info!("HTTP server stopped, draining batch workers");
        state.processor.shutdown().await;

        served
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
