//! # HTTP Server
//!
//! Router assembly and listener loop for the customer API.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use log::info;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::handlers::{customer_by_id, customers, fallback, root, AppState};

/// Customer API server bound to one store file.
pub struct CustomerServer {
    config: ServerConfig,
    router: Router,
}

impl CustomerServer {
    /// Build the server; the store at `config.db_path` must already be initialized.
    pub fn with_config(config: ServerConfig) -> Self {
        let router = build_router(AppState::new(config.db_path.clone()));
        Self { config, router }
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Consumes the server, returning its router for in-process requests.
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until ctrl-c.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

        let listener = TcpListener::bind(addr).await?;
        info!(
            "event=server_start module=http status=ok addr={} db_path={}",
            addr,
            self.config.db_path.display()
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("event=server_stop module=http status=ok");
        Ok(())
    }
}

/// Routes every endpoint against `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(root))
        .route("/customers", any(customers))
        .route("/customer", any(customer_by_id))
        .fallback(fallback)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=signal module=http status=error error={err}");
        std::future::pending::<()>().await;
    }
}
