//! Main server implementation for netscope

use crate::{
    api,
    config::Config,
    error::{Error, Result},
    network::{
        DnsResolver, IcmpProber, InterfaceSource, ReachabilityProber, SystemInterfaces,
        SystemResolver,
    },
    services::{InterfaceEnumerator, SpeedTester, UrlAnalyzer},
};
use axum::{extract::State, routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, info_span, warn};

/// Main server structure
pub struct Server {
    config: Arc<Config>,
    app: Router,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// Interface listing
    pub enumerator: Arc<InterfaceEnumerator>,

    /// URL parsing and host probing
    pub analyzer: Arc<UrlAnalyzer>,

    /// Bandwidth measurement
    pub speed_tester: Arc<SpeedTester>,

    /// Prometheus handle, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from explicit OS and network backends
    pub fn new(
        config: Arc<Config>,
        interfaces: Arc<dyn InterfaceSource>,
        resolver: Arc<dyn DnsResolver>,
        prober: Arc<dyn ReachabilityProber>,
    ) -> Self {
        let enumerator = InterfaceEnumerator::new(interfaces.clone(), info_span!("interfaces"));
        let analyzer = UrlAnalyzer::new(prober, resolver, info_span!("url_analyzer"));
        let speed_tester = SpeedTester::new(
            interfaces,
            config.speed_test.clone(),
            info_span!("speed_test"),
        );

        Self {
            config,
            enumerator: Arc::new(enumerator),
            analyzer: Arc::new(analyzer),
            speed_tester: Arc::new(speed_tester),
            metrics: None,
        }
    }

    /// Build state backed by the running system
    pub fn system(config: Arc<Config>) -> Self {
        let resolver: Arc<dyn DnsResolver> = Arc::new(SystemResolver::new(info_span!("dns")));
        let prober = Arc::new(IcmpProber::new(
            resolver.clone(),
            config.ping_timeout(),
            config.probe.ping_payload_size,
            info_span!("icmp"),
        ));

        Self::new(config, Arc::new(SystemInterfaces), resolver, prober)
    }

    /// Serve metrics from `handle`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing netscope server");

        let config = Arc::new(config);
        let mut state = AppState::system(config.clone());

        if config.telemetry.enable_metrics {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| Error::Internal {
                    message: format!("Failed to install metrics recorder: {e}"),
                })?;
            state = state.with_metrics(handle);
            info!(path = %config.telemetry.metrics_path, "Prometheus metrics enabled");
        }

        let app = build_router(state);

        Ok(Self { config, app })
    }

    /// Run the server until shutdown signal
    pub async fn run(self) -> Result<()> {
        let addr = self.config.server.bind_address;

        info!("Starting HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Internal {
                message: format!("Failed to bind to address {addr}: {e}"),
            })?;

        info!("Netscope listening on {}", addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Internal {
                message: format!("Server error: {e}"),
            })?;

        Ok(())
    }
}

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .merge(api::routes(state.clone()))
        .merge(api::docs_routes());

    if let Some(handle) = state.metrics.clone() {
        app = app.route(
            &state.config.telemetry.metrics_path,
            get(render_metrics).with_state(handle),
        );
    }

    app
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down");
        },
    }
}
