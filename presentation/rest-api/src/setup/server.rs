use poem::{EndpointExt, Route, Server as PoemServer, listener::TcpListener, middleware::Tracing};
use poem_openapi::OpenApiService;

use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub struct Server;

impl Server {
    /// Serves the API and runs the suggestion poll alongside it. The poll
    /// is stopped when the listener exits.
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let scheduler = container.scheduler;
        let poll = tokio::spawn(scheduler.clone().run());

        let api_service = OpenApiService::new(
            (container.health_api, container.suggestion_api),
            "Suggestion Engine API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("http://{}", addr));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        let app = Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .with(config.cors)
            .with(Tracing);

        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);

        let served = PoemServer::new(TcpListener::bind(&addr))
            .run_with_graceful_shutdown(
                app,
                async {
                    let _ = tokio::signal::ctrl_c().await;
                },
                None,
            )
            .await;

        scheduler.shutdown();
        poll.await?;
        served?;
        Ok(())
    }
}
