use std::{process, sync::Arc, time::Duration};

use rentapp::{
    application::{
        chrome::ChromeService,
        error::AppError,
        home::HomePageService,
        listings::ListingService,
        prefetch::{LatestPostPrefetcher, PrefetchDispatcher},
        session::SessionResolver,
    },
    config,
    domain::listings::ListingSet,
    infra::{
        auth,
        error::InfraError,
        http::{self, HttpState},
        rpc::{HttpRpcPrefetcher, NoopPrefetcher},
        telemetry,
    },
};
use tokio::sync::oneshot;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let state = build_http_state(&settings)?;
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "rentapp::serve",
        addr = %settings.server.addr,
        "listening"
    );

    serve_until_shutdown(listener, router, settings.server.graceful_shutdown).await
}

fn build_http_state(settings: &config::Settings) -> Result<HttpState, AppError> {
    let listings = Arc::new(ListingSet::featured()?);

    let session_provider = auth::session_provider(&settings.auth)?;

    let prefetcher: Arc<dyn LatestPostPrefetcher> = match &settings.rpc.base_url {
        Some(base) => {
            let prefetcher = HttpRpcPrefetcher::new(base, settings.rpc.timeout)?;
            info!(
                target = "rentapp::serve",
                endpoint = %prefetcher.endpoint(),
                "latest post prefetch enabled"
            );
            Arc::new(prefetcher)
        }
        None => {
            warn!(
                target = "rentapp::serve",
                "rpc.base_url is not configured; prefetches are skipped"
            );
            Arc::new(NoopPrefetcher)
        }
    };

    let home = HomePageService::new(listings.clone(), PrefetchDispatcher::new(prefetcher));

    Ok(HttpState {
        home: Arc::new(home),
        listings: Arc::new(ListingService::new(listings)),
        chrome: Arc::new(ChromeService::new(&settings.site)),
        sessions: SessionResolver::new(session_provider),
    })
}

async fn serve_until_shutdown(
    listener: tokio::net::TcpListener,
    router: axum::Router,
    grace: Duration,
) -> Result<(), AppError> {
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .into_future(),
    );

    tokio::select! {
        joined = &mut server => return server_outcome(joined),
        () = shutdown_signal() => {}
    }

    info!(
        target = "rentapp::serve",
        grace_secs = grace.as_secs(),
        "shutdown requested; draining connections"
    );
    let _ = stop_tx.send(());

    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => server_outcome(joined),
        Err(_) => {
            warn!(
                target = "rentapp::serve",
                "graceful shutdown timed out; aborting open connections"
            );
            server.abort();
            Ok(())
        }
    }
}

fn server_outcome(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(AppError::from(InfraError::from(err))),
        Err(err) => Err(AppError::unexpected(format!("server task failed: {err}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
