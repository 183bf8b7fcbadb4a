use std::{process, sync::Arc};

use folio::{
    application::{
        blog::{BlogService, DateStyle},
        chrome::ChromeService,
        error::AppError,
        source::BlogSource,
    },
    config,
    infra::{
        contact::{ContactRelay, FormRelay},
        error::InfraError,
        http::{self, HttpState},
        telemetry,
        upstream::BlogApi,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

const SOURCE: &str = "folio::main";

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
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Health(_) => run_health(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let api = BlogApi::new(&settings.api).map_err(AppError::from)?;
    let source: Arc<dyn BlogSource> = Arc::new(api);
    let blog = BlogService::new(source, DateStyle::from(&settings.site));
    let chrome = ChromeService::new(&settings.site);
    let relay = FormRelay::new(&settings.contact).map_err(AppError::from)?;
    let contact: Arc<dyn ContactRelay> = Arc::new(relay);

    let state = HttpState {
        blog: Arc::new(blog),
        chrome: Arc::new(chrome),
        contact,
        contact_enabled: settings.contact.access_key.is_some(),
    };

    serve_http(&settings, state).await
}

async fn run_health(settings: config::Settings) -> Result<(), AppError> {
    let api = BlogApi::new(&settings.api).map_err(AppError::from)?;
    let status = api.health().await?;
    let rendered = serde_json::to_string_pretty(&status)
        .map_err(|err| AppError::unexpected(format!("failed to encode health status: {err}")))?;
    println!("{rendered}");
    Ok(())
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = SOURCE,
        addr = %settings.server.addr,
        upstream = %settings.api.base_url,
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
