use std::process;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt::{writer::BoxMakeWriter, Layer}, layer::SubscriberExt, EnvFilter, Registry};

use config::{LogSettings, Settings};
use controller::CycleController;
use db::TransactionRepository;
use errors::AppError;

mod batch;
mod config;
mod controller;
mod db;
mod errors;
mod generator;
mod models;
mod rules;
mod shutdown;

#[tokio::main]
async fn main() {
    let log_settings = LogSettings::from_env();

    // add tracing layer
    let file_appender = tracing_appender::rolling::never(".", &log_settings.file);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());

    // json into the log file, plain text on stdout
    let file_layer = Layer::new().json().with_writer(BoxMakeWriter::new(move || file_writer.clone()));
    let stdout_layer = Layer::new().with_writer(BoxMakeWriter::new(move || stdout_writer.clone()));

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log_settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = Registry::default()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer);

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to set global subscriber: {err}");
        process::exit(1);
    }

    let settings = match Settings::from_env() {
        Ok(settings) => {
            tracing::info!("Loaded settings: {settings:?}");
            settings
        }
        Err(err) => {
            tracing::error!("{}", AppError::from(err));
            drop(file_guard);
            drop(stdout_guard);
            process::exit(1);
        }
    };

    let shutdown = CancellationToken::new();
    let listener = shutdown::listen_for_shutdown(shutdown.clone());

    let mut controller = CycleController::new(&settings, shutdown.clone());
    let result = controller
        .run(|| async {
            TransactionRepository::connect(&settings)
                .await
                .map_err(|source| AppError::Connection {
                    host: settings.db_host.clone(),
                    port: settings.db_port,
                    database: settings.db_name.clone(),
                    source,
                })
        })
        .await;

    // stops the signal listener if the run ended on its own
    shutdown.cancel();
    if let Err(err) = listener.await {
        tracing::warn!("Signal listener ended abnormally: {err}");
    }

    match result {
        Ok(report) => {
            tracing::info!(
                cycles = report.cycles,
                batches = report.batches_committed,
                rows = report.rows_inserted,
                empty_cycles = report.empty_cycles,
                "Generator stopped"
            );
        }
        Err(err) => {
            tracing::error!("Generator terminated: {err}");
            drop(file_guard);
            drop(stdout_guard);
            process::exit(1);
        }
    }
}
