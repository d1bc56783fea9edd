use std::{io, sync::OnceLock};

use application::{Args, Config, Report, Service};
use booking::{command::SubmitBooking, infra::Fixture, Flow};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args {
        config,
        dry_run,
        selection,
    } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let config = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(config.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let service_config = config.service().map_err(|e| {
        log::error!("invalid `Config`: {e}");
    })?;
    let service = Service::new(service_config, Fixture::from(config.backend));

    let mut flow = Flow::new(service.config());
    flow.load(&service, selection.service).await;
    selection.apply(&mut flow);

    print!("{}", Report(&flow));

    let cmd = SubmitBooking::new(flow.draft()).map_err(|e| {
        log::error!("cannot book yet: {e}");
    })?;
    let payload = serde_json::to_string_pretty(cmd.requests()).map_err(|e| {
        log::error!("failed to serialize booking requests: {e}");
    })?;
    println!("{payload}");

    if dry_run {
        return Ok(());
    }

    let receipts = flow.confirm(&service).await.map_err(|e| {
        log::error!("failed to book: {e}");
    })?;
    for receipt in receipts {
        println!(
            "Booked #{} for {}",
            receipt.id,
            receipt.request.scheduled_date.to_rfc3339(),
        );
    }
    Ok(())
}
