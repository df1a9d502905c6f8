//! Tracing setup for the command line app

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const APP_TARGET: &str = "catalog_report";

/// Level for this crate's own events; failures always surface.
fn app_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Picks the active filter: an explicit `RUST_LOG` replaces the built-in one
/// entirely, otherwise only this crate is heard from.
fn select_filters(
    env_filter: Option<EnvFilter>,
    verbose: bool,
) -> (Option<EnvFilter>, Option<Targets>) {
    match env_filter {
        Some(env_filter) => (Some(env_filter), None),
        None => (
            None,
            Some(Targets::new().with_target(APP_TARGET, app_level(verbose))),
        ),
    }
}

/// Installs the global subscriber.
///
/// Events are written to stderr so report output on stdout stays parseable.
pub fn init_logging(verbose: bool) {
    let (env_filter, app_filter) =
        select_filters(EnvFilter::try_from_default_env().ok(), verbose);

    let layer = fmt::layer()
        .without_time()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    if verbose {
        tracing_subscriber::registry()
            .with(layer.pretty())
            .with(app_filter)
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(layer.compact())
            .with(app_filter)
            .with(env_filter)
            .init();
    }
}
