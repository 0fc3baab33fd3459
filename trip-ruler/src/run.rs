//! Top-level run: load inputs, resolve the log, write outputs.
//!
//! Nothing is written unless the whole log resolves. A failed run leaves the
//! previous report and distance cache untouched. The cache is saved before
//! the report, so fetched distances survive a failed report write.

use tracing::info;

use crate::cache::{CachedRouter, DistanceCacheFile};
use crate::config::{RunConfig, read_api_key};
use crate::directory::AddressDirectory;
use crate::error::RulerError;
use crate::report::write_report_to_path;
use crate::routing::{DirectionsClient, RoutingConfig, RoutingError, RoutingService};
use crate::triplog::{TripLogError, resolve_log};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written to the report.
    pub trips: usize,
    /// Requests sent to the routing service.
    pub routing_calls: usize,
    /// Entries in the saved distance cache.
    pub cached_distances: usize,
}

/// Run against the production routing service.
pub async fn run(config: &RunConfig) -> Result<RunSummary, RulerError> {
    let api_key = read_api_key(&config.key_file)?;

    let mut routing = RoutingConfig::new(api_key).with_timeout(config.timeout_secs);
    if let Some(base_url) = &config.base_url {
        routing = routing.with_base_url(base_url.clone());
    }

    info!("Initialising routing client");
    let client = DirectionsClient::new(routing).map_err(client_setup_error)?;

    run_with(config, client).await
}

/// Run with any routing service.
pub async fn run_with<R: RoutingService>(
    config: &RunConfig,
    router: R,
) -> Result<RunSummary, RulerError> {
    let directory = AddressDirectory::load(&config.addresses)?;

    let cache_file = DistanceCacheFile::new(&config.distances);
    let cache = cache_file.load()?;

    info!(path = %config.log.display(), "Processing the data file");
    let log = std::fs::read_to_string(&config.log)
        .map_err(|e| RulerError::from_read(&config.log, e))?;

    let mut router = CachedRouter::new(router, cache, config.units);
    let rows = resolve_log(&log, &directory, &mut router)
        .await
        .map_err(|e| log_error(config, e))?;

    let routing_calls = router.routing_calls();
    let cache = router.into_cache();
    cache_file.save(&cache)?;

    write_report_to_path(&rows, &config.report)?;

    Ok(RunSummary {
        trips: rows.len(),
        routing_calls,
        cached_distances: cache.len(),
    })
}

/// The key is known to be present here, so only the client itself can fail.
fn client_setup_error(err: RoutingError) -> RulerError {
    RulerError::Configuration {
        message: format!("could not set up the routing client: {err}"),
    }
}

/// A rejected key is a configuration problem, not a log problem.
fn log_error(config: &RunConfig, err: TripLogError) -> RulerError {
    match err {
        TripLogError::Routing {
            source: RoutingError::Unauthorized,
            ..
        } => RulerError::Configuration {
            message: format!(
                "the routing API key in {} was rejected by the routing service",
                config.key_file.display()
            ),
        },
        source => RulerError::Log {
            path: config.log.clone(),
            source,
        },
    }
}
