//! Argument parsing and command execution.

use std::sync::Arc;

use anyhow::anyhow;
use clap::{Parser, ValueEnum};
use driftnet_dispatch::Dispatcher;
use driftnet_fetch::{Fetcher, HttpFetcher};
use driftnet_search_core::{SearchOptions, SortOrder, validate_query};
use driftnet_sources::builtin_registry;
use driftnet_telemetry::{LoggingConfig, init_logging};

use crate::output;

/// Search torrent indexers from the command line.
#[derive(Parser)]
#[command(name = "driftnet", version, about)]
pub(crate) struct Cli {
    /// Search query.
    pub(crate) query: String,

    /// Source to query; repeatable. Defaults to every registered source.
    #[arg(short, long = "source", value_name = "ID")]
    pub(crate) sources: Vec<String>,

    /// Maximum results per source.
    #[arg(long)]
    pub(crate) limit: Option<u32>,

    /// Result offset for pagination.
    #[arg(long)]
    pub(crate) offset: Option<u32>,

    /// Sort key, in the source's own vocabulary.
    #[arg(long)]
    pub(crate) sort: Option<String>,

    /// Sort direction.
    #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
    pub(crate) order: OrderArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Table)]
    pub(crate) format: FormatArg,

    /// Dispatch on the caller's task instead of the background worker.
    #[arg(long)]
    pub(crate) in_process: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "DRIFTNET_LOG", default_value = "warn")]
    pub(crate) log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => Self::Asc,
            OrderArg::Desc => Self::Desc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum FormatArg {
    Table,
    Json,
}

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

pub(crate) async fn run(cli: Cli) -> CliResult<()> {
    init_logging(&LoggingConfig {
        level: &cli.log_level,
        ..LoggingConfig::default()
    })
    .map_err(CliError::failure)?;

    validate_query(&cli.query).map_err(|err| CliError::validation(err.to_string()))?;

    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new().map_err(CliError::failure)?);
    let dispatcher = if cli.in_process {
        Dispatcher::in_process(builtin_registry(&fetcher))
    } else {
        Dispatcher::new(|| builtin_registry(&fetcher))
    };

    let sources: Vec<String> = if cli.sources.is_empty() {
        dispatcher
            .source_ids()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    } else {
        for source in &cli.sources {
            if !dispatcher.source_ids().contains(&source.as_str()) {
                return Err(CliError::validation(format!(
                    "unknown source {source:?}; known sources: {}",
                    dispatcher.source_ids().join(", ")
                )));
            }
        }
        cli.sources.clone()
    };

    let options = SearchOptions {
        limit: cli.limit,
        offset: cli.offset,
        sort: cli.sort.clone(),
        order: cli.order.into(),
        ..SearchOptions::default()
    };

    let ids: Vec<&str> = sources.iter().map(String::as_str).collect();
    tracing::debug!(query = %cli.query, sources = ?ids, "dispatching searches");
    let outcomes = dispatcher.search_many(&ids, &cli.query, &options).await;
    dispatcher.shutdown();

    match cli.format {
        FormatArg::Json => output::render_json(&outcomes).map_err(CliError::failure)?,
        FormatArg::Table => output::render_table(&outcomes),
    }

    if outcomes.iter().all(|(_, outcome)| outcome.is_err()) {
        return Err(CliError::failure(anyhow!("every source failed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_sources_and_paging() {
        let cli = Cli::parse_from([
            "driftnet", "ghost", "-s", "nyaasi", "-s", "seadex", "--limit", "10", "--offset", "20",
        ]);
        assert_eq!(cli.query, "ghost");
        assert_eq!(cli.sources, vec!["nyaasi", "seadex"]);
        assert_eq!(cli.limit, Some(10));
        assert_eq!(cli.offset, Some(20));
    }

    #[test]
    fn exit_codes_distinguish_validation_from_failure() {
        assert_eq!(CliError::validation("bad input").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("broken")).exit_code(), 3);
    }
}
