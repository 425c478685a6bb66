//! Result rendering for the terminal.

use anyhow::Result;
use driftnet_search_core::{SearchResult, TorrentRelease};
use serde::Serialize;

type SourceOutcome = (String, SearchResult<Vec<TorrentRelease>>);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceReport<'a> {
    source_id: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a [TorrentRelease]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Print one JSON document covering every source's outcome.
pub(crate) fn render_json(outcomes: &[SourceOutcome]) -> Result<()> {
    let reports: Vec<SourceReport<'_>> = outcomes
        .iter()
        .map(|(source_id, outcome)| match outcome {
            Ok(releases) => SourceReport {
                source_id,
                ok: true,
                results: Some(releases),
                error: None,
            },
            Err(err) => SourceReport {
                source_id,
                ok: false,
                results: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

/// Print a per-source table of results.
pub(crate) fn render_table(outcomes: &[SourceOutcome]) {
    for (source_id, outcome) in outcomes {
        match outcome {
            Ok(releases) => {
                println!("{source_id}: {} result(s)", releases.len());
                for release in releases {
                    println!(
                        "  {:>5}\u{2191} {:>5}\u{2193} {:>10}  {}",
                        release.seeders,
                        release.leechers,
                        human_size(release.size_bytes),
                        release.title
                    );
                }
            }
            Err(err) => println!("{source_id}: failed ({err})"),
        }
        println!();
    }
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_size_picks_sensible_units() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.00 KiB");
        assert_eq!(human_size(1_500_000_000), "1.40 GiB");
    }
}
