//! Catalog lookup command.

use tokio::runtime::Runtime;
use tracing::debug;

use super::catalog_client;
use crate::catalog::CatalogTrack;
use crate::config::Config;

/// Search the catalog and print each candidate with its link
pub fn cmd_lookup(rt: &Runtime, config: &Config, query: &str) -> anyhow::Result<()> {
    let client = catalog_client(config)?;

    let tracks = rt.block_on(client.search(query))?;
    debug!(target: "cli", query, results = tracks.len(), "Catalog lookup finished");

    if tracks.is_empty() {
        println!("No results found in the catalog.");
    }
    for line in candidate_lines(&tracks) {
        println!("{}", line);
    }
    Ok(())
}

fn candidate_lines(tracks: &[CatalogTrack]) -> Vec<String> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| format!("{}. {}\n   {}", i + 1, track.label(), track.url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_lines() {
        let tracks = vec![
            CatalogTrack::new("Daft Punk", "One More Time", "https://open.spotify.com/track/1"),
            CatalogTrack::new("Daft Punk", "Aerodynamic", "https://open.spotify.com/track/2"),
        ];

        let lines = candidate_lines(&tracks);
        assert_eq!(lines[0], "1. Daft Punk - One More Time\n   https://open.spotify.com/track/1");
        assert!(lines[1].starts_with("2. Daft Punk - Aerodynamic"));
    }
}
