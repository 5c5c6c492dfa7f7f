//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use std::collections::HashSet;

use super::dto;
use crate::catalog::domain::CatalogTrack;

/// Convert a search response to catalog candidates.
///
/// Keeps catalog order. Tracks without an artist are skipped, and a label
/// that was already produced by an earlier track is dropped so each label
/// maps to exactly one URL.
pub fn to_tracks(response: dto::SearchResponse) -> Vec<CatalogTrack> {
    let mut seen = HashSet::new();
    let mut tracks = Vec::with_capacity(response.tracks.items.len());

    for item in response.tracks.items {
        let Some(track) = to_track(item) else {
            continue;
        };
        if seen.insert(track.label()) {
            tracks.push(track);
        }
    }

    tracks
}

/// Convert a single track, using its first credited artist.
fn to_track(item: dto::Track) -> Option<CatalogTrack> {
    let Some(artist) = item.artists.into_iter().next() else {
        tracing::debug!(target: "catalog::spotify", track = %item.name, "Skipping track without artist");
        return None;
    };

    Some(CatalogTrack {
        artist: artist.name,
        title: item.name,
        url: item.external_urls.spotify.unwrap_or_default(),
    })
}
