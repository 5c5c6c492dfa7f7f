//! Spotify Web API integration
//!
//! Track search with the client-credentials flow.
//! API docs: https://developer.spotify.com/documentation/web-api

mod adapter;
mod auth;
mod client;
pub mod dto;

pub use client::SpotifyClient;
