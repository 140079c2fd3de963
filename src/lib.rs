//! # Lyrics Cutup
//!
//! A cut-up phrase generator for Japanese lyrics.
//!
//! Lyrics Cutup tokenizes a directory of lyrics files into a SQLite phrase
//! bank, then recombines randomly sampled phrases into novel short phrases,
//! each tagged with the lyrics file it came from. Generation is exposed via
//! a CLI and a small JSON HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────┐
//! │ lyrics/*.txt│──▶│  Tokenizer    │──▶│  SQLite   │
//! │   (scan)    │   │ phrase units │   │ phrases  │
//! └─────────────┘   └──────────────┘   └────┬─────┘
//!                                           │
//!                       ┌───────────────────┤
//!                       ▼                   ▼
//!                  ┌──────────┐       ┌──────────┐
//!                  │   CLI    │       │   HTTP   │
//!                  │ (cutup)  │       │  (JSON)  │
//!                  └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cutup init                    # create database
//! cutup ingest                  # tokenize the lyrics directory
//! cutup generate --count 10     # print 10 cut-up phrases
//! cutup serve                   # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`scan`] | Lyrics directory scanner |
//! | [`tokenizer`] | Japanese phrase extraction |
//! | [`ingest`] | Full-rebuild ingestion pipeline |
//! | [`corpus`] | Read-only phrase bank access |
//! | [`generator`] | Stochastic cut-up generation |
//! | [`stats`] | Database overview |
//! | [`server`] | JSON HTTP server |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod config;
pub mod corpus;
pub mod db;
pub mod error;
pub mod generator;
pub mod ingest;
pub mod migrate;
pub mod models;
pub mod scan;
pub mod server;
pub mod stats;
pub mod tokenizer;
