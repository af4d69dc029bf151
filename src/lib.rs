//! Skriv - Batch Audio Transcription
//!
//! A CLI driver that feeds a library of audio files through an external
//! speech-to-text engine and writes one plain-text transcript per input.
//!
//! The name "Skriv" comes from the Norwegian/Scandinavian word for "write."
//!
//! # Overview
//!
//! Skriv allows you to:
//! - Discover audio files across a root folder and a set of labeled subfolders
//! - Skip files whose transcript artifact already exists, so re-runs resume
//!   exactly where a previous run left off
//! - Invoke the engine strictly sequentially, one file at a time, with
//!   per-item progress and ETA reporting
//! - Get a structured run summary (discovered, skipped, succeeded, failed)
//!
//! The engine itself (acoustic modeling, decoding) is an external
//! collaborator; Skriv only drives it.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `discovery` - Source locations and audio file discovery
//! - `engine` - Transcription engine abstraction and the Whisper CLI backend
//! - `driver` - The sequential batch driver and run summary
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use skriv::config::Settings;
//! use skriv::discovery;
//! use skriv::driver;
//! use skriv::engine::WhisperCli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let locations = discovery::source_locations(&settings);
//!     let (items, _missing) = discovery::discover(&locations, &settings.discovery.extensions)?;
//!
//!     let engine = WhisperCli::from_settings(&settings.engine);
//!     let summary = driver::run_batch(&engine, items, &settings.output_dir(), |_| {}).await?;
//!     println!("{} succeeded, {} failed", summary.succeeded, summary.failed);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod driver;
pub mod engine;
pub mod error;

pub use error::{Result, SkrivError};
