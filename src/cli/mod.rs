//! CLI module for Skriv.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{format_duration, Output};

use clap::{Parser, Subcommand};

/// Skriv - Batch Audio Transcription
///
/// A CLI driver that feeds audio files through an external speech-to-text
/// engine and writes plain-text transcripts, skipping files that already
/// have one. The name "Skriv" comes from the Norwegian/Scandinavian word
/// for "write."
#[derive(Parser, Debug)]
#[command(name = "skriv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe every remaining audio file across the configured source folders
    Batch {
        /// Engine model size override (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Transcribe a single audio file, bypassing discovery and skip bookkeeping
    Single {
        /// Path to the audio file
        file: String,

        /// Engine model size override (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,
}
