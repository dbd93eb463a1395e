use std::path::PathBuf;

use clap::{Parser, Subcommand};

use clauseguard_api::RiskStatus;

/// ClauseGuard — AI contract review from the terminal.
#[derive(Parser, Debug)]
#[command(name = "clauseguard", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a contract for analysis and follow it to completion.
    Analyze {
        /// Path to the contract document (pdf, docx, doc, txt, rtf, odt).
        file: Option<PathBuf>,

        /// Pasted contract text instead of a file; "-" reads stdin.
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
    },

    /// Chat with the assistant about an analyzed contract.
    Chat {
        /// Contract id from the analysis results.
        contract_id: u64,
    },

    /// Record a review decision for an identified risk.
    Risk {
        /// Risk id from the analysis results.
        risk_id: u64,

        /// Decision: pending, reviewed, accepted, or disputed.
        #[arg(long)]
        status: RiskStatus,

        /// Free-text review note.
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Delete a contract and its analysis.
    Delete {
        contract_id: u64,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
