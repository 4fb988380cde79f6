//! Command-line interface for Colmena.
//!
//! Admin commands talk to the same services as the HTTP API, so the slug,
//! validation and renewal rules are identical in both.

mod commands;

use clap::{Parser, Subcommand};

/// Colmena - advisor landing pages and referral tracking
#[derive(Parser)]
#[command(name = "colmena")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "-d", alias = "daemon")]
    Serve,

    /// Write a default config.toml if none exists
    Init,

    /// List all advisors
    #[command(alias = "ls", alias = "l")]
    List,

    /// Show one advisor with its recent activity
    #[command(alias = "i", alias = "info")]
    Show {
        /// Advisor slug
        slug: String,
    },

    /// Create an advisor
    #[command(alias = "a", alias = "add")]
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        company: String,

        /// Paid days of access
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// Extend an advisor's access
    Renew {
        slug: String,

        /// Days to add on top of the current expiration
        days: u32,
    },

    /// Revoke an advisor's access
    Revoke {
        slug: String,

        /// Reason stored with the cancellation
        #[arg(long)]
        reason: Option<String>,
    },

    /// Suspend an advisor
    Suspend { slug: String },

    /// Re-activate a suspended advisor
    Activate { slug: String },
}

pub use commands::*;
