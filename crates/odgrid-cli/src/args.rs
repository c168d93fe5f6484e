use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "odgrid")]
#[command(about = "Browse, edit and export OData collections as a data grid", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to the config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Service base URL (overrides config)")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Dataset to operate on")]
    pub dataset: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true, help = "Use the built-in sample data, no network")]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the configured datasets
    Datasets,

    /// Fetch and print the dataset's rows
    List {
        #[arg(
            long,
            help = "Sort criterion as 'Field' or 'Field:desc' (repeatable)"
        )]
        sort: Vec<String>,

        #[arg(long, help = "Filter as 'Field=Value' (repeatable)")]
        filter: Vec<String>,
    },

    /// Patch fields of one row
    Update {
        id: String,

        #[arg(long, help = "Field assignment as 'Field=Value' (repeatable)")]
        set: Vec<String>,
    },

    /// Create a new row
    Create {
        #[arg(long, help = "Field assignment as 'Field=Value' (repeatable)")]
        set: Vec<String>,
    },

    /// Delete one row
    Delete { id: String },

    /// Write the dataset's rows to a spreadsheet file
    Export {
        #[arg(long, help = "Output path (default: <dataset>.csv)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Sort criterion as 'Field' or 'Field:desc' (repeatable)")]
        sort: Vec<String>,

        #[arg(long, help = "Filter as 'Field=Value' (repeatable)")]
        filter: Vec<String>,
    },

    /// Open the interactive grid
    Browse,
}
