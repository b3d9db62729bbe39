use clap::{Parser, Subcommand};

use crate::cli::bundle::BundleArg;
use crate::cli::download::DownloadArg;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "bundler",
    version = env!("CARGO_PKG_VERSION"),
    about,
    long_about = None,
    propagate_version = true
)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(
        alias = "b",
        name = "bundle",
        about = "Bundle every file of a content list into a ZIP archive"
    )]
    Bundle(BundleArg),
    #[command(alias = "dl", name = "download", about = "Download a single storage file to disk")]
    Download(DownloadArg),
}
