use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bundler_archive::Bundle;
use bundler_contentlist::ContentItem;
use bundler_vidispine::{
    ChunkedReader, ConnectionConfig, HttpClient, Transport, buffered_copy, fetch_descriptor,
};
use clap::Args;
use tracing::info;

use crate::cli::connection::TransferArgs;

#[derive(Args, Clone, Debug)]
pub struct BundleArg {
    #[arg(long, env = "content_list", help = "Content list location (file:// or http(s)://)")]
    pub content_list: String,
    #[arg(
        long,
        env = "server_token",
        hide_env_values = true,
        help = "Token sent when fetching the content list"
    )]
    pub server_token: String,
    #[arg(long, env = "output_file", help = "ZIP file to write")]
    pub output_file: PathBuf,
    #[arg(long, env = "vidispine_url", help = "Vidispine base URL, e.g. http://vidispine:8080")]
    pub vidispine_url: String,
    #[arg(long, env = "vidispine_user", default_value = "")]
    pub vidispine_user: String,
    #[arg(long, env = "vidispine_password", default_value = "", hide_env_values = true)]
    pub vidispine_password: String,
    #[arg(
        long,
        env = "vidispine_token",
        hide_env_values = true,
        help = "Takes precedence over user and password"
    )]
    pub vidispine_token: Option<String>,
    #[command(flatten)]
    pub transfer: TransferArgs,
}

pub fn run(arg: BundleArg) -> Result<()> {
    let config = ConnectionConfig::from_url(&arg.vidispine_url)
        .with_context(|| format!("Could not parse Vidispine URL '{}'", arg.vidispine_url))?
        .basic_auth(arg.vidispine_user, arg.vidispine_password)
        .token(arg.vidispine_token);

    let policy = arg.transfer.retry_policy();
    let client = arg.transfer.client()?;

    let items = bundler_contentlist::load(&arg.content_list, &arg.server_token, &client, &policy)
        .with_context(|| format!("Could not load content list from {}", arg.content_list))?;

    let transport = Transport::new(Arc::new(config), &client).with_policy(policy);
    let path = write_bundle(&transport, &items, &arg.output_file, arg.transfer.block_size)?;

    info!("Output file completed at {}", path.display());
    Ok(())
}

/// Stream every item into a new archive at `output`.
///
/// The first failure aborts the run and the partial archive is deleted.
pub fn write_bundle<C: HttpClient>(
    transport: &Transport<C>,
    items: &[ContentItem],
    output: &std::path::Path,
    block_size: usize,
) -> Result<PathBuf> {
    let mut bundle = Bundle::create(output)
        .with_context(|| format!("Could not initialise output writer {}", output.display()))?;

    for item in items {
        let file = fetch_descriptor(transport, &item.storage_id, &item.file_id)
            .and_then(|document| document.into_sized())
            .with_context(|| format!("Could not look up {} on {}", item.file_id, item.storage_id))?;

        let mut reader = ChunkedReader::new(transport, &file, block_size)
            .with_context(|| {
                format!("Could not read from {} on {}", item.file_id, item.storage_id)
            })?;

        let name = bundle
            .add_entry(file.basename(), file.size(), |w| {
                buffered_copy(w, &mut reader, block_size)
            })
            .with_context(|| {
                format!("Could not add {} to {}", file.path(), bundle.path().display())
            })?;

        info!(entry = %name, size = file.size(), "added file");
    }

    bundle.finish().context("Could not close zip writer")
}
