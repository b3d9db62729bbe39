use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use bundler_vidispine::{
    ChunkedReader, ConnectionConfig, Transport, buffered_copy, fetch_descriptor,
};
use clap::Args;
use tracing::info;

use crate::cli::connection::TransferArgs;

#[derive(Args, Clone, Debug)]
pub struct DownloadArg {
    #[arg(long, help = "Vidispine storage ID to read from")]
    pub storage_id: String,
    #[arg(long, help = "Vidispine file ID to read")]
    pub file_id: String,
    #[arg(long, default_value = "test.dat", help = "Filename to write data to")]
    pub output: PathBuf,
    #[arg(long, default_value = "http", value_parser = ["http", "https"])]
    pub proto: String,
    #[arg(long, default_value = "localhost")]
    pub server: String,
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "admin")]
    pub user: String,
    #[arg(long, default_value = ".vspass", help = "File containing the password")]
    pub passfile: PathBuf,
    #[command(flatten)]
    pub transfer: TransferArgs,
}

pub fn run(arg: DownloadArg) -> Result<()> {
    let password = read_password(&arg.passfile)?;
    let config =
        ConnectionConfig::new(arg.proto, arg.server, arg.port).basic_auth(arg.user, password);

    let client = arg.transfer.client()?;
    let transport =
        Transport::new(Arc::new(config), client).with_policy(arg.transfer.retry_policy());

    let file = fetch_descriptor(&transport, &arg.storage_id, &arg.file_id)
        .context("Could not look up file")?;
    info!(path = %file.path, size = file.size, hash = %file.hash, "found file");

    let file = file.into_sized().context("Could not set up file reader")?;
    let mut reader = ChunkedReader::new(&transport, &file, arg.transfer.block_size)
        .context("Could not set up file reader")?;

    let out = File::create(&arg.output)
        .with_context(|| format!("Could not open output file '{}'", arg.output.display()))?;
    let mut out = BufWriter::new(out);

    info!("Copying data into {}", arg.output.display());
    let copied = buffered_copy(&mut out, &mut reader, arg.transfer.block_size)
        .context("Could not copy data")?;
    out.flush().context("Could not copy data")?;

    ensure!(
        copied == file.size(),
        "Copied {copied} bytes but the file reports {}",
        file.size()
    );
    info!(bytes = copied, "All done");
    Ok(())
}

/// Read the password file with all whitespace removed.
fn read_password(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    Ok(content.chars().filter(|c| !c.is_whitespace()).collect())
}
