use std::time::Duration;

use anyhow::{Context, Result};
use bundler_vidispine::{Backoff, ReqwestClient, RetryPolicy};
use clap::Args;

const DEFAULT_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Transfer tuning shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct TransferArgs {
    #[arg(
        long,
        default_value_t = DEFAULT_BLOCK_SIZE,
        value_parser = parse_block_size,
        help = "Bytes requested per ranged read"
    )]
    pub block_size: usize,
    #[arg(long, help = "Give up after this many retries of a 502/503 response [default: never]")]
    pub max_retries: Option<u32>,
    #[arg(long, default_value_t = 3, help = "Seconds to wait before retrying a 502/503 response")]
    pub retry_delay: u64,
    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout: Option<u64>,
}

impl TransferArgs {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .max_attempts(self.max_retries.map(|retries| retries.saturating_add(1)))
            .backoff(Backoff::Fixed(Duration::from_secs(self.retry_delay)))
    }

    pub fn client(&self) -> Result<ReqwestClient> {
        ReqwestClient::with_timeout(self.timeout.map(Duration::from_secs))
            .context("Failed to build HTTP client")
    }
}

fn parse_block_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("block size must be greater than 0".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}
