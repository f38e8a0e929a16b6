use std::io::Write;

use async_channel::Receiver;
use s3deploy::types::{DeployStatistics, S3_SCHEME};
use tokio::task::JoinHandle;
use tracing::debug;

/// Prints one line per finished destination to stdout until the deployer closes the channel.
pub fn show_result(stats_receiver: Receiver<DeployStatistics>, source: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut total_upload_bytes: u64 = 0;

        while let Ok(deploy_stats) = stats_receiver.recv().await {
            if let DeployStatistics::UploadBytes(size) = deploy_stats {
                total_upload_bytes += size;
                continue;
            }

            if let Some(line) = format_result_line(&source, &deploy_stats) {
                let _ = writeln!(std::io::stdout().lock(), "{line}");
            }
        }

        debug!(total_upload_bytes = total_upload_bytes, "result reporter has been completed.");
    })
}

pub fn format_result_line(source: &str, deploy_stats: &DeployStatistics) -> Option<String> {
    match deploy_stats {
        DeployStatistics::UploadComplete {
            bucket,
            key,
            dry_run,
        } => {
            let dry_run_prefix = if *dry_run { "(dryrun) " } else { "" };
            Some(format!(
                "{dry_run_prefix}upload: {source} to {S3_SCHEME}{bucket}/{key}"
            ))
        }
        DeployStatistics::UploadError { bucket, key, cause } => Some(format!(
            "upload failed: {source} to {S3_SCHEME}{bucket}/{key}: {cause}"
        )),
        DeployStatistics::UploadBytes(_) => None,
    }
}
