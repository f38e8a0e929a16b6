use anyhow::{Result, anyhow};
use tokio::time::Instant;
use tracing::{error, info, trace};

use s3deploy::Config;
use s3deploy::deployer::Deployer;
use s3deploy::types::{DEPLOY_REPORT_SUMMARY_NAME, DeploymentReport};

mod reporter;

pub async fn run(config: Config) -> Result<()> {
    let start_time = Instant::now();
    trace!("deploy start.");

    let mut deployer = Deployer::new(config.clone()).await;
    let reporter_join_handle = reporter::show_result(
        deployer.get_stats_receiver(),
        config.source.to_string_lossy().to_string(),
    );

    let result = deployer.run().await;
    reporter_join_handle.await?;

    let duration_sec = format!("{:.3}", start_time.elapsed().as_secs_f32());
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!(duration_sec = duration_sec, error = e.to_string(), "s3deploy failed.");

            return Err(anyhow!(e));
        }
    };

    show_deploy_summary(&report);

    if report.has_failure() {
        error!(duration_sec = duration_sec, "s3deploy failed.");

        return Err(anyhow!("s3deploy failed."));
    }

    trace!(duration_sec = duration_sec, "s3deploy has been completed.");

    Ok(())
}

fn show_deploy_summary(report: &DeploymentReport) {
    info!(
        name = DEPLOY_REPORT_SUMMARY_NAME,
        succeeded = report.successes,
        failed = report.failures,
    );

    println!("{}", format_summary(report));
}

fn format_summary(report: &DeploymentReport) -> String {
    if report.has_failure() {
        format!("Deploy failed: {report}")
    } else {
        format!("Deploy succeeded: {report}")
    }
}
