use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_channel::{Receiver, Sender};
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

use crate::Config;
use crate::deployer::worker::DeployWorker;
use crate::storage::StorageFactory;
use crate::storage::local::prepare_source_artifact;
use crate::storage::region::RegionResolver;
use crate::storage::s3::S3StorageFactory;
use crate::types::error::S3deployError;
use crate::types::{DeployStatistics, DeploymentReport, Destination, UploadOutcome};

mod worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployerState {
    Idle,
    Dispatching,
    Awaiting,
    Reported,
}

/// Uploads one source artifact to every configured destination concurrently.
///
/// Each destination is isolated: a failure is recorded in its outcome and never
/// stops the others. The report is derived from the outcomes only after every
/// destination has finished.
pub struct Deployer {
    config: Config,
    storage_factory: Arc<dyn StorageFactory>,
    stats_sender: Sender<DeployStatistics>,
    stats_receiver: Receiver<DeployStatistics>,
    state: DeployerState,
    outcomes: Vec<UploadOutcome>,
    has_error: Arc<AtomicBool>,
}

impl Deployer {
    pub async fn new(config: Config) -> Self {
        let storage_factory = S3StorageFactory::new(config.client_config.clone()).await;
        Self::with_storage_factory(config, Arc::new(storage_factory))
    }

    pub fn with_storage_factory(config: Config, storage_factory: Arc<dyn StorageFactory>) -> Self {
        let (stats_sender, stats_receiver) = async_channel::unbounded();

        Self {
            config,
            storage_factory,
            stats_sender,
            stats_receiver,
            state: DeployerState::Idle,
            outcomes: Vec::new(),
            has_error: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns `Err` only when the source artifact cannot be read, before any destination is attempted.
    pub async fn run(&mut self) -> Result<DeploymentReport, S3deployError> {
        if self.state != DeployerState::Idle {
            panic!("it can be executed only once.")
        }
        self.state = DeployerState::Dispatching;

        let artifact = match prepare_source_artifact(
            &self.config.source,
            self.config.transfer_config.integrity_block_size,
            self.config.transfer_config.guess_mime_type,
        )
        .await
        {
            Ok(artifact) => Arc::new(artifact),
            Err(e) => {
                error!(error = e.to_string(), "source artifact preparation failed.");
                self.has_error.store(true, Ordering::SeqCst);
                self.state = DeployerState::Reported;
                self.close_stats_sender();
                return Err(e);
            }
        };

        let resolver = Arc::new(RegionResolver::new(
            self.storage_factory.create_default(),
            self.config.client_config.provider_default_region(),
        ));
        let upload_config = Arc::new(self.config.upload_config.clone());

        let handles: Vec<(Destination, JoinHandle<UploadOutcome>)> =
            unique_destinations(&self.config.destinations)
                .into_iter()
                .map(|destination| {
                    let worker = DeployWorker {
                        destination: destination.clone(),
                        artifact: artifact.clone(),
                        resolver: resolver.clone(),
                        storage_factory: self.storage_factory.clone(),
                        upload_config: upload_config.clone(),
                        dry_run: self.config.dry_run,
                        stats_sender: self.stats_sender.clone(),
                    };
                    (destination.clone(), tokio::spawn(worker.deploy()))
                })
                .collect();
        debug!(destinations = handles.len(), "all destinations dispatched.");

        self.state = DeployerState::Awaiting;

        let (destinations, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let join_results = join_all(handles).await;

        let mut outcomes = Vec::with_capacity(join_results.len());
        for (destination, join_result) in destinations.into_iter().zip(join_results) {
            let outcome = match join_result {
                Ok(outcome) => outcome,
                Err(e) => self.panicked_outcome(destination, e.to_string()).await,
            };
            outcomes.push(outcome);
        }

        let report = DeploymentReport::from_outcomes(&outcomes);
        if report.has_failure() {
            self.has_error.store(true, Ordering::SeqCst);
        }
        self.outcomes = outcomes;
        self.state = DeployerState::Reported;
        self.close_stats_sender();

        trace!(report = report.to_string(), "deploy has been completed.");

        Ok(report)
    }

    async fn panicked_outcome(&self, destination: Destination, cause: String) -> UploadOutcome {
        error!(
            bucket = destination.bucket,
            key = destination.key,
            cause = cause,
            "deploy worker terminated abnormally."
        );

        let _ = self
            .stats_sender
            .send(DeployStatistics::UploadError {
                bucket: destination.bucket.clone(),
                key: destination.key.clone(),
                cause: cause.clone(),
            })
            .await;

        UploadOutcome {
            result: Err(S3deployError::Upload {
                bucket: destination.bucket.clone(),
                key: destination.key.clone(),
                cause,
            }),
            destination,
        }
    }

    pub fn get_stats_receiver(&self) -> Receiver<DeployStatistics> {
        self.stats_receiver.clone()
    }

    pub fn state(&self) -> DeployerState {
        self.state
    }

    pub fn outcomes(&self) -> &[UploadOutcome] {
        &self.outcomes
    }

    pub fn has_error(&self) -> bool {
        self.has_error.load(Ordering::SeqCst)
    }

    pub fn close_stats_sender(&self) {
        self.stats_sender.close();
    }
}

/// Keeps the first occurrence of each destination. `Config` may be built by hand,
/// so duplicates are merged here as well as by the parser.
fn unique_destinations(destinations: &[Destination]) -> Vec<&Destination> {
    let mut seen = HashSet::new();
    destinations
        .iter()
        .filter(|destination| seen.insert(*destination))
        .collect()
}
