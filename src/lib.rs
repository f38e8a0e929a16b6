/*!
# Overview
s3deploy uploads a single local file to many S3 locations at once.

Every destination is handled independently and concurrently. One unreachable or
misconfigured bucket never prevents the others from receiving the artifact, and
every destination's result is reported.

## Features
- Fan-out
  Any number of `s3://bucket[/key]` destinations in one invocation, across any mix of regions.
  A missing key, or a key ending in `/`, is completed with the source file name.
  Duplicate destinations are uploaded once.

- Region aware
  The region of each bucket is looked up with `GetBucketLocation` and the upload is sent
  to a client bound to that region. Lookups are cached per bucket.

- End-to-end integrity
  The MD5 and SHA-256 digests of the artifact are computed once.
  MD5 is sent as `Content-MD5`, so S3 rejects a corrupted body.
  SHA-256 is stored as the `x-amz-content-sha256` user-defined metadata.

- Clear outcome
  Each destination prints one result line, followed by a summary.
  The exit code is 0 only when every destination succeeded.

## As a library
s3deploy CLI is a very thin wrapper of the s3deploy library.

Example usage
=============

```Toml
[dependencies]
s3deploy = "0"
tokio = { version = "1", features = ["full"] }
```

```no_run
use s3deploy::config::Config;
use s3deploy::config::args::parse_from_args;
use s3deploy::deployer::Deployer;
use s3deploy::types::DeployStatistics;

#[tokio::main]
async fn main() {
    let args = vec![
        "program_name",
        "./dist/report.csv",
        "s3://bucket-a/reports/",
        "s3://bucket-b",
    ];

    let config = Config::try_from(parse_from_args(args).unwrap()).unwrap();

    let mut deployer = Deployer::new(config).await;
    let stats_receiver = deployer.get_stats_receiver();

    let report = deployer.run().await.unwrap();

    while let Ok(stats) = stats_receiver.try_recv() {
        if let DeployStatistics::UploadError { bucket, key, cause } = stats {
            println!("s3://{bucket}/{key}: {cause}");
        }
    }

    println!("{report}");
    if report.has_failure() {
        println!("Some destinations could not be deployed.");
    }
}
```

For more examples,
=============
see the s3deploy binary source code(`src/bin/s3deploy`) and the integration tests(`tests`).
*/

pub use config::Config;
pub use config::args::CLIArgs;

pub mod config;
pub mod deployer;
pub mod storage;
pub mod types;
