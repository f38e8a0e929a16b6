use ::tracing::trace;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use rusty_fork::rusty_fork_test;

use s3deploy::CLIArgs;
use s3deploy::Config;

mod cli;
mod tracing;

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config_exit_if_err();

    if let Some(shell) = config.auto_complete_shell {
        generate(
            shell,
            &mut CLIArgs::command(),
            "s3deploy",
            &mut std::io::stdout(),
        );

        return Ok(());
    }

    start_tracing_if_necessary(&config);

    trace!("config = {:?}", config);

    cli::run(config).await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn load_config_exit_if_err() -> Config {
    build_config(CLIArgs::parse()).unwrap_or_else(|e| e.exit())
}

/// Cross-option validation failures are usage errors, like the ones clap reports itself.
fn build_config(cli_args: CLIArgs) -> Result<Config, clap::Error> {
    Config::try_from(cli_args)
        .map_err(|error_message| clap::Error::raw(ErrorKind::ValueValidation, error_message))
}

fn start_tracing_if_necessary(config: &Config) -> bool {
    let Some(tracing_config) = config.tracing_config.as_ref() else {
        return false;
    };

    tracing::init_tracing(tracing_config);
    true
}


rusty_fork_test! {
    #[test]
    fn with_tracing() {
        let args = vec![
            "unittest",
            "--profile",
            "deploy_profile",
            "report.csv",
            "s3://bucket-a",
        ];

        let config = s3deploy::Config::try_from(CLIArgs::try_parse_from(args).unwrap()).unwrap();
        assert!(start_tracing_if_necessary(&config));
    }

    #[test]
    fn without_tracing() {
        let args = vec![
            "unittest",
            "--profile",
            "deploy_profile",
            "-qq",
            "report.csv",
            "s3://bucket-a",
        ];

        let config = s3deploy::Config::try_from(CLIArgs::try_parse_from(args).unwrap()).unwrap();
        assert!(!start_tracing_if_necessary(&config));
    }
}
