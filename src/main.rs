//! diskutil - CLI entry point.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use diskutil::{
    cli::{Args, Command},
    config::{validate_config, Config, ErrorPolicy},
    digest::{disk_key, KeyDigest},
    error::{exit_codes, Error},
    fs::{build_valid_filename, directory_size, external_storages, MountTable},
    output::{
        create_spinner, hidden_spinner, print_error, print_info, print_reports, print_warning,
        HashReport, OutputFormat, SanitizeReport, SizeReport, SniffReport, StorageReport,
    },
    sniff::detect,
};

fn main() -> ExitCode {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_)) => {
            exit_codes::CONFIG_ERROR
        }
        Some(Error::Walk { .. } | Error::StorageState { .. } | Error::Io(_)) => {
            exit_codes::IO_ERROR
        }
        _ => exit_codes::UNEXPECTED_ERROR,
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Load configuration
    let config_path = args.config_path();
    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let format = args.output_format();
    let quiet = args.quiet;

    match args.command {
        Command::Sniff { files } => sniff(&files, format),
        Command::Hash { keys, digest } => hash(&keys, &digest, format),
        Command::Size { paths } => size(&paths, config.sizing.error_policy, quiet, format),
        Command::Storages { .. } => storages(&config, &config_path, format),
        Command::Sanitize { names } => sanitize(&names, format),
    }
}

fn sniff(files: &[PathBuf], format: OutputFormat) -> anyhow::Result<()> {
    let reports: Vec<SniffReport> = files
        .iter()
        .map(|path| {
            let detection = detect(&path.to_string_lossy(), Some(|| File::open(path)));
            SniffReport {
                path: path.clone(),
                image: detection.is_image(),
                detection,
            }
        })
        .collect();

    print_reports(&reports, format)?;
    Ok(())
}

fn hash(keys: &[String], digest: &str, format: OutputFormat) -> anyhow::Result<()> {
    let algorithm = KeyDigest::resolve(digest);
    if algorithm.is_none() {
        print_warning(&format!(
            "Digest '{}' unavailable, falling back to string hash",
            digest
        ));
    }

    let reports: Vec<HashReport> = keys
        .iter()
        .map(|key| {
            let derived = disk_key(key, algorithm);
            HashReport {
                key: key.clone(),
                digest: derived.is_digest(),
                hash: derived.into_string(),
            }
        })
        .collect();

    print_reports(&reports, format)?;
    Ok(())
}

fn size(
    paths: &[PathBuf],
    policy: ErrorPolicy,
    quiet: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut reports = Vec::with_capacity(paths.len());

    for path in paths {
        let spinner = if quiet {
            hidden_spinner()
        } else {
            create_spinner(&format!("Measuring {}", path.display()))
        };
        let result = directory_size(path, policy);
        spinner.finish_and_clear();

        let bytes = result.with_context(|| format!("Failed to measure {}", path.display()))?;
        reports.push(SizeReport {
            path: path.clone(),
            bytes,
        });
    }

    print_reports(&reports, format)?;
    Ok(())
}

fn storages(
    config: &Config,
    config_path: &Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if config.storage.candidates.is_empty() {
        print_info(&format!(
            "No storage candidates configured; pass --candidate or set [storage] candidates in {}",
            config_path.display()
        ));
    }

    let host = MountTable::from_config(&config.storage);
    let roots = external_storages(&host, config.storage.error_policy)?;

    if roots.is_empty() && format == OutputFormat::Text {
        print_warning("No readable external storage found");
    }

    let reports: Vec<StorageReport> = roots
        .into_iter()
        .map(|root| StorageReport { root })
        .collect();
    print_reports(&reports, format)?;
    Ok(())
}

fn sanitize(names: &[String], format: OutputFormat) -> anyhow::Result<()> {
    let reports: Vec<SanitizeReport> = names
        .iter()
        .map(|name| SanitizeReport {
            input: name.clone(),
            filename: build_valid_filename(name),
        })
        .collect();

    print_reports(&reports, format)?;
    Ok(())
}
