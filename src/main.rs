use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use photo_sheet::config::merged::MergedConfig;
use photo_sheet::config::preferences::{Language, PreferenceStore};
use photo_sheet::config::{self};
use photo_sheet::pipeline::job_runner::{JobConfig, ResolvedInput};
use photo_sheet::pipeline::orchestrator::run_all_jobs;

const PREFERENCES_FILE: &str = "preferences.yaml";

fn print_usage() {
    eprintln!("Usage: photo_sheet [--language <en|hi>] <jobs.yaml>...");
    eprintln!("  Build print-ready photo sheets according to job specifications.");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("photo_sheet {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    // Pull out --language before treating the rest as job files.
    let mut language: Option<Language> = None;
    if let Some(pos) = args.iter().position(|a| a == "--language") {
        let Some(code) = args.get(pos + 1).cloned() else {
            eprintln!("ERROR: --language requires a value");
            return ExitCode::FAILURE;
        };
        match code.parse::<Language>() {
            Ok(l) => language = Some(l),
            Err(e) => {
                eprintln!("ERROR: {e}");
                return ExitCode::FAILURE;
            }
        }
        args.remove(pos + 1);
        args.remove(pos);
    }

    let preferences = match PreferenceStore::open(PREFERENCES_FILE) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("ERROR: Failed to load {PREFERENCES_FILE}: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(l) = language
        && let Err(e) = preferences.set_language(l)
    {
        eprintln!("ERROR: Failed to save language preference: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!(language = preferences.language().code(), "preferences loaded");

    if args.is_empty() {
        // Only a preference change was requested.
        return ExitCode::SUCCESS;
    }

    let mut job_configs: Vec<JobConfig> = Vec::new();
    let mut workers = 0;

    for job_file_arg in &args {
        let job_file_path = Path::new(job_file_arg);

        // Load settings from the same directory as the job file.
        let settings = match config::load_settings_for_job(job_file_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("ERROR: Failed to load settings for {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };
        workers = workers.max(settings.parallel_workers);

        let job_file = match config::load_job_file(job_file_path) {
            Ok(jf) => jf,
            Err(e) => {
                eprintln!("ERROR: Failed to read job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        // Resolve job file directory for relative paths.
        let job_dir = job_file_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        for sheet in &job_file.sheets {
            let scales = match sheet.resolve_scales() {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("ERROR: {}: {e}", sheet.output);
                    return ExitCode::FAILURE;
                }
            };

            job_configs.push(JobConfig {
                recipe: sheet.recipe,
                inputs: sheet
                    .inputs
                    .iter()
                    .map(|input| ResolvedInput {
                        path: resolve_path(&job_dir, &input.path),
                        mask: input.mask.as_deref().map(|m| resolve_path(&job_dir, m)),
                    })
                    .collect(),
                output_path: resolve_path(&job_dir, &sheet.output),
                scales,
                merged: MergedConfig::new(&settings, sheet),
            });
        }
    }

    let results = match run_all_jobs(&job_configs, workers) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut has_error = false;
    for (job, result) in job_configs.iter().zip(&results) {
        match result {
            Ok(r) => {
                eprintln!(
                    "OK: {} ({}x{}, sha256 {})",
                    r.output_path.display(),
                    r.width,
                    r.height,
                    r.digest
                );
            }
            Err(e) => {
                eprintln!("ERROR: {}: {e}", job.output_path.display());
                has_error = true;
            }
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Resolve a potentially relative path against a base directory.
/// If the path is already absolute, return it as-is.
fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
