//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use rayon::prelude::*;
use reweave_core::{Print, ResultExt, ReweaveError};
use reweave_format::{ConfigLoader, FormatterConfiguration, ReweaveConfiguration, Styles, format_source_unit};
use reweave_java::JavaParser;
use reweave_json::JsonParser;
use tracing::{debug, info};

use crate::ConfigFormat;
use crate::files::{FileFilter, discover};
use crate::output::{FileOutcome, Summary, print_changed, print_failure, print_summary, render_diff};

/// Directory to start config discovery from, given the paths being processed
fn discovery_root(paths: &[PathBuf]) -> &Path {
    match paths.first() {
        Some(first) if first.is_file() => match first.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        },
        Some(first) if first.is_dir() => first,
        _ => Path::new("."),
    }
}

fn load_configuration(config_path: Option<&Path>, paths: &[PathBuf]) -> anyhow::Result<ReweaveConfiguration> {
    let config = ConfigLoader::load(config_path, Some(discovery_root(paths)))?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// File filter from the configuration, with command-line patterns taking precedence
fn file_filter(config: &ReweaveConfiguration, include: Vec<String>, exclude: Vec<String>) -> anyhow::Result<FileFilter> {
    let files = config.files_config();
    let include = if include.is_empty() { files.include.unwrap_or_default() } else { include };
    let exclude = if exclude.is_empty() { files.exclude.unwrap_or_default() } else { exclude };
    FileFilter::new(&include, &exclude)
}

fn read_source(path: &Path) -> reweave_core::Result<String> {
    fs::read_to_string(path).map_err(|e| ReweaveError::io_error(path, e))
}

fn round_trip(path: &Path) -> reweave_core::Result<FileOutcome> {
    let source = read_source(path)?;
    let printed = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => JsonParser::parse(&source, path)?.print_trimmed_markers(),
        _ => JavaParser::parse(&source, path)?.print_trimmed_markers(),
    };
    Ok(FileOutcome::compare(source, printed))
}

/// Check command implementation
///
/// Parses every Java and JSON file and prints it back, reporting any file whose
/// printed form differs from its source.
pub fn check_command(
    paths: Vec<PathBuf>,
    include: Vec<String>,
    exclude: Vec<String>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<bool> {
    debug!("Running check command on paths: {:?}", paths);
    let start_time = Instant::now();

    let config = load_configuration(config_path.as_deref(), &paths)?;
    let filter = file_filter(&config, include, exclude)?;
    let files = discover(&paths, &filter, &["java", "json"])?;
    if files.is_empty() {
        println!("No source files found in specified paths.");
        return Ok(true);
    }

    let outcomes: Vec<(PathBuf, reweave_core::Result<FileOutcome>)> =
        files.par_iter().map(|path| (path.clone(), round_trip(path))).collect();

    let mut summary = Summary {
        files_checked: outcomes.len(),
        ..Default::default()
    };
    for (path, outcome) in outcomes {
        let outcome = outcome
            .recoverable(|e| {
                summary.failed += 1;
                print_failure(&path, &e.to_string());
            })
            .with_context(|| format!("Failed to check {}", path.display()))?;
        if let Some(FileOutcome::Changed { original, updated }) = outcome {
            summary.changed += 1;
            print_changed(&path, "mismatch");
            println!("{}", render_diff(&path, &original, &updated));
        }
    }

    print_summary(&summary, "Round-trip mismatches", start_time.elapsed());
    Ok(summary.is_clean())
}

/// Options of the `fmt` command
pub struct FormatOptions {
    pub paths: Vec<PathBuf>,
    pub check: bool,
    pub diff: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub indent_size: Option<usize>,
    pub use_tabs: bool,
    pub config_path: Option<PathBuf>,
}

fn format_file(path: &Path, configuration: &FormatterConfiguration) -> reweave_core::Result<FileOutcome> {
    let source = read_source(path)?;
    let cu = JavaParser::parse(&source, path)?;
    let formatted = format_source_unit(&cu, Some(configuration))?.print_trimmed_markers();
    Ok(FileOutcome::compare(source, formatted))
}

/// Format command implementation
///
/// Writes formatted sources back in place unless `--check` or `--diff` asks
/// only for a report.
pub fn format_command(options: FormatOptions) -> anyhow::Result<bool> {
    debug!("Running format command on paths: {:?}", options.paths);
    let start_time = Instant::now();

    let config = load_configuration(options.config_path.as_deref(), &options.paths)?;
    let mut formatter_config = config.formatter_config();
    if let Some(indent) = options.indent_size {
        formatter_config.indent_size = Some(indent);
    }
    if options.use_tabs {
        formatter_config.use_tab_character = Some(true);
    }

    let filter = file_filter(&config, options.include, options.exclude)?;
    let files = discover(&options.paths, &filter, &["java"])?;
    if files.is_empty() {
        println!("No Java files found in specified paths.");
        return Ok(true);
    }
    debug!("Found {} Java files to format", files.len());

    let outcomes: Vec<(PathBuf, reweave_core::Result<FileOutcome>)> = files
        .par_iter()
        .map(|path| (path.clone(), format_file(path, &formatter_config)))
        .collect();

    let report_only = options.check || options.diff;
    let mut summary = Summary {
        files_checked: outcomes.len(),
        ..Default::default()
    };
    for (path, outcome) in outcomes {
        let outcome = outcome
            .recoverable(|e| {
                summary.failed += 1;
                print_failure(&path, &e.to_string());
            })
            .with_context(|| format!("Failed to format {}", path.display()))?;
        let Some(FileOutcome::Changed { original, updated }) = outcome else {
            continue;
        };
        summary.changed += 1;
        if options.diff {
            println!("{}", render_diff(&path, &original, &updated));
        } else if options.check {
            print_changed(&path, "needs formatting");
        } else {
            fs::write(&path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Formatted {}", path.display());
            summary.written += 1;
        }
    }

    print_summary(&summary, "Files needing formatting", start_time.elapsed());
    Ok(summary.failed == 0 && (!report_only || summary.changed == 0))
}

/// Config init command implementation
pub fn config_init_command(format: ConfigFormat, force: bool) -> anyhow::Result<bool> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Toml => "reweave.toml",
        ConfigFormat::Json => ".reweaverc.json",
    };
    let config_path = PathBuf::from(filename);
    if config_path.exists() && !force {
        bail!("Configuration file '{filename}' already exists. Use --force to overwrite.");
    }

    let starter = ReweaveConfiguration::starter();
    let content = match format {
        ConfigFormat::Toml => starter.to_toml()?,
        ConfigFormat::Json => serde_json::to_string_pretty(&starter).context("Failed to serialize JSON")?,
    };
    fs::write(&config_path, content).with_context(|| format!("Failed to write {filename}"))?;

    println!("Created configuration file: {filename}");
    Ok(true)
}

/// Config show command implementation
pub fn config_show_command(resolved: bool, config_path: Option<PathBuf>) -> anyhow::Result<bool> {
    debug!("Showing configuration (resolved: {})", resolved);

    let mut config = ConfigLoader::load(config_path.as_deref(), None)?;
    if resolved {
        let styles = config.formatter_config().apply_to(&Styles::intellij());
        config.formatter = Some(FormatterConfiguration::from_styles(&styles));
    }
    println!("{}", serde_json::to_string_pretty(&config).context("Failed to serialize config")?);
    Ok(true)
}

/// Config validate command implementation
pub fn config_validate_command(path: Option<PathBuf>) -> anyhow::Result<bool> {
    debug!("Validating configuration file: {:?}", path);

    let config = ConfigLoader::load(path.as_deref(), None).context("Configuration validation failed")?;
    println!("Configuration is valid");
    let formatter = config.formatter_config();
    let styles = formatter.apply_to(&Styles::intellij());
    println!("   Indent size: {}", styles.tabs_and_indents.indent_size);
    println!("   Use tabs: {}", styles.tabs_and_indents.use_tab_character);
    Ok(true)
}

/// Config schema command implementation
pub fn config_schema_command() -> anyhow::Result<bool> {
    println!("{}", ReweaveConfiguration::json_schema()?);
    Ok(true)
}
