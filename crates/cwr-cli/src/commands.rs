use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cwr_build::CwrBuilder;
use cwr_config::{CwrConfig, DEFAULT_CONFIG, load_config};
use cwr_ingest::{ScanLimits, load_work_rows};
use cwr_validate::validate;
use tracing::{debug, info, info_span, trace};

use crate::logging::redact_value;
use crate::types::{
    ConfigOptions, ConfigResult, GenerateOptions, GenerateResult, ValidateResult,
};

/// Read the CSV, build the transmission and write it.
pub fn run_generate(options: &GenerateOptions) -> Result<GenerateResult> {
    let span = info_span!("generate", input = %options.input.display());
    let _guard = span.enter();

    let (config, source) =
        load_config(options.config.as_deref()).context("load configuration")?;
    let limits = ScanLimits {
        max_publishers: config.defaults.max_publishers,
        max_writers: config.defaults.max_writers,
    };
    let rows = load_work_rows(&options.input, limits)
        .with_context(|| format!("read work rows from {}", options.input.display()))?;
    for row in &rows {
        trace!(
            row = row.row_number,
            title = redact_value(row.title.as_deref().unwrap_or_default()),
            publishers = row.publishers.len(),
            writers = row.writers.len(),
            "work row"
        );
    }

    let builder = CwrBuilder::new(config).context("prepare CWR builder")?;
    let file = builder.generate(&rows);
    let file_name = builder.file_name(options.sequence);
    debug!(
        transactions = file.transactions,
        records = file.records,
        notes = file.notes.len(),
        "generated transmission"
    );

    let output = if options.dry_run {
        info!("dry run, nothing written");
        None
    } else {
        let path = options
            .output
            .clone()
            .unwrap_or_else(|| output_dir(&options.input).join(&file_name));
        fs::write(&path, &file.text)
            .with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), records = file.records, "wrote CWR file");
        Some(path)
    };

    let validation = options.validate.then(|| validate(&file.text));
    let note_counts = file.note_counts();
    Ok(GenerateResult {
        input: options.input.clone(),
        output,
        file_name,
        config_source: source.to_string(),
        rows: rows.len(),
        transactions: file.transactions,
        records: file.records,
        notes: file.notes,
        note_counts,
        validation,
    })
}

/// Validate an existing CWR file.
pub fn run_validate(path: &Path) -> Result<ValidateResult> {
    let span = info_span!("validate", path = %path.display());
    let _guard = span.enter();

    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    // Society files are not always UTF-8; invalid bytes become U+FFFD.
    let text = String::from_utf8_lossy(&bytes);
    let outcome = validate(&text);
    Ok(ValidateResult {
        path: path.to_path_buf(),
        counts: outcome.counts(),
        outcome,
    })
}

/// Show the effective configuration, or write the built-in one to a file.
pub fn run_config(options: &ConfigOptions) -> Result<ConfigResult> {
    if let Some(path) = &options.init {
        return init_config(path, options.force);
    }
    let (config, source) =
        load_config(options.config.as_deref()).context("load configuration")?;
    let text = config
        .to_toml_string()
        .context("render configuration")?;
    Ok(ConfigResult {
        source: source.to_string(),
        written: None,
        text,
    })
}

fn init_config(path: &Path, force: bool) -> Result<ConfigResult> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    // Parse before writing so a broken built-in never lands on disk.
    let config = CwrConfig::embedded().context("load built-in configuration")?;
    fs::write(path, DEFAULT_CONFIG).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote configuration");
    Ok(ConfigResult {
        source: "built-in defaults".to_string(),
        written: Some(path.to_path_buf()),
        text: config
            .to_toml_string()
            .context("render configuration")?,
    })
}

fn output_dir(input: &Path) -> PathBuf {
    input.parent().map(Path::to_path_buf).unwrap_or_default()
}
