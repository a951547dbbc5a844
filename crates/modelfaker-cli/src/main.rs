mod registry;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use modelfaker_core::{ModelError, ModelName};
use modelfaker_generate::{
    DEFAULT_CYCLE_GUARD, DataFaker, FakerConfig, GenerateOptions, GenerationError, LocaleItem,
    LocaleKey, LocaleSpec,
};
use modelfaker_rules::{RuleTree, ValidationReport, rules_json_schema, validate_rules};
use registry::{RunContext, RunOptions, init_logging, start_run, write_output, write_report};
use serde_json::Value;
use settings::{CliSettings, SettingsError, load_settings};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("json error in {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid rules in {}: {}", .path.display(), describe_report(.report))]
    InvalidRules {
        path: PathBuf,
        report: ValidationReport,
    },
    #[error("unknown model `{name}` (defined: {available})")]
    UnknownModel { name: String, available: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "modelfaker", version, about = "Generate fake records from model definitions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate records for one model of a models document.
    Generate(GenerateArgs),
    /// List generator paths available for a locale.
    ListGenerators(ListGeneratorsArgs),
    /// Print the JSON schema of rule documents.
    Schema,
    /// Validate a rule document without generating anything.
    ValidateRules(ValidateRulesArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// JSON document of the form `{"models": {...}}`.
    #[arg(long, value_name = "FILE")]
    models: PathBuf,
    /// Model to generate.
    #[arg(long)]
    model: String,
    /// Number of root records.
    #[arg(long, default_value_t = 1)]
    count: i64,
    /// JSON rule document limiting nested references.
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,
    /// Locale id, or a comma separated fallback list.
    #[arg(long, value_delimiter = ',')]
    locale: Vec<String>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Depth applied to circular references without DEEP.
    #[arg(long)]
    cycle_guard: Option<i64>,
    /// Optional copy of output.json.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output directory for runs.
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// TOML settings file.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ListGeneratorsArgs {
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct ValidateRulesArgs {
    #[arg(value_name = "FILE")]
    path: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::ListGenerators(args) => run_list_generators(args),
        Command::Schema => run_schema(),
        Command::ValidateRules(args) => run_validate_rules(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let settings = load_settings(args.settings.as_deref())?;
    let default_locale = default_locale(&settings)?;
    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(|| Uuid::new_v4().as_u64_pair().0);
    let cycle_guard = args
        .cycle_guard
        .or(settings.cycle_guard)
        .unwrap_or(DEFAULT_CYCLE_GUARD);
    if cycle_guard < 0 {
        return Err(CliError::InvalidConfig(format!(
            "cycle guard must not be negative (got {cycle_guard})"
        )));
    }

    let models_doc = read_json(&args.models)?;
    let (rules, rule_warnings) = match &args.rules {
        Some(path) => load_rules(path)?,
        None => (RuleTree::default(), ValidationReport::default()),
    };

    let run_ctx = RunContext {
        run_id: Uuid::new_v4().to_string(),
        started_at: chrono::Utc::now(),
        run_dir: args
            .run_dir
            .or_else(|| settings.run_dir.clone())
            .unwrap_or_else(|| PathBuf::from("runs")),
        out: args.out,
        pretty: settings.pretty,
        options: RunOptions {
            models_path: args.models.clone(),
            model: args.model.clone(),
            count: args.count,
            rules_path: args.rules.clone(),
            locale: args.locale.clone(),
            seed,
            cycle_guard,
        },
    };

    let run_paths = start_run(&run_ctx)?;
    init_logging(Some(&run_paths.logs_path))?;

    tracing::info!(event = "run_started", run_id = %run_ctx.run_id, model = %args.model);
    for issue in &rule_warnings.warnings {
        tracing::warn!(event = "rule_warning", code = %issue.code, path = %issue.path, "{}", issue.message);
    }

    let timer = Instant::now();
    let faker = DataFaker::with_config(FakerConfig {
        seed: Some(seed),
        cycle_guard,
        default_locale,
    });
    let defined = faker.define_models_json(&models_doc)?;
    tracing::info!(event = "models_defined", count = defined.len());

    let name = ModelName::from(args.model.as_str());
    if !faker.registry().contains(name.clone()) {
        let available = faker
            .registry()
            .names()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(CliError::UnknownModel {
            name: args.model,
            available,
        });
    }

    let mut options = GenerateOptions::new(args.count).rules(rules).seed(seed);
    if let Some(locale) = locale_spec(&args.locale) {
        options = options.locale(locale);
    }
    let result = faker.run(name, options)?;

    write_output(
        &run_paths,
        &result.value,
        run_ctx.out.as_deref(),
        run_ctx.pretty,
    )?;
    tracing::info!(event = "output_written", path = %run_paths.output_path.display());

    write_report(&run_paths, &result.report)?;
    tracing::info!(event = "report_written", path = %run_paths.report_path.display());

    if run_ctx.out.is_none() {
        println!("{}", encode(&result.value, run_ctx.pretty)?);
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(
        event = "run_finished",
        status = "success",
        records = result.report.records_generated,
        duration_ms = duration_ms
    );

    Ok(())
}

fn run_list_generators(args: ListGeneratorsArgs) -> Result<(), CliError> {
    init_logging(None)?;
    let faker = DataFaker::new();
    let locale = args.locale.map(LocaleSpec::Id);
    for path in faker.capability(locale.as_ref()).paths() {
        println!("{path}");
    }
    Ok(())
}

fn run_schema() -> Result<(), CliError> {
    let schema = rules_json_schema();
    let encoded = serde_json::to_string_pretty(&schema).map_err(|source| CliError::Json {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    println!("{encoded}");
    Ok(())
}

fn run_validate_rules(args: ValidateRulesArgs) -> Result<(), CliError> {
    let (_, report) = load_rules(&args.path)?;
    for issue in &report.warnings {
        println!("warning {} at {}: {}", issue.code, issue.path, issue.message);
    }
    println!("ok");
    Ok(())
}

fn load_rules(path: &Path) -> Result<(RuleTree, ValidationReport), CliError> {
    let json = read_json(path)?;
    match validate_rules(&json) {
        Ok(validated) => {
            let mut report = ValidationReport::default();
            for warning in validated.warnings {
                report.push_warning(warning);
            }
            Ok((validated.rules, report))
        }
        Err(report) => Err(CliError::InvalidRules {
            path: path.to_path_buf(),
            report,
        }),
    }
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn encode(value: &Value, pretty: bool) -> Result<String, CliError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|source| CliError::Json {
        path: PathBuf::from("<stdout>"),
        source,
    })
}

fn default_locale(settings: &CliSettings) -> Result<LocaleKey, CliError> {
    match settings.default_locale.as_deref() {
        None => Ok(LocaleKey::default()),
        Some(id) => LocaleKey::parse(id)
            .ok_or_else(|| CliError::InvalidConfig(format!("unknown default_locale `{id}`"))),
    }
}

fn locale_spec(ids: &[String]) -> Option<LocaleSpec> {
    match ids {
        [] => None,
        [id] => Some(LocaleSpec::Id(id.clone())),
        ids => Some(LocaleSpec::List(
            ids.iter().map(|id| LocaleItem::Id(id.clone())).collect(),
        )),
    }
}

fn describe_report(report: &ValidationReport) -> String {
    report
        .errors
        .iter()
        .map(|issue| format!("{} at {}: {}", issue.code, issue.path, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_flag_maps_to_spec() {
        assert!(locale_spec(&[]).is_none());
        assert!(matches!(
            locale_spec(&["pt_BR".to_string()]),
            Some(LocaleSpec::Id(id)) if id == "pt_BR"
        ));
        assert!(matches!(
            locale_spec(&["fr_FR".to_string(), "en_US".to_string()]),
            Some(LocaleSpec::List(items)) if items.len() == 2
        ));
    }

    #[test]
    fn settings_locale_must_be_known() {
        let settings = CliSettings {
            default_locale: Some("xx_XX".to_string()),
            ..CliSettings::default()
        };
        assert!(matches!(default_locale(&settings), Err(CliError::InvalidConfig(_))));

        let settings = CliSettings {
            default_locale: Some("ja_JP".to_string()),
            ..CliSettings::default()
        };
        assert_eq!(default_locale(&settings).ok(), Some(LocaleKey::JaJp));
    }

    #[test]
    fn cli_parses_generate_flags() {
        let cli = Cli::parse_from([
            "modelfaker",
            "generate",
            "--models",
            "models.json",
            "--model",
            "user",
            "--count",
            "3",
            "--locale",
            "pt_BR,en_US",
            "--seed",
            "9",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.count, 3);
        assert_eq!(args.locale, vec!["pt_BR", "en_US"]);
        assert_eq!(args.seed, Some(9));
        assert!(args.rules.is_none());
    }
}
