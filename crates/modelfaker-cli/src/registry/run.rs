use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use modelfaker_generate::GenerationReport;
use serde::Serialize;
use serde_json::Value;

use super::RegistryResult;
use super::atomic::write_json_atomic;

/// Serializable options for a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOptions {
    pub models_path: PathBuf,
    pub model: String,
    pub count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locale: Vec<String>,
    pub seed: u64,
    pub cycle_guard: i64,
}

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub out: Option<PathBuf>,
    pub pretty: bool,
    pub options: RunOptions,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub version: &'static str,
    pub options: RunOptions,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub output_path: PathBuf,
    pub report_path: PathBuf,
    pub logs_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx
        .run_dir
        .join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        options: ctx.options.clone(),
        git: collect_git_info(),
    };
    write_json_atomic(&root.join("config.json"), &config, true)?;

    let logs_path = root.join("logs.ndjson");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        output_path: root.join("output.json"),
        report_path: root.join("report.json"),
        logs_path,
        root,
    })
}

/// Write generated records to the run directory and, when asked, to `out_path`.
pub fn write_output(
    paths: &RunPaths,
    value: &Value,
    out_path: Option<&Path>,
    pretty: bool,
) -> RegistryResult<()> {
    write_json_atomic(&paths.output_path, value, pretty)?;
    if let Some(out_path) = out_path {
        write_json_atomic(out_path, value, pretty)?;
    }
    Ok(())
}

pub fn write_report(paths: &RunPaths, report: &GenerationReport) -> RegistryResult<()> {
    write_json_atomic(&paths.report_path, report, true)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(run_dir: PathBuf) -> RunContext {
        RunContext {
            run_id: "test-run".to_string(),
            started_at: Utc::now(),
            run_dir,
            out: None,
            pretty: false,
            options: RunOptions {
                models_path: PathBuf::from("models.json"),
                model: "user".to_string(),
                count: 2,
                rules_path: None,
                locale: vec!["pt_BR".to_string()],
                seed: 7,
                cycle_guard: 1,
            },
        }
    }

    #[test]
    fn run_directory_holds_config_output_and_logs() {
        let run_dir = std::env::temp_dir().join(format!("modelfaker-{}", uuid::Uuid::new_v4()));
        let ctx = context(run_dir.clone());

        let paths = start_run(&ctx).expect("start run");
        let name = paths.root.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.ends_with("__run_test-run"), "{name}");
        assert!(paths.logs_path.exists());

        let config: Value = serde_json::from_str(
            &std::fs::read_to_string(paths.root.join("config.json")).expect("read config"),
        )
        .expect("parse config");
        assert_eq!(config["options"]["model"], json!("user"));
        assert_eq!(config["options"]["locale"], json!(["pt_BR"]));

        write_output(&paths, &json!([{"a": 1}]), None, false).expect("write output");
        let output = std::fs::read_to_string(&paths.output_path).expect("read output");
        assert_eq!(output, r#"[{"a":1}]"#);

        std::fs::remove_dir_all(run_dir).expect("cleanup");
    }
}
