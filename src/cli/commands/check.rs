//! check - Validate a playbook's roles against the roles directory
//!
//! # Output
//!
//! - text: one missing role per line, nothing else
//! - text + verbose: header, trace, then a results summary
//! - json: the full report; any trace goes to stderr

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use crate::core::config::Config;
use crate::core::diag::Diagnostics;
use crate::core::paths::{RolePaths, DEFAULT_ROLES_DIR};
use crate::engine::{validate, Context, ValidationReport, ValidationRequest};
use crate::ui::output::{self, format_list, Channel, OutputFormat, TerminalDiagnostics, Verbosity};

const USAGE: &str = "\
Usage: roledep [--playbook PLAYBOOK_PATH] [--roles ROLES_PATH] [--verbose]
   or: roledep PLAYBOOK_PATH";

/// Combine CLI arguments and config into a validation request.
///
/// The roles directory comes from `--roles`, then config `roles_path`,
/// then the default `roles`.
pub fn build_request(
    playbook: Option<&PathBuf>,
    roles: Option<&Path>,
    config: &Config,
    ctx: &Context,
) -> Result<ValidationRequest> {
    let Some(playbook) = playbook else {
        bail!("no playbook given\n\n{}", USAGE);
    };

    let roles_dir = match roles {
        Some(path) => path.to_path_buf(),
        None => config
            .roles_path()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROLES_DIR)),
    };

    Ok(ValidationRequest {
        playbook: resolve_against(&ctx.cwd, playbook),
        paths: RolePaths::new(resolve_against(&ctx.cwd, &roles_dir))
            .with_metadata_files(config.metadata_files()),
        ignore: config.ignore(),
    })
}

/// Run the validation and print the result.
pub fn check(
    ctx: &Context,
    config: &Config,
    request: &ValidationRequest,
) -> Result<ValidationReport> {
    let verbosity = Verbosity::from_flag(ctx.verbose);
    let diag = TerminalDiagnostics::new(verbosity, Channel::for_format(ctx.format));

    diag.trace("\n=== Role Dependency Validator ===");
    diag.trace(&format!("Playbook: {}", request.playbook.display()));
    diag.trace(&format!(
        "Roles directory: {}\n",
        request.paths.roles_dir.display()
    ));
    if let Some(path) = config.global_config_loaded_from() {
        diag.trace(&format!("Global config: {}", path.display()));
    }
    if let Some(path) = config.project_config_loaded_from() {
        diag.trace(&format!("Project config: {}", path.display()));
    }
    diag.trace(&format!("Current working directory: {}\n", ctx.cwd.display()));

    let report = validate(request, &diag)?;

    let rendered = render_report(&report, ctx.format, verbosity)?;
    if !rendered.is_empty() {
        output::print(rendered);
    }

    Ok(report)
}

/// Render a report for stdout.
///
/// Returns an empty string when there is nothing to print (plain text mode
/// with no missing roles).
pub fn render_report(
    report: &ValidationReport,
    format: OutputFormat,
    verbosity: Verbosity,
) -> Result<String> {
    match (format, verbosity) {
        (OutputFormat::Json, _) => {
            serde_json::to_string_pretty(report).context("failed to serialize report")
        }
        (OutputFormat::Text, Verbosity::Normal) => Ok(format_list(&report.missing, "")),
        (OutputFormat::Text, Verbosity::Verbose) => {
            let mut lines = vec!["\n=== VALIDATION RESULTS ===".to_string()];
            if report.missing.is_empty() {
                lines.push("All roles are present.".to_string());
            } else {
                lines.push("Missing roles:".to_string());
                lines.push(format_list(&report.missing, "- "));
            }
            if !report.ignored.is_empty() {
                lines.push("Ignored missing roles:".to_string());
                lines.push(format_list(&report.ignored, "- "));
            }
            Ok(lines.join("\n"))
        }
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProjectConfig;
    use crate::core::types::RoleName;

    fn role(name: &str) -> RoleName {
        RoleName::new(name).unwrap()
    }

    fn ctx() -> Context {
        Context {
            cwd: PathBuf::from("/work"),
            ..Default::default()
        }
    }

    fn report(missing: &[&str], ignored: &[&str]) -> ValidationReport {
        ValidationReport {
            playbook: PathBuf::from("site.yml"),
            roles_dir: PathBuf::from("/work/roles"),
            seeds: vec![role("app")],
            required: vec![role("app")],
            available: vec![],
            missing: missing.iter().map(|n| role(n)).collect(),
            ignored: ignored.iter().map(|n| role(n)).collect(),
        }
    }

    #[test]
    fn playbook_required() {
        let err = build_request(None, None, &Config::default(), &ctx()).unwrap_err();
        assert!(err.to_string().contains("no playbook given"));
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn default_roles_dir() {
        let playbook = PathBuf::from("site.yml");
        let request = build_request(Some(&playbook), None, &Config::default(), &ctx()).unwrap();

        assert_eq!(request.playbook, PathBuf::from("/work/site.yml"));
        assert_eq!(request.paths.roles_dir, PathBuf::from("/work/roles"));
    }

    #[test]
    fn cli_roles_override_config() {
        let config = Config {
            project: Some(ProjectConfig {
                roles_path: Some("/from/config".into()),
                ignore: Some(vec!["skip.me".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let playbook = PathBuf::from("/abs/site.yml");

        let from_config = build_request(Some(&playbook), None, &config, &ctx()).unwrap();
        assert_eq!(from_config.paths.roles_dir, PathBuf::from("/from/config"));
        assert_eq!(from_config.ignore, vec![role("skip.me")]);

        let from_cli =
            build_request(Some(&playbook), Some(Path::new("other")), &config, &ctx()).unwrap();
        assert_eq!(from_cli.paths.roles_dir, PathBuf::from("/work/other"));
        assert_eq!(from_cli.playbook, PathBuf::from("/abs/site.yml"));
    }

    #[test]
    fn plain_text_lists_missing_only() {
        let text = render_report(&report(&["b", "d"], &[]), OutputFormat::Text, Verbosity::Normal)
            .unwrap();
        assert_eq!(text, "b\nd");

        let empty =
            render_report(&report(&[], &[]), OutputFormat::Text, Verbosity::Normal).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn verbose_text_summary() {
        let text = render_report(&report(&["b"], &["x"]), OutputFormat::Text, Verbosity::Verbose)
            .unwrap();
        assert!(text.contains("=== VALIDATION RESULTS ==="));
        assert!(text.contains("Missing roles:\n- b"));
        assert!(text.contains("Ignored missing roles:\n- x"));

        let ok =
            render_report(&report(&[], &[]), OutputFormat::Text, Verbosity::Verbose).unwrap();
        assert!(ok.ends_with("All roles are present."));
    }

    #[test]
    fn json_report() {
        let json = render_report(&report(&["b"], &[]), OutputFormat::Json, Verbosity::Normal)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["missing"], serde_json::json!(["b"]));
        assert_eq!(value["roles_dir"], serde_json::json!("/work/roles"));
    }
}
