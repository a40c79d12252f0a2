//! Tests for configuration layer precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::build_config_from_layers;
use crate::issue::DEFAULT_ISSUE_PATTERN;

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"pr_url": "default-url"})), ("file", json!({"pr_url": "file-url"}))],
    "pr_url",
    "file-url",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"token": "file-token"})), ("environment", json!({"token": "env-token"}))],
    "token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![
        ("environment", json!({"approval_threshold": "2"})),
        ("cli", json!({"approval_threshold": "50%"}))
    ],
    "approval_threshold",
    "50%",
    "CLI should override environment"
)]
#[case::webhook_urls_defaults_file_env_cli(
    vec![
        ("defaults", json!({"webhook_urls": "*:https://default.example"})),
        ("file", json!({"webhook_urls": "*:https://file.example"})),
        ("environment", json!({"webhook_urls": "*:https://env.example"})),
        ("cli", json!({"webhook_urls": "*:https://cli.example"}))
    ],
    "webhook_urls",
    "*:https://cli.example",
    "CLI should win for webhook_urls"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = build_config_from_layers(&layers);

    let actual = match field {
        "pr_url" => config.pr_url.as_deref(),
        "token" => config.token.as_deref(),
        "approval_threshold" => Some(config.approval_threshold.as_str()),
        "webhook_urls" => config.webhook_urls.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn defaults_apply_when_no_sources_provided() {
    let config = build_config_from_layers(&[("defaults", json!({"pr_url": null}))]);

    assert!(config.pr_url.is_none(), "pr_url should be None");
    assert!(config.token.is_none(), "token should be None");
    assert_eq!(config.approval_threshold, "1");
    assert_eq!(config.find_regex_commits, DEFAULT_ISSUE_PATTERN);
    assert_eq!(config.find_regex_title, DEFAULT_ISSUE_PATTERN);
    assert_eq!(config.additional_repositories_pull_request_limit, 30);
    assert_eq!(config.commits_per_page, 100);
    assert!(!config.ignore_title && !config.ignore_commits);
    assert!(!config.force_changes_requested);
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let config = build_config_from_layers(&[
        (
            "file",
            json!({"additional_repositories": "octo/web", "ignore_commits": true}),
        ),
        ("cli", json!({"additional_repositories_pull_request_limit": 5})),
    ]);

    assert_eq!(config.additional_repositories.as_deref(), Some("octo/web"));
    assert!(config.ignore_commits, "file flag should survive CLI layer");
    assert_eq!(config.additional_repositories_pull_request_limit, 5);
}
