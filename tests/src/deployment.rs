use googletest::prelude::*;
use rstest::rstest;
use serde_json::json;

use stackparams_types::resolution::ResolutionPolicy;

use crate::testing::{records, workspace, Workspace, GREETING_TEMPLATE};

const LAUNCH: ResolutionPolicy = ResolutionPolicy { accept_defaults: true, no_previous: true };

#[rstest]
fn update_keeps_every_previous_value(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters(GREETING_TEMPLATE, None, &[], ResolutionPolicy::default())?;

    verify_that!(records(&json)?, unordered_elements_are![
        eq(json!({ "ParameterKey": "Greeting", "UsePreviousValue": true })),
        eq(json!({ "ParameterKey": "Recipient", "UsePreviousValue": true })),
        eq(json!({ "ParameterKey": "ImageRepo", "UsePreviousValue": true })),
        eq(json!({ "ParameterKey": "ImageTag", "UsePreviousValue": true })),
        eq(json!({ "ParameterKey": "Cluster", "UsePreviousValue": true })),
    ])
}

#[rstest]
fn launch_with_values_from_the_command_line(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters(
        GREETING_TEMPLATE,
        None,
        &["Recipient=world", "ImageTag=v1", "Cluster=nanoservices"],
        LAUNCH,
    )?;

    verify_that!(records(&json)?, unordered_elements_are![
        eq(json!({ "ParameterKey": "Recipient", "ParameterValue": "world" })),
        eq(json!({ "ParameterKey": "ImageTag", "ParameterValue": "v1" })),
        eq(json!({ "ParameterKey": "Cluster", "ParameterValue": "nanoservices" })),
    ])
}

#[rstest]
fn launch_with_values_from_a_parameters_file(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters(
        GREETING_TEMPLATE,
        Some("---\nRecipient: world\nCluster: nanoservices\n"),
        &["ImageTag=v1"],
        LAUNCH,
    )?;

    verify_that!(records(&json)?, unordered_elements_are![
        eq(json!({ "ParameterKey": "Recipient", "ParameterValue": "world" })),
        eq(json!({ "ParameterKey": "ImageTag", "ParameterValue": "v1" })),
        eq(json!({ "ParameterKey": "Cluster", "ParameterValue": "nanoservices" })),
    ])
}

#[rstest]
fn deploy_a_new_image_tag(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters(GREETING_TEMPLATE, None, &["ImageTag=v2"], ResolutionPolicy::default())?;

    verify_that!(records(&json)?, unordered_elements_are![
        eq(json!({ "ParameterKey": "Greeting", "UsePreviousValue": true })),
        eq(json!({ "ParameterKey": "Recipient", "UsePreviousValue": true })),
        eq(json!({ "ParameterKey": "ImageRepo", "UsePreviousValue": true })),
        eq(json!({ "ParameterKey": "ImageTag", "ParameterValue": "v2" })),
        eq(json!({ "ParameterKey": "Cluster", "UsePreviousValue": true })),
    ])
}

#[rstest]
fn command_line_values_win_over_the_parameters_file(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters(
        GREETING_TEMPLATE,
        Some("ImageTag: v1\n"),
        &["ImageTag=v2", "ImageTag=v3"],
        ResolutionPolicy { accept_defaults: true, no_previous: false },
    )?;

    verify_that!(records(&json)?, unordered_elements_are![
        eq(json!({ "ParameterKey": "Recipient", "UsePreviousValue": true })),
        eq(json!({ "ParameterKey": "ImageTag", "ParameterValue": "v3" })),
        eq(json!({ "ParameterKey": "Cluster", "UsePreviousValue": true })),
    ])
}

#[rstest]
fn a_blank_default_is_not_a_default(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters(
        "Parameters:\n  Foo:\n    Default: \"\"\n",
        None,
        &[],
        ResolutionPolicy { accept_defaults: true, no_previous: false },
    )?;

    verify_that!(records(&json)?, elements_are![
        eq(json!({ "ParameterKey": "Foo", "UsePreviousValue": true })),
    ])
}

#[rstest]
fn nothing_is_emitted_when_all_defaults_are_accepted(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters(
        "Parameters:\n  Foo:\n    Default: bar\n",
        None,
        &[],
        LAUNCH,
    )?;

    verify_that!(json, eq("[]"))
}

#[rstest]
#[case::non_blank("---\nFoo: bar\n", json!("bar"))]
#[case::blank("---\nFoo:\n", json!(""))]
fn values_from_the_parameters_file_are_explicit(workspace: Workspace, #[case] parameters: &str, #[case] expected: serde_json::Value) -> Result<()> {
    let json = workspace.render_parameters(
        "Parameters:\n  Foo:\n    Description: \"may be blank\"\n",
        Some(parameters),
        &[],
        ResolutionPolicy::default(),
    )?;

    verify_that!(json.as_str(), not(contains_substring("UsePreviousValue")))?;
    verify_that!(records(&json)?, elements_are![
        eq(json!({ "ParameterKey": "Foo", "ParameterValue": expected })),
    ])
}

#[rstest]
#[case::trailing_zero("1.10")]
#[case::hexadecimal("0x1F")]
#[case::exponent("1e3")]
#[case::leading_plus("+12")]
#[case::leading_zeros("007")]
fn numeric_looking_values_are_deployed_as_written(workspace: Workspace, #[case] image_tag: &str) -> Result<()> {
    let json = workspace.render_parameters(
        GREETING_TEMPLATE,
        Some(&format!("Recipient: world\nCluster: nanoservices\nImageTag: {image_tag}\n")),
        &[],
        LAUNCH,
    )?;

    verify_that!(records(&json)?, unordered_elements_are![
        eq(json!({ "ParameterKey": "Recipient", "ParameterValue": "world" })),
        eq(json!({ "ParameterKey": "ImageTag", "ParameterValue": image_tag })),
        eq(json!({ "ParameterKey": "Cluster", "ParameterValue": "nanoservices" })),
    ])
}

#[rstest]
fn secrets_are_looked_up_in_the_parameter_store(workspace: Workspace) -> Result<()> {
    let workspace = workspace.with_secrets(&[("/path/to/secret", "hunter2")]);

    let json = workspace.render_parameters(
        "Parameters:\n  Secret:\n",
        Some("Secret: !ParameterStore /path/to/secret\n"),
        &[],
        ResolutionPolicy::default(),
    )?;

    verify_that!(records(&json)?, elements_are![
        eq(json!({ "ParameterKey": "Secret", "ParameterValue": "hunter2" })),
    ])
}

#[rstest]
fn output_is_indented_by_two_spaces(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters("Parameters:\n  Foo:\n", None, &[], ResolutionPolicy::default())?;

    verify_that!(json, eq("[\n  {\n    \"ParameterKey\": \"Foo\",\n    \"UsePreviousValue\": true\n  }\n]"))
}
