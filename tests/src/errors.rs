use googletest::prelude::*;
use rstest::rstest;

use stackparams_cli::commands::parameters::ParametersInput;
use stackparams_types::resolution::ResolutionPolicy;
use stackparams_types::values::lookup::LookupFailurePolicy;

use crate::testing::{records, workspace, Workspace, GREETING_TEMPLATE};

#[rstest]
fn unknown_parameters_are_rejected(workspace: Workspace) -> Result<()> {
    let result = workspace.render_parameters(
        GREETING_TEMPLATE,
        Some("Recipient: world\nColour: blue\n"),
        &["Size=large"],
        ResolutionPolicy::default(),
    );

    verify_that!(
        result.map_err(|error| error.to_string()),
        err(eq("specified parameters not in template: Colour, Size"))
    )
}

#[rstest]
fn missing_parameters_are_rejected_without_previous_values(workspace: Workspace) -> Result<()> {
    let result = workspace.render_parameters(
        GREETING_TEMPLATE,
        None,
        &["ImageTag=v1"],
        ResolutionPolicy { accept_defaults: true, no_previous: true },
    );

    verify_that!(
        result.map_err(|error| error.to_string()),
        err(eq("missing parameters: Recipient, Cluster"))
    )
}

#[rstest]
fn malformed_overrides_are_rejected(workspace: Workspace) -> Result<()> {
    let result = workspace.render_parameters(GREETING_TEMPLATE, None, &["ImageTag"], ResolutionPolicy::default());

    verify_that!(
        result.map_err(|error| error.to_string()),
        err(eq("expected Key=value, got 'ImageTag'"))
    )
}

#[rstest]
fn a_failed_lookup_substitutes_an_empty_value_by_default(workspace: Workspace) -> Result<()> {
    let json = workspace.render_parameters(
        "Parameters:\n  Secret:\n",
        Some("Secret: !ParameterStore /does/not/exist\n"),
        &[],
        ResolutionPolicy::default(),
    )?;

    verify_that!(records(&json)?, elements_are![
        eq(serde_json::json!({ "ParameterKey": "Secret", "ParameterValue": "" })),
    ])
}

#[rstest]
fn a_failed_lookup_can_be_made_fatal(mut workspace: Workspace) -> Result<()> {
    workspace.on_failure = LookupFailurePolicy::Fail;

    let result = workspace.render_parameters(
        "Parameters:\n  Secret:\n",
        Some("Secret: !ParameterStore /does/not/exist\n"),
        &[],
        ResolutionPolicy::default(),
    );

    verify_that!(matches!(result, Err(stackparams_cli::Error::Lookup(_))), eq(true))
}

#[rstest]
fn an_unreadable_template_is_reported_with_its_path(workspace: Workspace) -> Result<()> {
    let template_file = workspace.missing_file("missing.yaml");

    let result = ParametersInput::load(&template_file, None, Vec::new(), ResolutionPolicy::default());

    let expected = format!("cannot read CloudFormation template: {}", template_file.display());
    verify_that!(result.map_err(|error| error.to_string()), err(eq(expected)))
}

#[rstest]
fn an_invalid_template_is_rejected(workspace: Workspace) -> Result<()> {
    let result = workspace.render_parameters("Parameters: [", None, &[], ResolutionPolicy::default());

    verify_that!(matches!(result, Err(stackparams_cli::Error::Template(_))), eq(true))
}
