use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console::Style;
use tracing::debug;

use stackparams_cli::commands::parameters::{render_parameters, ParametersInput};
use stackparams_cli::commands::tags::{render_tags, TagsInput};
use stackparams_cli::parameter_store::ParameterStoreLookup;
use stackparams_cli::settings;
use stackparams_types::resolution::ResolutionPolicy;
use stackparams_util::logging;

stackparams_util::app_info!();

/// Produces JSON suitable for the `aws cloudformation` CLI.
///
/// Resolves the parameters declared by a CloudFormation template from a parameters file
/// and `Key=value` arguments. With `--tags`, produces stack tags instead.
#[derive(Parser)]
#[command(name = "stackparams", author, version, about, long_about = None)]
#[command(long_version = crate::app_info::formatted())]
struct Args {
    ///CloudFormation YAML template path
    #[arg(long, required_unless_present = "tags")]
    template: Option<PathBuf>,
    ///Parameters YAML file
    #[arg(long, conflicts_with = "tags")]
    parameters: Option<PathBuf>,
    ///Accept defaults from CloudFormation template, omit from JSON
    #[arg(long, conflicts_with = "tags")]
    accept_defaults: bool,
    ///Disable UsePreviousValue, fail if a parameter has no default and is not specified
    #[arg(long, conflicts_with = "tags")]
    no_previous: bool,
    ///Tags YAML file, produces tags instead of parameters
    #[arg(long, conflicts_with = "template")]
    tags: Option<PathBuf>,
    ///Values overriding those from the parameters or tags file
    #[arg(value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

fn main() -> ExitCode {
    let red = Style::new().for_stderr().red();
    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", red.apply_to(format!("error: {error:#}")));
            ExitCode::FAILURE
        }
    }
}

fn execute() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = settings::load()
        .context("Failed to load configuration")?;
    logging::initialize_with_config(settings.logging.clone())?;
    debug!("Loaded configuration: {:?}", settings.loaded);

    let lookup = ParameterStoreLookup::new(settings.lookup.aws.clone());
    let on_failure = settings.lookup.failure;

    let json = if let Some(tags_file) = args.tags {
        let input = TagsInput::load(&tags_file, args.overrides)?;
        render_tags(&input, &lookup, on_failure)?
    } else {
        let template_file = args.template
            .context("CloudFormation template required, e.g: --template=cfn.yaml")?;
        let policy = ResolutionPolicy {
            accept_defaults: args.accept_defaults,
            no_previous: args.no_previous,
        };
        let input = ParametersInput::load(&template_file, args.parameters.as_deref(), args.overrides, policy)?;
        render_parameters(&input, &lookup, on_failure)?
    };

    println!("{json}");
    Ok(())
}
