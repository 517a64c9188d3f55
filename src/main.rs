//! vogue-ai - fashion portrait generator.

mod adapters;
mod cassette;
mod cli;
mod client;
mod config;
mod context;
mod encode;
mod error;
mod lifecycle;
mod model;
mod output;
mod params;
mod ports;
mod prompt;
mod studio;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::client::{ClientConfig, PortraitClient};
use crate::config::Config;
use crate::context::{RecordingSession, ServiceContext};
use crate::encode::EncodedImage;
use crate::error::StudioError;
use crate::lifecycle::Status;
use crate::model::{resolve_model, validate_model};
use crate::output::{save_download, save_side_by_side};
use crate::params::validate_aspect_ratio;
use crate::prompt::resolve_prompt;
use crate::studio::Studio;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "vogue_ai=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), StudioError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(StudioError::Config)?;

    // Resolve parameters, CLI over config defaults
    let prompt = resolve_prompt(cli.prompt_file.as_deref())?;
    let model_name = cli.model.as_deref().unwrap_or(&config.defaults.model);
    let model = resolve_model(model_name);
    validate_model(&model).map_err(StudioError::InvalidArgument)?;
    let aspect_ratio =
        cli.aspect_ratio.clone().unwrap_or_else(|| config.defaults.aspect_ratio.clone());
    validate_aspect_ratio(&aspect_ratio).map_err(StudioError::InvalidArgument)?;
    let output_dir = cli.output_dir.clone().unwrap_or_else(|| config.defaults.output_dir.clone());

    if cli.verbose {
        eprintln!("Model: {model} (resolved from '{model_name}')");
        eprintln!("Aspect ratio: {aspect_ratio}");
    }

    // Pick the backend (live / recording / replaying)
    let replay_path = std::env::var("VOGUE_AI_REPLAY").ok();
    let is_recording = std::env::var("VOGUE_AI_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        if cli.verbose {
            eprintln!("Replaying from: {cassette_path}");
        }
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        if cli.verbose {
            eprintln!("Recording mode enabled");
        }
        let (ctx, session) = ServiceContext::recording();
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let client_config =
        ClientConfig { model, aspect_ratio, prompt, ..ClientConfig::new(config.api_key()) };
    let studio = Studio::new(PortraitClient::new(client_config, ctx.backend));

    generate_and_save(studio, recording_session, &cli, &output_dir).await
}

/// Run the upload through `studio` and save what it produced.
///
/// The studio is reset and any recording is written out whether or not the
/// generation or the saves succeed.
async fn generate_and_save(
    mut studio: Studio,
    recording_session: Option<RecordingSession>,
    cli: &Cli,
    output_dir: &Path,
) -> Result<(), StudioError> {
    let outcome = generate_once(&mut studio, cli, output_dir).await;
    let reset = studio.reset();
    drop(studio);

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    outcome.and(reset)
}

async fn generate_once(
    studio: &mut Studio,
    cli: &Cli,
    output_dir: &Path,
) -> Result<(), StudioError> {
    let status = match cli.inline_image() {
        Some(uri) => studio.submit(EncodedImage::from_data_uri(uri)?).await?,
        None => studio.upload(&cli.image).await?,
    };
    let (Status::Success, Some(result)) = (status, studio.result()) else {
        return Err(StudioError::Generation(
            studio.error().unwrap_or(lifecycle::FALLBACK_ERROR).to_string(),
        ));
    };

    let saved = save_download(result, output_dir)?;
    eprintln!("Saved: {}", saved.display());
    if cli.side_by_side {
        let compare = save_side_by_side(result, output_dir)?;
        eprintln!("Saved: {}", compare.display());
    }
    if cli.data_uri {
        println!("{}", result.generated.to_data_uri());
    }
    Ok(())
}
