//! Converter setup: config loading, flag overrides, output paths.

use std::path::PathBuf;

use pixfit_core::{Config, Converter};

use super::ConvertArgs;

/// Everything the batch run needs, resolved from config and flags.
pub(crate) struct ConvertContext {
    pub converter: Converter,
    pub config: Config,
    pub output_dir: PathBuf,
    /// Archive destination when writing a single ZIP
    pub archive_path: Option<PathBuf>,
}

/// Validate inputs, load config, apply flag overrides, and build the converter.
pub(crate) fn setup_converter(args: &ConvertArgs) -> anyhow::Result<ConvertContext> {
    if let Some(missing) = args.inputs.iter().find(|p| !p.exists()) {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            missing
        );
    }

    let mut config = Config::load()?;
    apply_overrides(&mut config, args);
    config.validate()?;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir());
    let archive_path = args
        .archive
        .as_ref()
        .map(|path| path.clone().unwrap_or_else(|| output_dir.join(&config.archive.file_name)));

    let converter = Converter::from_config(&config)?;
    tracing::debug!("Options: {:?}", converter.options());

    Ok(ConvertContext {
        converter,
        config,
        output_dir,
        archive_path,
    })
}

/// Apply command-line flags on top of the loaded configuration.
pub(crate) fn apply_overrides(config: &mut Config, args: &ConvertArgs) {
    if let Some(width) = args.width {
        config.output.width = width;
    }
    if let Some(height) = args.height {
        config.output.height = height;
    }
    if let Some(quality) = args.quality {
        config.output.quality = quality;
    }
    if args.lossless {
        config.output.lossless = true;
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    if let Some(background) = args.background {
        config.output.background = background.into();
    }
    if let Some(accept) = args.accept {
        config.input.accept = accept.into();
    }
}
