//! Command dispatch: read, parse, then print a tree or a graph description.

use std::io::{self, Write};

use tracing::{debug, instrument};

use crate::application::GraphRenderer;
use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::OutlineParser;
use crate::infrastructure::input::read_source;
use crate::infrastructure::InfraError;

/// Load settings and run against stdout.
pub fn execute(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &settings, &mut out)
}

/// Run with already loaded settings, writing the result to `out`.
#[instrument(level = "debug", skip_all)]
pub fn run<W: Write>(cli: &Cli, settings: &Settings, out: &mut W) -> CliResult<()> {
    let settings = apply_flags(cli, settings)?;
    debug!("effective settings: {:?}", settings);

    let source = read_source(cli.file.as_deref(), settings.max_input_bytes)?.ok_or_else(|| {
        CliError::Usage("no input: pass an outline file or pipe one on stdin".to_string())
    })?;

    let outline = OutlineParser::new(settings.parser_options()).parse_str(&source)?;
    if outline.is_empty() {
        output::warning("outline has no entries");
    }

    if cli.tree {
        return writeln!(out, "{}", outline.to_tree_string())
            .map_err(|e| CliError::from(InfraError::io("write tree", e)));
    }

    GraphRenderer::new(settings.render_config()).render(&outline, out)?;
    Ok(())
}

/// Command line flags are the top settings layer.
fn apply_flags(cli: &Cli, settings: &Settings) -> CliResult<Settings> {
    let mut settings = settings.clone();
    if cli.vertical {
        settings.vertical = true;
    } else if cli.horizontal {
        settings.vertical = false;
    }
    if let Some(lim) = cli.lim {
        settings.wrap_limit = lim;
    }
    if let Some(path) = &cli.images_path {
        settings.images_path = path.clone();
    }
    if let Some(path) = &cli.search_path {
        settings.search_path = Some(path.clone());
    }
    if let Some(marker) = cli.marker {
        if marker.is_whitespace() {
            return Err(CliError::Usage("--marker must not be whitespace".to_string()));
        }
        settings.marker = marker;
    }
    Ok(settings)
}
