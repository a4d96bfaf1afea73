use anyhow::Context;
use globeway_core::{Language, Membership, Settings};
use std::path::Path;

use crate::args::CliArgs;

/// Load settings from `path` (if any), then apply command-line overrides.
pub fn resolve(args: &CliArgs) -> anyhow::Result<Settings> {
    let mut settings = match args.config.as_deref() {
        Some(path) => from_file(Path::new(path))?,
        None => Settings::default(),
    };
    if let Some(lang) = args.lang.as_deref() {
        settings.display.language = lang
            .parse::<Language>()
            .map_err(anyhow::Error::msg)?;
    }
    if args.union {
        settings.loader.membership = Membership::Union;
    }
    Ok(settings)
}

pub fn from_file(path: &Path) -> anyhow::Result<Settings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse(text: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str(text)?)
}
