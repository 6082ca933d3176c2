use std::path::Path;

use yomu_config::Config;

use crate::cli::Cli;

/// Resolve the effective config: file or environment, then command line flags
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => Config::new(),
    };

    apply_overrides(&mut config, cli);
    Ok(config)
}

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    Config::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.url {
        config.network.analyze_url = url.clone();
    }
    if let Some(page_size) = cli.page_size.filter(|size| *size > 0) {
        config.reader.page_size = page_size;
    }
    if let Some(prefetch) = cli.prefetch {
        config.reader.prefetch_pages = prefetch;
    }
}
