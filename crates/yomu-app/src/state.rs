use yomu_config::Config;

pub struct AppState {
    pub config: Config,
    /// Style ruby annotations with ANSI escapes
    pub color: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let color = config
            .ui
            .color
            .unwrap_or_else(|| atty::is(atty::Stream::Stdout));

        Self { config, color }
    }
}
