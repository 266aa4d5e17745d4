use crate::config::DisplayConfig;
use crate::error::Result;
use crate::i18n::Locale;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Live fighter-cockpit display with reveal-animated charts", long_about = None)]
pub struct Cli {
    /// TOML file overriding the built-in display settings
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    #[arg(short, long, default_value_t = log::LevelFilter::Info)]
    pub logging_level: log::LevelFilter,

    /// Initial label language
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,

    /// Seed for a reproducible telemetry stream
    #[arg(long)]
    pub seed: Option<u64>,

    /// Font used for every label (TTF/OTF)
    #[arg(long)]
    pub font: Option<std::path::PathBuf>,
}

impl Cli {
    /// Display settings from `--config` (or the defaults) with the command
    /// line flags applied on top.
    pub fn load_config(&self) -> Result<DisplayConfig> {
        let mut config = match &self.config {
            Some(path) => DisplayConfig::from_path(path)?,
            None => DisplayConfig::default(),
        };
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.font.is_some() {
            config.font_path = self.font.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "cockpit",
            "--locale",
            "tr",
            "--seed",
            "42",
            "-l",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.locale, Some(Locale::Tr));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.logging_level, log::LevelFilter::Debug);
        assert_eq!(cli.config, None);

        let config = cli.load_config().unwrap();
        assert_eq!(config.locale, Locale::Tr);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.font_path, None);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let cli = Cli::try_parse_from(["cockpit", "--config", "/nonexistent/cockpit.toml"]).unwrap();
        assert!(matches!(
            cli.load_config(),
            Err(crate::error::CockpitError::ConfigIo { .. })
        ));
    }
}
