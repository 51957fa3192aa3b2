//! Settings for the command line front end.
//!
//! Sources, later ones winning: built-in defaults, the TOML file
//! (`config/menu_planner.toml` unless `--config` says otherwise), environment
//! variables prefixed with `MENU_PLANNER_` (nested keys use `__`, e.g.
//! `MENU_PLANNER_BUSINESS__NAME`), then command line flags.

use std::path::PathBuf;

use engine::{CategoryLimit, Currency, default_category_limits};
use export::BusinessInfo;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/menu_planner.toml";

/// One entry of the package allowance table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitSetting {
    pub category: String,
    pub limit: u32,
    /// Defaults to the category id.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub level: String,
    pub currency: Currency,
    pub business: BusinessInfo,
    /// Replaces the built-in allowance table when present.
    pub category_limits: Option<Vec<LimitSetting>>,
    /// Replaces the built-in terms when present.
    pub terms: Option<Vec<String>>,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            currency: Currency::default(),
            business: BusinessInfo::default(),
            category_limits: None,
            terms: None,
            output_dir: PathBuf::from("out"),
        }
    }
}

impl Settings {
    pub fn limits(&self) -> Vec<CategoryLimit> {
        match &self.category_limits {
            Some(limits) => limits
                .iter()
                .map(|l| {
                    let name = l.name.clone().unwrap_or_else(|| l.category.clone());
                    CategoryLimit::new(l.category.clone(), l.limit, name)
                })
                .collect(),
            None => default_category_limits(),
        }
    }

    pub fn terms(&self) -> Vec<String> {
        self.terms.clone().unwrap_or_else(export::default_terms)
    }
}

#[derive(Debug, Default, clap::Args)]
pub struct SettingsArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    level: Option<String>,
    /// Override display currency (INR, EUR).
    #[arg(long, global = true, value_parser = parse_currency)]
    currency: Option<Currency>,
    /// Override the directory exported menus are written to.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

fn parse_currency(raw: &str) -> std::result::Result<Currency, String> {
    Currency::try_from(raw).map_err(|err| err.to_string())
}

pub fn load(args: SettingsArgs) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix("MENU_PLANNER")
            .prefix_separator("_")
            .separator("__"),
    );
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(level) = args.level {
        settings.level = level;
    }
    if let Some(currency) = args.currency {
        settings.currency = currency;
    }
    if let Some(output_dir) = args.output_dir {
        settings.output_dir = output_dir;
    }

    Ok(settings)
}
