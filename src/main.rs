use anyhow::{bail, Result};
use owo_colors::OwoColorize;

use runpad::cli::Cli;
use runpad::config::Config;
use runpad::{registry, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // CLI override for the service URL, applied before loading config
    if let Some(url) = args.api_url.as_deref() {
        std::env::set_var("PISTON_API_URL", url);
    }

    let cfg = Config::load();

    if args.list_languages {
        for lang in registry::LANGUAGES {
            let version = registry::version_for(lang.name).unwrap_or("?");
            println!("{} {}", lang.name.green(), version);
        }
        return Ok(());
    }
    if args.list_themes {
        for theme in registry::THEMES {
            println!("{}", theme.name.cyan());
        }
        return Ok(());
    }

    // Resolve selections: CLI overrides config; fall back to registry defaults
    let language_name = args
        .language
        .or_else(|| cfg.get("DEFAULT_LANGUAGE"))
        .unwrap_or_else(|| registry::default_language().name.to_string());
    let theme_name = args
        .theme
        .or_else(|| cfg.get("DEFAULT_THEME"))
        .unwrap_or_else(|| registry::default_theme().name.to_string());

    let Some(language) = registry::language(&language_name) else {
        bail!("unknown language: {} (try --list-languages)", language_name);
    };
    let Some(theme) = registry::theme(&theme_name) else {
        bail!("unknown theme: {} (try --list-themes)", theme_name);
    };

    tui::run_editor(&cfg, language, theme).await
}
