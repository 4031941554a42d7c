mod app;
mod cache;
mod config;
mod error;
mod fetcher;
mod github;
mod i18n;
mod logging;
mod state;
mod ui;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use clap::{Parser, ValueEnum};

use crate::app::App;
use crate::cache::{FileStore, KvStore, MemoryStore, SearchCache, paths};
use crate::config::{MAX_PAGE_SIZE, Settings};
use crate::error::{NavError, Result};
use crate::fetcher::Fetcher;
use crate::github::GitHubClient;
use crate::i18n::Language;

#[derive(Debug, Parser)]
#[command(author, version, about = "Browse popular AI repositories on GitHub")]
struct Cli {
    /// Initial search keyword.
    query: Option<String>,
    /// Interface language. Saved as the new default.
    #[arg(long, value_enum)]
    lang: Option<LangArg>,
    /// Results per page.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)))]
    page_size: Option<u32>,
    /// GitHub API base URL.
    #[arg(long)]
    api_base: Option<String>,
    /// Keep cached searches in memory only.
    #[arg(long)]
    no_cache: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LangArg {
    En,
    Zh,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Language::En,
            LangArg::Zh => Language::Zh,
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of saved settings.
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(lang) = self.lang {
            settings.language = lang.into();
        }
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        if let Some(api_base) = &self.api_base {
            settings.api_base = api_base.clone();
        }
        settings.normalized()
    }
}

fn open_store(no_cache: bool) -> Arc<dyn KvStore> {
    if no_cache {
        return Arc::new(MemoryStore::new());
    }
    match FileStore::open_default() {
        Some(store) => {
            tracing::info!(root = %store.root().display(), "using file cache");
            Arc::new(store)
        }
        None => {
            tracing::warn!("no cache directory available, caching in memory");
            Arc::new(MemoryStore::new())
        }
    }
}

#[tokio::main]
#[allow(clippy::collapsible_if)]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = paths::settings_path();

    let (saved, load_error) = match settings_path.as_deref().map(Settings::load) {
        Some(Ok(settings)) => (settings, None),
        Some(Err(e)) => (Settings::default(), Some(e)),
        None => (Settings::default(), None),
    };
    let settings = cli.apply(saved);

    if let Some(dir) = paths::log_dir() {
        if let Err(e) = logging::init(&dir, &settings.log_level) {
            eprintln!("warning: file logging disabled: {}", e);
        }
    }
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "could not read settings, using defaults");
    }

    if cli.lang.is_some() {
        if let Some(path) = &settings_path {
            if let Err(e) = settings.save(path) {
                tracing::warn!(path = %path.display(), error = %e, "could not save settings");
            }
        }
    }

    let client = GitHubClient::new(&settings.api_base)?;
    let cache = SearchCache::new(open_store(cli.no_cache));
    let fetcher = Arc::new(Fetcher::new(client, cache));

    let mut app = App::new(
        settings,
        settings_path,
        fetcher,
        cli.query.clone().unwrap_or_default(),
    );

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result.map_err(NavError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["ainav"]).unwrap();
        assert!(cli.query.is_none());
        assert!(!cli.no_cache);

        let settings = cli.apply(Settings::default());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides_apply_to_settings() {
        let cli = Cli::try_parse_from([
            "ainav",
            "agent",
            "--lang",
            "zh",
            "--page-size",
            "50",
            "--api-base",
            "http://localhost:8080",
            "--no-cache",
        ])
        .unwrap();

        assert_eq!(cli.query.as_deref(), Some("agent"));
        assert!(cli.no_cache);

        let settings = cli.apply(Settings::default());
        assert_eq!(settings.language, Language::Zh);
        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.api_base, "http://localhost:8080");
    }

    #[test]
    fn test_page_size_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["ainav", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["ainav", "--page-size", "101"]).is_err());
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["ainav", "--lang", "fr"]).is_err());
    }
}
