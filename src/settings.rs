use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const DEFAULT_BOOK_TITLE: &str =
    "Emergency Care and Transportation of the Sick and Injured 12th Edition";

/// Runtime settings: built-in defaults overridable through `STUDY_*`
/// environment variables (e.g. `STUDY_OUT_DIR=artifacts`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Constant label attached to every record at normalization time.
    pub book_title: String,
    /// Number of chapters in the book, for coverage reporting.
    pub chapter_count: u32,
    /// Default seed files scanned by `recover`.
    pub seed_sources: Vec<String>,
    /// Directory artifacts are written to.
    pub out_dir: String,
    /// Base URL for the API smoke test.
    pub api_base: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let cfg = Config::builder()
            .set_default("book_title", DEFAULT_BOOK_TITLE)?
            .set_default("chapter_count", 41)?
            .set_default(
                "seed_sources",
                vec![
                    "server/seed-missing-chapters.ts".to_string(),
                    "server/seed-remaining-chapters.ts".to_string(),
                ],
            )?
            .set_default("out_dir", "recovered")?
            .set_default("api_base", "http://localhost:3000/api")?
            .add_source(
                Environment::with_prefix("STUDY")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("seed_sources"),
            )
            .build()
            .context("failed to build settings")?;

        cfg.try_deserialize().context("invalid settings")
    }
}
