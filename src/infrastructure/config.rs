use std::env;
use std::time::Duration;

/// Knobs of the copy endpoints
#[derive(Clone, Debug)]
pub struct CopySettings {
    /// Appended to the title of a copied book
    pub book_title_suffix: String,
    /// Prepended to the name of a copied category
    pub category_name_prefix: String,
    /// Deadline for one book copy; expiry rolls the copy back
    pub timeout: Duration,
}

impl Default for CopySettings {
    fn default() -> Self {
        Self {
            book_title_suffix: " (revised)".to_string(),
            category_name_prefix: "Copy of ".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub copy: CopySettings,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = CopySettings::default();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://vocabook.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            copy: CopySettings {
                book_title_suffix: env::var("BOOK_COPY_SUFFIX")
                    .unwrap_or(defaults.book_title_suffix),
                category_name_prefix: env::var("CATEGORY_COPY_PREFIX")
                    .unwrap_or(defaults.category_name_prefix),
                timeout: env::var("COPY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
            },
        }
    }
}
