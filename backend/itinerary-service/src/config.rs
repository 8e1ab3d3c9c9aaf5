/// Configuration management for Itinerary Service
///
/// Values come from environment variables (a local `.env` file is read
/// first). Every field has a default, so an empty environment starts a
/// development server on port 5000 with artifacts under `models/`.
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application environment (development, staging, production)
    #[serde(default = "default_app_env")]
    pub app_env: String,
    /// Server host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
    /// HTTP worker threads, actix picks one per core when unset
    #[serde(default)]
    pub workers: Option<usize>,
    /// Comma-separated list of allowed origins
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
    /// Fitted TF-IDF vectorizer artifact
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: String,
    /// Fitted decision tree artifact
    #[serde(default = "default_classifier_path")]
    pub classifier_path: String,
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_allowed_origins() -> String {
    "*".to_string()
}

fn default_vectorizer_path() -> String {
    "models/tfidf_vectorizer.json".to_string()
}

fn default_classifier_path() -> String {
    "models/decision_tree_model.json".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn allowed_origins(&self) -> impl Iterator<Item = &str> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, envy::Error> {
        envy::from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.app_env, "development");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.workers, None);
        assert_eq!(config.vectorizer_path, "models/tfidf_vectorizer.json");
        assert_eq!(config.classifier_path, "models/decision_tree_model.json");
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("APP_ENV", "Production"),
            ("PORT", "8088"),
            ("WORKERS", "4"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("VECTORIZER_PATH", "/srv/models/v.json"),
        ])
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.port, 8088);
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.vectorizer_path, "/srv/models/v.json");
        assert_eq!(
            config.allowed_origins().collect::<Vec<_>>(),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(from_pairs(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        env::set_var("CLASSIFIER_PATH", "/tmp/tree.json");
        let config = Config::from_env().unwrap();
        env::remove_var("CLASSIFIER_PATH");

        assert_eq!(config.classifier_path, "/tmp/tree.json");
    }
}
