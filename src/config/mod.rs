use std::env;

/// Application configuration loaded from environment variables. Every
/// variable has a default so the server runs out of the box against the
/// bundled dataset.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            dataset_path: env::var("DATASET_PATH")
                .unwrap_or_else(|_| "data/dataset.json".to_string()),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }
}
