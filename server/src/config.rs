use anyhow::{Result, anyhow};
use platform_db::DatabaseSettings;
use products_hr::DEFAULT_PHOTO_FOLDER;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub sheet_name: String,
    pub photo_folder: String,
    pub public_base_url: String,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let sheet_name = env_or("ROSTER_SHEET", "Employees");
        if sheet_name.trim().is_empty() {
            return Err(anyhow!("ROSTER_SHEET must not be empty"));
        }
        let photo_folder = env_or("PHOTO_FOLDER", DEFAULT_PHOTO_FOLDER);
        let public_base_url = env_or("PUBLIC_BASE_URL", "http://localhost:8080")
            .trim_end_matches('/')
            .to_string();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            database: DatabaseSettings::from_env(),
            sheet_name,
            photo_folder,
            public_base_url,
            cors_allowed_origins,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
