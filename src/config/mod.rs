//! Application configuration loaded from the environment at startup.
//!
//! The configuration is built once in `main` and handed to the services that
//! need it; nothing reads environment variables after startup.

use std::env;
use std::io;
use std::path::PathBuf;

/// Settings for photo uploads, injected into the file service.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory where uploaded photos are written.
    pub upload_path: PathBuf,
    /// Maximum accepted upload size in bytes.
    pub max_file_size: usize,
}

/// Settings for the geocoding provider.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub upload: UploadConfig,
    pub geocoder: GeocoderConfig,
}

impl Config {
    /// Load configuration from process environment variables (and `.env`).
    pub fn from_env() -> io::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_host: var("SERVER_HOST", "127.0.0.1"),
            server_port: parse_number("SERVER_PORT", &var("SERVER_PORT", "5000"))?,
            mongodb_uri: var("MONGODB_URI", "mongodb://localhost:27017"),
            database_name: var("DATABASE_NAME", "devcamper"),
            jwt_secret: var("JWT_SECRET", "change-this-jwt-secret-in-production"),
            upload: UploadConfig {
                upload_path: PathBuf::from(var("FILE_UPLOAD_PATH", "./public/uploads")),
                max_file_size: parse_number("MAX_FILE_UPLOAD", &var("MAX_FILE_UPLOAD", "1000000"))?,
            },
            geocoder: GeocoderConfig {
                base_url: var("GEOCODER_URL", "http://www.mapquestapi.com/geocoding/v1"),
                api_key: var("GEOCODER_API_KEY", ""),
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> io::Result<T> {
    raw.trim().parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} must be a valid number, got '{}'", key, raw),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.database_name, "devcamper");
        assert_eq!(config.upload.max_file_size, 1_000_000);
        assert_eq!(config.upload.upload_path, PathBuf::from("./public/uploads"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PORT", "8080"),
            ("MAX_FILE_UPLOAD", "2048"),
            ("FILE_UPLOAD_PATH", "/tmp/photos"),
            ("GEOCODER_API_KEY", "abc"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.upload.max_file_size, 2048);
        assert_eq!(config.upload.upload_path, PathBuf::from("/tmp/photos"));
        assert_eq!(config.geocoder.api_key, "abc");
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("MAX_FILE_UPLOAD", "lots")])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("MAX_FILE_UPLOAD"));
    }
}
