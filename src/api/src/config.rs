use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_host: String,
    pub http_port: u16,
    pub wordlist_path: PathBuf,
    pub allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            http_port: 3001,
            wordlist_path: PathBuf::from("wordlist"),
            allowed_origins: vec!["http://localhost:8080".to_string()],
            request_timeout: Duration::from_secs(30),
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by whatever is set in the environment. Values
    /// that fail to parse keep their default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }

        if let Ok(port) = env::var("HTTP_PORT") {
            if let Ok(value) = port.parse::<u16>() {
                config.http_port = value;
            }
        }

        if let Ok(path) = env::var("WORDLIST_PATH") {
            config.wordlist_path = PathBuf::from(path);
        }

        if let Ok(origins) = env::var("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins);
        }

        if let Ok(timeout) = env::var("REQUEST_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(size) = env::var("MAX_REQUEST_SIZE") {
            if let Ok(bytes) = size.parse::<usize>() {
                config.max_request_size = bytes;
            }
        }

        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.http_port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
