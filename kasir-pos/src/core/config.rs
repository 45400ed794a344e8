use std::path::PathBuf;
use std::time::Duration;

use kasir_printer::ChunkConfig;

/// Till configuration
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | Database and logs |
/// | ENVIRONMENT | development | development \| production |
/// | LOG_LEVEL | info | Console log level |
/// | LOG_JSON | false | JSON log lines |
/// | PRINTER_ADDR | (unset) | Receipt printer host:port |
/// | PRINT_CHUNK_SIZE | 100 | Bytes per printer write |
/// | PRINT_CHUNK_DELAY_MS | 50 | Pause between writes |
/// | PRINT_CHUNK_TIMEOUT_MS | (unset) | Per-write timeout |
/// | PRINT_CONNECT_TIMEOUT_MS | 5000 | Printer connect timeout |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/kasir PRINTER_ADDR=192.168.1.50:9100 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub printer_addr: Option<String>,
    pub print_chunk_size: usize,
    pub print_chunk_delay_ms: u64,
    pub print_chunk_timeout_ms: Option<u64>,
    pub print_connect_timeout_ms: u64,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            printer_addr: std::env::var("PRINTER_ADDR")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            print_chunk_size: env_parse("PRINT_CHUNK_SIZE")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(kasir_printer::DEFAULT_CHUNK_SIZE),
            print_chunk_delay_ms: env_parse("PRINT_CHUNK_DELAY_MS").unwrap_or(50),
            print_chunk_timeout_ms: env_parse("PRINT_CHUNK_TIMEOUT_MS"),
            print_connect_timeout_ms: env_parse("PRINT_CONNECT_TIMEOUT_MS").unwrap_or(5000),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("kasir.redb")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig::default()
            .with_chunk_size(self.print_chunk_size)
            .with_delay(Duration::from_millis(self.print_chunk_delay_ms))
            .with_timeout(self.print_chunk_timeout_ms.map(Duration::from_millis))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.print_connect_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(work_dir: &str) -> Config {
        Config {
            work_dir: work_dir.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_paths_under_work_dir() {
        let config = config_in("/tmp/kasir");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/kasir/kasir.redb"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/kasir/logs"));
    }

    #[test]
    fn test_chunk_config_from_fields() {
        let mut config = config_in("/tmp/kasir");
        config.print_chunk_size = 20;
        config.print_chunk_delay_ms = 10;
        config.print_chunk_timeout_ms = Some(250);

        let chunk = config.chunk_config();
        assert_eq!(chunk.chunk_size, 20);
        assert_eq!(chunk.inter_chunk_delay, Duration::from_millis(10));
        assert_eq!(chunk.chunk_timeout, Some(Duration::from_millis(250)));
    }
}
