//! Configuration loading tests

#[cfg(test)]
mod tests {
    use clap::Parser;
    use items_rs::config::{Config, LogFormat, ServerArgs, StorageBackend};
    use std::io::Write;
    use std::time::Duration;

    const SAMPLE: &str = r#"
server:
  host: 127.0.0.1
  port: 9090
storage:
  backend: database
  database:
    url: "sqlite::memory:"
batch:
  concurrency: 4
  max_retries: 2
  retry_delay_ms: 25
logging:
  level: debug
  format: json
"#;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.server.address(), "127.0.0.1:9090");
        assert_eq!(config.storage.backend, StorageBackend::Database);
        assert!(config.storage.database.is_in_memory());
        assert_eq!(config.batch.concurrency, 4);
        assert_eq!(config.batch.max_retries, 2);
        assert_eq!(config.batch.retry_delay(), Duration::from_millis(25));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config::from_yaml(SAMPLE).unwrap();
        let args = ServerArgs::parse_from(["items-server", "--port", "7000", "--storage", "memory"]);
        args.apply_to(&mut config);

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.batch.concurrency, 4);
    }

    #[test]
    fn test_yaml_roundtrip_keeps_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.batch.concurrency, 10);
        assert_eq!(parsed.batch.max_retries, 0);
        assert_eq!(parsed.server.port, 8080);
    }
}
