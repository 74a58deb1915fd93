use crate::RunnerError;
use async_trait::async_trait;
use chrono::Local;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Destination for the accepted lines of a finished run.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn persist(&self, lines: &[String]) -> Result<Option<PathBuf>, RunnerError>;
}

/// Writes `<dir>/<YYYY-MM-DD-HH-MM>.txt`, one accepted line per row.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_name() -> String {
        format!("{}.txt", Local::now().format("%Y-%m-%d-%H-%M"))
    }
}

#[async_trait]
impl ResultSink for FileSink {
    async fn persist(&self, lines: &[String]) -> Result<Option<PathBuf>, RunnerError> {
        if lines.is_empty() {
            return Ok(None);
        }

        fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(Self::file_name());

        let mut body = lines.join("\n");
        body.push('\n');
        fs::write(&path, body).await?;

        info!("Saved {} results at {}", lines.len(), path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("shard-runner-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_file_sink_writes_lines() {
        let dir = temp_dir();
        let sink = FileSink::new(dir.join("result"));
        let path = sink
            .persist(&["a - 1".to_string(), "b - 2".to_string()])
            .await
            .unwrap()
            .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(name.len(), "2026-01-01-00-00.txt".len());
        assert!(name.ends_with(".txt"));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "a - 1\nb - 2\n");

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }

    #[test]
    fn test_file_sink_skips_empty() {
        let dir = temp_dir();
        let sink = FileSink::new(&dir);
        assert!(tokio_test::block_on(sink.persist(&[])).unwrap().is_none());
        assert!(!dir.exists());
    }
}
