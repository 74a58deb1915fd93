#[cfg(test)]
mod integration_tests {
    use crate::{
        Config, FileSink, JobOutcome, LineJob, RunCoordinator, RunnerError,
    };
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct AlwaysUp {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl LineJob for AlwaysUp {
        async fn attempt(&self, _line: &str) -> Result<JobOutcome, RunnerError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Ok(JobOutcome::Accepted { detail: "200".to_string() })
        }
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("shard-runner-it-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_file_to_result_file() {
        let dir = temp_dir();
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let input = dir.join("input.txt");
        tokio::fs::write(&input, "https://a.test/1\nbad\nhttps://a.test/2\n")
            .await
            .unwrap();

        let config = Config {
            result_dir: dir.join("result"),
            ..Default::default()
        };
        let job = Arc::new(AlwaysUp { attempts: AtomicUsize::new(0) });
        let sink = Arc::new(FileSink::new(config.result_dir.clone()));
        let coordinator = RunCoordinator::new(config, job.clone(), sink);

        let lines = crate::read_lines(&input).await.unwrap();
        coordinator.start_run(lines, 1).unwrap();
        let summary = coordinator.wait().await.unwrap();

        assert_eq!(summary.stats.skipped, 1);
        assert_eq!(job.attempts.load(Ordering::SeqCst), 2);
        assert_eq!(summary.stats.accepted, 2);

        let path = summary.result_path.expect("result file written");
        assert!(path.starts_with(dir.join("result")));
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let rows: Vec<&str> = written.lines().collect();
        assert_eq!(rows, vec!["https://a.test/1 - 200", "https://a.test/2 - 200"]);

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_every_line_processed_once_across_workers() {
        let dir = temp_dir();
        let config = Config {
            result_dir: dir.clone(),
            ..Default::default()
        };
        let job = Arc::new(AlwaysUp { attempts: AtomicUsize::new(0) });
        let sink = Arc::new(FileSink::new(dir.clone()));
        let coordinator = RunCoordinator::new(config, job.clone(), sink);

        let lines: Vec<String> = (0..53).map(|i| format!("https://host.test/{i}")).collect();
        coordinator.start_run(lines.clone(), 10).unwrap();
        let summary = coordinator.wait().await.unwrap();

        assert_eq!(job.attempts.load(Ordering::SeqCst), 53);
        let written = tokio::fs::read_to_string(summary.result_path.unwrap()).await.unwrap();
        let mut rows: Vec<String> = written.lines().map(str::to_string).collect();
        rows.sort();
        let mut expected: Vec<String> = lines.iter().map(|l| format!("{l} - 200")).collect();
        expected.sort();
        assert_eq!(rows, expected);

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }
}
