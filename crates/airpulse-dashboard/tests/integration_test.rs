//! End-to-end render passes against a temporary output directory.

use airpulse_common::test_utils::{create_temp_dir, tweet_fixtures};
use airpulse_common::{DashboardError, Result, Sentiment};
use airpulse_config::Config;
use airpulse_dashboard::{
    AvatarOutcome, Dashboard, ImageFetcher, PanelId, PanelOutcome, AVATAR_FILE_NAME,
    SUMMARY_FILE_NAME,
};
use airpulse_data::{EXPORT_FILE_NAME, PREVIEW_FILE_NAME};
use airpulse_graphs::encode_rgb_png;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Serves fixed bytes, or fails when `bytes` is `None`.
struct StaticFetcher {
    bytes: Option<Vec<u8>>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ImageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str, _timeout: Duration) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bytes
            .clone()
            .ok_or_else(|| DashboardError::network("Connection failed"))
    }
}

fn fetcher(bytes: Option<Vec<u8>>) -> (Box<dyn ImageFetcher>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = StaticFetcher {
        bytes,
        calls: Arc::clone(&calls),
    };
    (Box::new(fetcher), calls)
}

fn avatar_png() -> Vec<u8> {
    encode_rgb_png(&[200u8; 4 * 4 * 3], 4, 4).unwrap()
}

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.data.csv_path = tweet_fixtures::write_csv(dir, tweet_fixtures::sample_csv());
    config.dashboard.output_dir = dir.join("out");
    config
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 2, day).unwrap()
}

#[tokio::test]
async fn test_full_pass_writes_every_panel() {
    let dir = create_temp_dir();
    let config = config_in(dir.path());
    let out = config.dashboard.output_dir.clone();
    let (fetcher, calls) = fetcher(Some(avatar_png()));

    let mut dashboard = Dashboard::with_fetcher(config, None, fetcher);
    let summary = dashboard.run_pass().await.unwrap();

    assert_eq!(summary.rows_loaded, tweet_fixtures::SAMPLE_ROWS);
    assert_eq!(summary.rows_in_range, Some(tweet_fixtures::SAMPLE_ROWS));
    assert_eq!(summary.language, "en-US");
    assert_eq!(summary.panels.len(), 5);
    for panel in &summary.panels {
        match &panel.outcome {
            PanelOutcome::Chart { file } => assert!(out.join(file).exists(), "{file} missing"),
            // Rasterizing text needs system fonts.
            PanelOutcome::Warning { message } => assert!(message.starts_with("Could not draw this panel")),
            PanelOutcome::Notice { message } => panic!("unexpected notice on {:?}: {message}", panel.id),
        }
    }

    let geo = summary.panel(PanelId::Geo).unwrap();
    assert_eq!(geo.title, "Tweet Locations (9:00 - 17:00)");
    assert_eq!(geo.subtitle.as_deref(), Some("5 tweets found"));

    let csv = std::fs::read_to_string(out.join(EXPORT_FILE_NAME)).unwrap();
    assert_eq!(csv.lines().count(), tweet_fixtures::SAMPLE_ROWS + 1);
    assert!(!out.join(PREVIEW_FILE_NAME).exists());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let avatar = image::open(out.join(AVATAR_FILE_NAME)).unwrap();
    assert_eq!((avatar.width(), avatar.height()), (4, 4));
    assert!(out.join(SUMMARY_FILE_NAME).exists());
}

#[tokio::test]
async fn test_invalid_date_range_warns_everywhere() {
    let dir = create_temp_dir();
    let mut config = config_in(dir.path());
    config.controls.date_range = Some(vec![date(21)]);
    let out = config.dashboard.output_dir.clone();
    let (fetcher, _) = fetcher(Some(avatar_png()));

    let mut dashboard = Dashboard::with_fetcher(config, None, fetcher);
    let summary = dashboard.run_pass().await.unwrap();

    assert!(summary.date_range.is_none());
    let warning = summary.date_warning.clone().unwrap();
    assert!(warning.starts_with("Please select a date range"));
    for panel in &summary.panels {
        assert_eq!(panel.outcome, PanelOutcome::Warning { message: warning.clone() });
    }
    assert!(summary.exports.is_empty());
    assert!(!out.join(EXPORT_FILE_NAME).exists());
    // The avatar does not depend on the data.
    assert!(out.join(AVATAR_FILE_NAME).exists());
}

#[tokio::test]
async fn test_narrow_selection_with_preview() {
    let dir = create_temp_dir();
    let mut config = config_in(dir.path());
    config.controls.date_range = Some(vec![date(20), date(20)]);
    config.controls.hour_range = (13, 13);
    config.controls.show_raw_preview = true;
    config.controls.word_cloud.sentiment = Sentiment::Negative;
    let out = config.dashboard.output_dir.clone();
    let (fetcher, _) = fetcher(None);

    let mut dashboard = Dashboard::with_fetcher(config, None, fetcher);
    let summary = dashboard.run_pass().await.unwrap();

    assert_eq!(summary.rows_in_range, Some(3));
    assert_eq!(summary.preview_rows, Some(1));
    assert_eq!(summary.exports, vec![EXPORT_FILE_NAME.to_string(), PREVIEW_FILE_NAME.to_string()]);

    let preview = std::fs::read_to_string(out.join(PREVIEW_FILE_NAME)).unwrap();
    assert_eq!(preview.lines().count(), 2);
    assert!(preview.contains("great crew"));

    assert_eq!(
        summary.panel(PanelId::Geo).unwrap().outcome,
        PanelOutcome::Notice {
            message: "None of the tweets in this window carry a location.".to_string()
        }
    );
    assert_eq!(
        summary.avatar.outcome,
        AvatarOutcome::Warning {
            message: "Error loading image: Network error: Connection failed".to_string()
        }
    );
    assert!(!out.join(AVATAR_FILE_NAME).exists());
}

#[tokio::test]
async fn test_no_airlines_selected() {
    let dir = create_temp_dir();
    let mut config = config_in(dir.path());
    config.controls.airlines.clear();
    config.dashboard.avatar.enabled = false;
    let (fetcher, calls) = fetcher(Some(vec![1]));

    let mut dashboard = Dashboard::with_fetcher(config, None, fetcher);
    let summary = dashboard.run_pass().await.unwrap();

    assert_eq!(
        summary.panel(PanelId::Comparison).unwrap().outcome,
        PanelOutcome::Notice {
            message: "Please select at least one airline".to_string()
        }
    );
    assert_eq!(summary.avatar.outcome, AvatarOutcome::Disabled);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_csv_fails_the_pass() {
    let dir = create_temp_dir();
    let mut config = config_in(dir.path());
    config.data.csv_path = dir.path().join("absent.csv");
    let (fetcher, _) = fetcher(None);

    let mut dashboard = Dashboard::with_fetcher(config, None, fetcher);
    let err = dashboard.run_pass().await.unwrap_err();
    assert!(matches!(err, DashboardError::DataLoad(_)), "got {err:?}");
}

#[tokio::test]
async fn test_reload_rerenders_with_new_controls() {
    let dir = TempDir::new().unwrap();
    let csv = tweet_fixtures::write_csv(dir.path(), tweet_fixtures::sample_csv());
    let out = dir.path().join("out");
    let config_path = dir.path().join("airpulse.yaml");

    let yaml = |preview: bool| {
        format!(
            "data:\n  csv_path: {csv:?}\ndashboard:\n  output_dir: {out:?}\n  avatar:\n    enabled: false\ncontrols:\n  show_raw_preview: {preview}\n",
            csv = csv.display().to_string(),
            out = out.display().to_string(),
        )
    };
    std::fs::write(&config_path, yaml(false)).unwrap();
    let config = airpulse_config::ConfigLoader::load_config(&config_path).unwrap();

    let (fetcher, _) = fetcher(None);
    let mut dashboard = Dashboard::with_fetcher(config, Some(config_path.clone()), fetcher);
    let first = dashboard.run_pass().await.unwrap();
    assert_eq!(first.revision, 1);
    assert_eq!(first.preview_rows, None);

    assert!(!dashboard.reload(&config_path).unwrap());

    std::fs::write(&config_path, yaml(true)).unwrap();
    assert!(dashboard.reload(&config_path).unwrap());
    let second = dashboard.run_pass().await.unwrap();
    assert_eq!(second.revision, 2);
    assert_eq!(second.preview_rows, Some(5));
    assert_ne!(first.pass_id, second.pass_id);

    std::fs::write(&config_path, "controls:\n  hour_range: [20, 3]\n").unwrap();
    assert!(dashboard.reload(&config_path).is_err());
    assert_eq!(dashboard.revision(), 2);
}
