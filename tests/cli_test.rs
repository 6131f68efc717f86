//! End-to-end runs of the maintenance CLI against an on-disk store.

use std::path::Path;

use clap::Parser;
use cv_core::PhotoStoreConfig;
use cvphoto::bootstrap::build_photo_service;
use cvphoto::cli::{run, Cli, EXIT_NOT_FOUND};

async fn exec(config: &PhotoStoreConfig, args: &[&str]) -> (u8, String) {
    let cli = Cli::try_parse_from(std::iter::once("cvphoto").chain(args.iter().copied())).unwrap();
    let service = build_photo_service(config).unwrap();
    let mut out = Vec::new();
    let status = run(cli.command, &service, &mut out).await.unwrap();
    service.close_connection();
    (status, String::from_utf8(out).unwrap())
}

fn write_jpeg(dir: &Path, name: &str, len: usize) -> String {
    let path = dir.join(name);
    let mut bytes = vec![0u8; len];
    bytes[..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
    std::fs::write(&path, bytes).unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn store_get_and_list_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = PhotoStoreConfig::with_system_defaults(dir.path().join("data"));
    let file = write_jpeg(dir.path(), "me.jpg", 2048);

    let (status, stdout) = exec(&config, &["store", &file, "--cv", "cv1"]).await;
    assert_eq!(status, 0);
    let id = stdout.trim().to_string();
    assert!(id.starts_with("photo_cv1_"));

    let out_path = dir.path().join("copy.jpg");
    let (status, _) = exec(
        &config,
        &["get", &id, "--out", out_path.to_str().unwrap()],
    )
    .await;
    assert_eq!(status, 0);
    assert_eq!(std::fs::read(&out_path).unwrap().len(), 2048);

    let (_, listing) = exec(&config, &["list", "--cv", "cv1"]).await;
    let listed: serde_json::Value = serde_json::from_str(&listing).unwrap();
    assert_eq!(listed[0]["id"], serde_json::Value::String(id));
    assert_eq!(listed[0]["cv_id"], "cv1");
}

#[tokio::test]
async fn get_of_missing_photo_exits_with_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = PhotoStoreConfig::with_system_defaults(dir.path().to_path_buf());
    let out_path = dir.path().join("never.jpg");

    let (status, _) = exec(
        &config,
        &["get", "photo_missing", "--out", out_path.to_str().unwrap()],
    )
    .await;

    assert_eq!(status, EXIT_NOT_FOUND);
    assert!(!out_path.exists());
}

#[tokio::test]
async fn cleanup_and_delete_by_cv_report_counts() {
    let dir = tempfile::tempdir().unwrap();
    let config = PhotoStoreConfig::with_system_defaults(dir.path().to_path_buf());
    let file = write_jpeg(dir.path(), "a.jpg", 16);

    for cv in ["cv1", "cv1", "cv2", "temp"] {
        exec(&config, &["store", &file, "--cv", cv]).await;
    }

    let (_, report) = exec(&config, &["cleanup", "--keep", "cv1"]).await;
    let report: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(report["cleaned"], 1);
    assert_eq!(report["errors"].as_array().unwrap().len(), 0);

    let (_, deleted) = exec(&config, &["delete", "--cv", "cv1"]).await;
    let deleted: serde_json::Value = serde_json::from_str(&deleted).unwrap();
    assert_eq!(deleted["deleted"], 2);

    let (_, listing) = exec(&config, &["list"]).await;
    let listed: serde_json::Value = serde_json::from_str(&listing).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["cv_id"], "temp");
}

#[tokio::test]
async fn info_reports_usage_against_quota() {
    let dir = tempfile::tempdir().unwrap();
    let config = PhotoStoreConfig::with_system_defaults(dir.path().to_path_buf());
    let file = write_jpeg(dir.path(), "a.jpg", 4096);
    exec(&config, &["store", &file, "--cv", "cv1"]).await;

    let (_, info) = exec(&config, &["info"]).await;
    let info: serde_json::Value = serde_json::from_str(&info).unwrap();

    assert_eq!(info["available"], true);
    let used = info["storage"]["used"].as_u64().unwrap();
    let available = info["storage"]["available"].as_u64().unwrap();
    assert!(used >= 4096);
    assert_eq!(used + available, config.quota_bytes);
    assert_eq!(info["cache"]["max_size"], 50);
}

#[tokio::test]
async fn delete_by_id_counts_only_existing_photos() {
    let dir = tempfile::tempdir().unwrap();
    let config = PhotoStoreConfig::with_system_defaults(dir.path().to_path_buf());
    let file = write_jpeg(dir.path(), "a.jpg", 16);
    let (_, stored) = exec(&config, &["store", &file, "--cv", "cv1"]).await;
    let id = stored.trim().to_string();

    let (status, first) = exec(&config, &["delete", &id]).await;
    assert_eq!(status, 0);
    let first: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(first["deleted"], 1);

    let (status, again) = exec(&config, &["delete", &id]).await;
    assert_eq!(status, 0);
    let again: serde_json::Value = serde_json::from_str(&again).unwrap();
    assert_eq!(again["deleted"], 0);
}

#[test]
fn delete_requires_an_id_or_cv() {
    assert!(Cli::try_parse_from(["cvphoto", "delete"]).is_err());
    assert!(Cli::try_parse_from(["cvphoto", "delete", "p1", "--cv", "cv1"]).is_err());
    assert!(Cli::try_parse_from(["cvphoto", "--config", "x.toml", "delete", "p1"]).is_ok());
}
