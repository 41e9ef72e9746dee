use super::*;
use chrono::TimeZone;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_default_report_name_is_time_stamped() {
    let now = Local.with_ymd_and_hms(2024, 1, 31, 23, 59, 58).unwrap();

    assert_eq!(
        default_report_name("WebhookReport", now),
        "WebhookReport-20240131235958.csv"
    );
    assert_eq!(
        default_report_name("BranchRulesReport", now),
        "BranchRulesReport-20240131235958.csv"
    );
}

#[test]
fn test_report_path_prefers_output_file() {
    let explicit = PathBuf::from("out.csv");

    assert_eq!(report_path(Some(&explicit), "WebhookReport"), explicit);

    let generated = report_path(None, "WebhookReport");
    let name = generated.to_str().unwrap();
    assert!(name.starts_with("WebhookReport-"));
    assert!(name.ends_with(".csv"));
}

#[test]
fn test_hostname_flag_overrides_config() {
    let config = AppConfig::default();
    let mut args = ConnectionArgs::default();

    assert_eq!(args.hostname(&config), "github.com");

    args.hostname = Some("ghes.example.com".to_string());
    assert_eq!(args.hostname(&config), "ghes.example.com");
}

#[tokio::test]
async fn test_connect_with_explicit_token() {
    let client = connect("ghes.example.com", Some("test-token"), "hookrule_test").unwrap();

    assert_eq!(client.endpoints().base_uri(), "https://ghes.example.com");
}

#[test]
fn test_connect_rejects_invalid_host() {
    let result = connect("", Some("test-token"), "hookrule_test");

    assert!(matches!(
        result,
        Err(Error::GitHub(github_client::Error::InvalidHost(_)))
    ));
}

#[test]
fn test_create_report_file_truncates_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("report.csv");
    std::fs::write(&path, "old content that is longer than the new one").unwrap();

    let mut writer = create_report_file(&path).unwrap();
    writer.write_all(b"new").unwrap();
    drop(writer);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
}

#[test]
fn test_create_report_file_in_missing_directory_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("missing").join("report.csv");

    assert!(matches!(
        create_report_file(&path),
        Err(Error::CreateFile(_))
    ));
}

#[test]
fn test_open_missing_input_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    assert!(matches!(
        open_input_file(&temp_dir.path().join("missing.csv")),
        Err(Error::LoadFile(_))
    ));
}
