use etabot::assets::{parse_image_csv, AssetStore};
use etabot::error::ConfigError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_image_list() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "url").unwrap();
    writeln!(file, "https://i.groupme.com/one.jpeg").unwrap();
    writeln!(file, "https://i.groupme.com/two.jpeg,extra,columns").unwrap();

    let store = AssetStore::load(&file.path().to_string_lossy()).unwrap();
    assert_eq!(store.len(), 2);
    assert!(!store.is_empty());
    assert_eq!(store.urls()[1], "https://i.groupme.com/two.jpeg");
}

#[test]
fn test_load_empty_list_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "url,name").unwrap();
    let err = AssetStore::load(&file.path().to_string_lossy()).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyAssetList(_)));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    let err = AssetStore::load(&path.to_string_lossy()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_parse_ignores_non_urls() {
    let urls = parse_image_csv("ftp://nope\n  https://ok.example/x.png  \nname\n");
    assert_eq!(urls, vec!["https://ok.example/x.png".to_string()]);
}

#[test]
fn test_every_entry_reachable() {
    let store = AssetStore::from_urls(vec![
        "https://a.example/1".to_string(),
        "https://a.example/2".to_string(),
        "https://a.example/3".to_string(),
    ])
    .unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..300 {
        seen.insert(store.random_image_url(&mut rng).to_string());
    }
    assert_eq!(seen.len(), 3);
}
