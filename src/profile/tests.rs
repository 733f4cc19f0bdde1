use tempfile::tempdir;

use crate::render::DisplayMode;
use crate::segment::ModelKind;

use super::{ProfileError, ProfileStore, Settings, sanitize_profile_name};

#[test]
fn sanitize_collapses_whitespace_and_drops_specials() {
    assert_eq!(
        sanitize_profile_name("My Model!").as_deref(),
        Some("My_Model")
    );
    assert_eq!(
        sanitize_profile_name("  spaced   out  ").as_deref(),
        Some("spaced_out")
    );
    assert_eq!(sanitize_profile_name("v1.2-final").as_deref(), Some("v1.2-final"));
}

#[test]
fn sanitize_defuses_path_traversal() {
    assert_eq!(
        sanitize_profile_name("../../etc/passwd").as_deref(),
        Some("etcpasswd")
    );
    assert_eq!(sanitize_profile_name("..").as_deref(), None);
}

#[test]
fn sanitize_rejects_names_with_nothing_usable() {
    assert_eq!(sanitize_profile_name(""), None);
    assert_eq!(sanitize_profile_name("???"), None);
    assert_eq!(sanitize_profile_name("._."), None);
}

#[test]
fn save_returns_the_sanitized_name() {
    let dir = tempdir().expect("tempdir");
    let store = ProfileStore::with_dir(dir.path());
    let name = store
        .save("My Model!", &Settings::default())
        .expect("save");
    assert_eq!(name, "My_Model");
    assert!(dir.path().join("My_Model.json").exists());
}

#[test]
fn save_rejects_unusable_names() {
    let dir = tempdir().expect("tempdir");
    let store = ProfileStore::with_dir(dir.path());
    assert!(matches!(
        store.save("???", &Settings::default()),
        Err(ProfileError::InvalidName)
    ));
}

#[test]
fn saved_profiles_round_trip() {
    let dir = tempdir().expect("tempdir");
    let store = ProfileStore::with_dir(dir.path());
    let settings = Settings {
        model_type: ModelKind::Nuclei,
        diameter: 17.0,
        flow_threshold: 0.25,
        display_channel: DisplayMode::Green,
        seg_channel1: 2,
        seg_channel2: 3,
        cmap: "viridis".to_string(),
    };

    store.save("nuclei-run", &settings).expect("save");
    let restored = store.load("nuclei-run").expect("load");
    assert_eq!(restored, settings);
}

#[test]
fn list_is_sorted_and_tolerates_a_missing_directory() {
    let dir = tempdir().expect("tempdir");
    let store = ProfileStore::with_dir(dir.path().join("nowhere"));
    assert!(store.list().is_empty());

    let store = ProfileStore::with_dir(dir.path());
    store.save("beta", &Settings::default()).expect("save");
    store.save("alpha", &Settings::default()).expect("save");
    assert_eq!(store.list(), vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn resaving_a_name_overwrites_the_profile() {
    let dir = tempdir().expect("tempdir");
    let store = ProfileStore::with_dir(dir.path());
    store.save("run", &Settings::default()).expect("save");

    let mut updated = Settings::default();
    updated.diameter = 55.0;
    store.save("run", &updated).expect("resave");
    let restored = store.load("run").expect("load");
    assert_eq!(restored.diameter, 55.0);
}

#[test]
fn load_reports_missing_profiles() {
    let dir = tempdir().expect("tempdir");
    let store = ProfileStore::with_dir(dir.path());
    let err = store.load("ghost").expect_err("must fail");
    assert!(matches!(err, ProfileError::NotFound(_)));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn load_rejects_malformed_json() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("broken.json"), "{ not json").expect("write");
    let store = ProfileStore::with_dir(dir.path());
    assert!(matches!(
        store.load("broken"),
        Err(ProfileError::Parse(_))
    ));
}

#[test]
fn load_rejects_out_of_range_settings() {
    let dir = tempdir().expect("tempdir");
    let body = serde_json::json!({
        "model_type": "cyto3",
        "diameter": 500.0,
        "flow_threshold": 0.4,
        "display_channel": "RGB",
        "seg_channel1": 0,
        "seg_channel2": 0,
        "cmap": "tab20b",
    });
    std::fs::write(
        dir.path().join("huge.json"),
        serde_json::to_string_pretty(&body).expect("serialize"),
    )
    .expect("write");

    let store = ProfileStore::with_dir(dir.path());
    let err = store.load("huge").expect_err("must fail");
    assert!(matches!(err, ProfileError::Validation(_)));
    assert!(err.to_string().contains("diameter"));
}

#[test]
fn load_rejects_unknown_colormaps() {
    let dir = tempdir().expect("tempdir");
    let mut settings = Settings::default();
    settings.cmap = "tab20b".to_string();
    let store = ProfileStore::with_dir(dir.path());
    store.save("ok", &settings).expect("save");

    // corrupt the stored colormap behind the store's back
    let path = dir.path().join("ok.json");
    let body = std::fs::read_to_string(&path)
        .expect("read")
        .replace("tab20b", "neon");
    std::fs::write(&path, body).expect("write");

    assert!(matches!(
        store.load("ok"),
        Err(ProfileError::Validation(_))
    ));
}

#[test]
fn settings_summary_lists_every_field() {
    let summary = Settings::default().summary();
    assert_eq!(
        summary,
        "Model: cyto3, Diameter: 30, Flow Threshold: 0.4, Display: RGB, Seg Ch1: 0, Seg Ch2: 0, Colormap: tab20b"
    );
}

#[test]
fn settings_map_onto_segmentation_params() {
    let settings = Settings {
        seg_channel1: 2,
        seg_channel2: 1,
        ..Settings::default()
    };
    let params = settings.segment_params();
    assert_eq!(params.channels, [2, 1]);
    assert_eq!(params.diameter, Some(30.0));
    assert_eq!(params.model, ModelKind::Cyto3);
}
