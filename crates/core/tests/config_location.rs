use std::env;
use std::fs;
use std::path::Path;

use anne_core::{load_config, read_store, submit_annotation, AnneError, CONFIG_ENV};

fn write_config(path: &Path, data_path: &str) {
    fs::write(
        path,
        format!(
            "dataPath: {data_path:?}\ncolumns:\n  left: prompt\n  right: completion\nlabels:\n  left: Prompt\n  right: Completion\nannotationColumn: verdict\n"
        ),
    )
    .unwrap();
}

// Mutates the environment and working directory; keep it the only test here.
#[test]
fn config_resolves_from_env_then_working_directory() {
    let original_dir = env::current_dir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("pairs.jsonl");
    fs::write(&data, "{\"prompt\":\"a\",\"completion\":\"b\"}\n").unwrap();

    let elsewhere = dir.path().join("settings.yaml");
    write_config(&elsewhere, &data.display().to_string());
    env::set_var(CONFIG_ENV, &elsewhere);
    let config = load_config().unwrap();
    assert_eq!(config.data_path(), data.as_path());
    let ack = submit_annotation("0", "fine").unwrap();
    assert_eq!(ack.total, 1);
    assert_eq!(
        read_store(&data).unwrap()[0].text("verdict").as_deref(),
        Some("fine")
    );
    env::remove_var(CONFIG_ENV);

    env::set_current_dir(dir.path()).unwrap();
    let missing = load_config().unwrap_err();
    write_config(&dir.path().join("config.yaml"), "pairs.jsonl");
    let config = load_config();
    let ack = submit_annotation("0", "redo");
    env::set_current_dir(&original_dir).unwrap();

    assert!(matches!(missing, AnneError::ConfigNotFound { .. }));
    assert_eq!(config.unwrap().data_path(), Path::new("pairs.jsonl"));
    assert_eq!(ack.unwrap().index, 0);
    assert_eq!(
        read_store(&data).unwrap()[0].text("verdict").as_deref(),
        Some("redo")
    );
}
