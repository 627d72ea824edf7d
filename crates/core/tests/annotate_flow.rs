use std::fs;
use std::path::Path;

use anne_core::{read_store, AnneError, Annotator};

fn write_config(dir: &Path, data: &Path, annotation_column: &str) -> std::path::PathBuf {
    let config = dir.join("config.yaml");
    fs::write(
        &config,
        format!(
            "dataPath: {:?}\ncolumns:\n  left: prompt\n  right: completion\nlabels:\n  left: Prompt\n  right: Completion\nannotationColumn: {annotation_column}\n",
            data.display().to_string()
        ),
    )
    .unwrap();
    config
}

#[test]
fn page_load_then_save_round() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("pairs.jsonl");
    fs::write(
        &data,
        "{\"prompt\":\"2+2\",\"completion\":\"4\",\"verdict\":\"\"}\n\n{\"prompt\":\"capital of France\",\"completion\":\"Lyon\",\"verdict\":\"\"}\n",
    )
    .unwrap();
    let annotator = Annotator::new(write_config(dir.path(), &data, "verdict"));

    let page = annotator.load_page().unwrap();
    assert_eq!(page.config.labels.left, "Prompt");
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[1].text("completion").as_deref(), Some("Lyon"));

    annotator.submit("1", "wrong").unwrap();
    let rows = read_store(&data).unwrap();
    assert_eq!(rows[0].text("verdict").as_deref(), Some(""));
    assert_eq!(rows[1].text("verdict").as_deref(), Some("wrong"));
    // the blank line is not preserved by a rewrite
    assert_eq!(fs::read_to_string(&data).unwrap().lines().count(), 2);
}

#[test]
fn colliding_annotation_column_is_rejected_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("pairs.jsonl");
    let original = "{\"prompt\":\"a\",\"completion\":\"b\"}\n";
    fs::write(&data, original).unwrap();
    let annotator = Annotator::new(write_config(dir.path(), &data, "completion"));
    assert!(matches!(
        annotator.submit("0", "x").unwrap_err(),
        AnneError::ConfigInvalid(_)
    ));
    assert_eq!(fs::read_to_string(&data).unwrap(), original);
}

#[test]
fn malformed_store_blocks_update() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("pairs.jsonl");
    let original = "{\"prompt\":\"a\"}\n{oops}\n";
    fs::write(&data, original).unwrap();
    let annotator = Annotator::new(write_config(dir.path(), &data, "verdict"));
    match annotator.submit("0", "x").unwrap_err() {
        AnneError::StoreParse { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(fs::read_to_string(&data).unwrap(), original);
}
