use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use timetabler::storage::SledStore;

/// Two single-session groups and one two-session group, conflict free
#[allow(dead_code)]
pub const SAMPLE_IMPORT: &str = "\
1
T2(S)
Tiết 1-3
25-32,34-42
D9-301
1\tIT3080\tComputer Networks\tLT
2
T3(C)
Tiết 1-2
25-42
TC-205
2\tMI1111\tCalculus I\tBT
3
T4(S)
T6(S)
6:45 - 9:10
7:30 - 8:15
25-42
25-42
D3-101
D3-102
3\tPE1014\tBasketball
";

#[allow(dead_code)]
pub fn create_temp_storage() -> (SledStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("schedule.db");
    let storage = SledStore::new_with_path(db_path).expect("failed to open sled storage with path");
    (storage, tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
