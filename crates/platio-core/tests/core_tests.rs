use std::sync::Arc;

use platio_core::path;
use platio_core::{
    AccessMode, Capability, Depth, ExclusionSet, FileInfo, SharedStringTable, Status,
    StringTable, WalkConfig,
};

#[test]
fn test_mode_capability_table() {
    let table = [
        (AccessMode::Read, true, false),
        (AccessMode::Write, false, true),
        (AccessMode::ReadWrite, true, true),
        (AccessMode::WriteAppend, false, true),
    ];
    for (mode, read, write) in table {
        let cap = mode.capability();
        assert_eq!(cap.contains(Capability::READ), read, "{mode}");
        assert_eq!(cap.contains(Capability::WRITE), write, "{mode}");
    }
}

#[test]
fn test_status_serialization() {
    let json = serde_json::to_string(&Status::EndOfStream).unwrap();
    let back: Status = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Status::EndOfStream);
}

#[test]
fn test_exclusion_set_from_config() {
    let config = WalkConfig::builder()
        .exclusions(vec!["node_modules".to_string(), "target".to_string()])
        .build()
        .unwrap();

    let set = config.exclusion_set();
    let names: Vec<&str> = set.iter().collect();
    assert_eq!(&names[..2], &["node_modules", "target"]);
    assert!(set.contains(".svn"));
    assert!(set.contains("CVS"));
}

#[test]
fn test_exclusion_order_independent() {
    let a = ExclusionSet::with_names(["x", "y"]);
    let b = ExclusionSet::with_names(["y", "x", "y"]);
    for name in ["x", "y", "z"] {
        assert_eq!(a.contains(name), b.contains(name));
    }
}

#[test]
fn test_depth_from_negative_sentinel() {
    for budget in [-1, -2, i64::MIN] {
        assert_eq!(Depth::from_budget(budget), Depth::Unlimited);
    }
    assert_eq!(Depth::from_budget(i64::MAX), Depth::Limited(u32::MAX));
}

#[test]
fn test_file_info_with_interned_strings() {
    let table = SharedStringTable::new();
    let dir = table.intern("root/y");
    let info = FileInfo {
        full_path: dir.clone(),
        file_name: table.intern("notes.txt"),
        file_size: 42,
    };

    assert!(Arc::ptr_eq(&info.full_path, &table.intern("root/y")));
    assert_eq!(info.path(), "root/y/notes.txt");

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["file_name"], "notes.txt");
    assert_eq!(json["file_size"], 42);
}

#[test]
fn test_path_round_trip_through_parents() {
    let mut current = "/tmp/a/b/c/";
    let mut parents = Vec::new();
    while let Some(parent) = path::parent_directory(current) {
        parents.push(parent);
        current = parent;
    }
    assert_eq!(parents, vec!["/tmp/a/b/", "/tmp/a/", "/tmp/"]);
}
