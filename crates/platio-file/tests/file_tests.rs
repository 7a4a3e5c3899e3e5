use std::fs;

use platio_file::{
    AccessMode, Capability, FileHandle, Status, create_path, file_size, is_directory, is_file,
};
use tempfile::TempDir;

fn root_of(temp: &TempDir) -> String {
    temp.path().to_string_lossy().into_owned()
}

#[test]
fn test_create_path_then_write_and_read_back() {
    let temp = TempDir::new().unwrap();
    let target = format!("{}/save/slot1/game.dat", root_of(&temp));

    create_path(&target).unwrap();
    assert!(is_directory(&format!("{}/save/slot1", root_of(&temp))));

    let mut file = FileHandle::new();
    assert_eq!(file.open(&target, AccessMode::Write), Status::Ok);
    for chunk in [&b"level=3\n"[..], &b"score=1200\n"[..]] {
        let written = file.write(chunk).unwrap();
        assert_eq!(written.bytes, chunk.len());
    }
    assert_eq!(file.close(), Status::Closed);
    assert!(is_file(&target));
    assert_eq!(file_size(&target), 19);

    assert_eq!(file.open(&target, AccessMode::Read), Status::Ok);
    let mut buf = [0u8; 8];
    let first = file.read(&mut buf).unwrap();
    assert_eq!(first.status, Status::Ok);
    assert_eq!(&buf, b"level=3\n");

    let mut rest = [0u8; 32];
    let second = file.read(&mut rest).unwrap();
    assert_eq!(second.status, Status::EndOfStream);
    assert_eq!(&rest[..second.bytes], b"score=1200\n");
}

#[test]
fn test_create_path_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let target = format!("{}/a/b/c/", root_of(&temp));

    create_path(&target).unwrap();
    let before = fs::metadata(&target).unwrap().modified().unwrap();
    create_path(&target).unwrap();
    let after = fs::metadata(&target).unwrap().modified().unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_open_close_leaves_no_capability() {
    let temp = TempDir::new().unwrap();
    let target = format!("{}/file.bin", root_of(&temp));
    fs::write(&target, "seed").unwrap();

    for mode in [
        AccessMode::ReadWrite,
        AccessMode::WriteAppend,
        AccessMode::Read,
        AccessMode::Write,
    ] {
        let mut file = FileHandle::new();
        file.open(&target, mode);
        assert!(file.has_capability(mode.capability()));
        file.close();
        assert_eq!(file.status(), Status::Closed);
        assert_eq!(file.capability(), Capability::empty());
    }
}

#[test]
fn test_size_tracks_writes() {
    let temp = TempDir::new().unwrap();
    let target = format!("{}/grow.bin", root_of(&temp));

    let mut file = FileHandle::new();
    file.open(&target, AccessMode::WriteAppend);
    assert_eq!(file.size(), 0);
    file.write(&[1u8; 10]).unwrap();
    assert_eq!(file.size(), 10);
    file.write(&[2u8; 5]).unwrap();
    assert_eq!(file.size(), 15);
    assert_eq!(file.flush().unwrap(), Status::Ok);
}

#[test]
fn test_dropped_handle_releases_file() {
    let temp = TempDir::new().unwrap();
    let target = format!("{}/dropped.bin", root_of(&temp));

    {
        let mut file = FileHandle::new();
        file.open(&target, AccessMode::Write);
        file.write(b"kept").unwrap();
    }

    assert_eq!(fs::read_to_string(&target).unwrap(), "kept");
}
