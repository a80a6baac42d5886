use std::fs;

use minigit::{Blob, Error, FormatError, Id, Kind, Object};
use minigit_on_disk::TempRepo;

mod common;

// $ printf 'hi\n' | git hash-object --stdin
const HI_ID: &str = "45b983be36b73c0788dc9cbcb76cbb80fc7bb057";

#[test]
fn write_then_read_round_trip() {
    let tr = TempRepo::new();
    let r = tr.repo();

    let blob = Object::Blob(Blob::new("hi\n"));
    let id = minigit::write_object(&blob, Some(&r)).unwrap();
    assert_eq!(id.to_string(), HI_ID);

    let read_back = minigit::read_object(&r, &id).unwrap();
    assert_eq!(read_back.serialize(), blob.serialize());
    assert_eq!(read_back.kind(), Kind::Blob);
}

#[test]
fn dry_run_touches_nothing() {
    let tr = TempRepo::new();
    let r = tr.repo();

    let id = minigit::write_object(&Object::Blob(Blob::new("hi\n")), None).unwrap();
    assert_eq!(id.to_string(), HI_ID);
    assert!(!r.object_path(&id).exists());

    let hashed = minigit::hash_payload(Kind::Blob, b"hi\n", None).unwrap();
    assert_eq!(hashed, id);
    assert!(!r.object_path(&id).exists());
}

#[test]
fn idempotent_write_leaves_one_unchanged_file() {
    let tr = TempRepo::new();
    let r = tr.repo();

    let blob = Object::Blob(Blob::new("same bytes every time\n"));
    let id = minigit::write_object(&blob, Some(&r)).unwrap();
    let path = r.object_path(&id);
    let before = fs::read(&path).unwrap();

    for _ in 0..3 {
        assert_eq!(minigit::write_object(&blob, Some(&r)).unwrap(), id);
    }

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn different_payloads_different_ids() {
    let a = minigit::hash_payload(Kind::Blob, b"a", None).unwrap();
    let b = minigit::hash_payload(Kind::Blob, b"b", None).unwrap();
    assert_ne!(a, b);
}

#[test]
fn missing_object_is_not_found() {
    let tr = TempRepo::new();
    let r = tr.repo();

    let id = Id::from_hex(HI_ID).unwrap();
    match minigit::read_object(&r, &id).unwrap_err() {
        Error::ObjectNotFound(missing) => assert_eq!(missing, id),
        err => panic!("wrong error: {:?}", err),
    }
}

#[test]
fn reads_object_compressed_elsewhere() {
    let tr = TempRepo::new();
    let r = tr.repo();

    let id = Id::from_hex(HI_ID).unwrap();
    common::plant_loose_object(&r, &id, b"blob 3\0hi\n");

    match minigit::read_object(&r, &id).unwrap() {
        Object::Blob(blob) => assert_eq!(blob.data(), b"hi\n"),
        other => panic!("expected a blob, got {:?}", other),
    }
}

#[test]
fn declared_length_mismatch() {
    let tr = TempRepo::new();
    let r = tr.repo();

    let id = Id::from_hex(HI_ID).unwrap();
    common::plant_loose_object(&r, &id, b"blob 4\0hi\n");

    match minigit::read_object(&r, &id).unwrap_err() {
        Error::Format(FormatError::LengthMismatch { declared, actual }) => {
            assert_eq!(declared, 4);
            assert_eq!(actual, 3);
        }
        err => panic!("wrong error: {:?}", err),
    }
}

#[test]
fn unsupported_type() {
    let tr = TempRepo::new();
    let r = tr.repo();

    let id = Id::from_hex(HI_ID).unwrap();
    common::plant_loose_object(&r, &id, b"tag 3\0hi\n");

    match minigit::read_object(&r, &id).unwrap_err() {
        Error::UnsupportedType(tag) => assert_eq!(tag, "tag"),
        err => panic!("wrong error: {:?}", err),
    }
}

#[test]
fn tree_matches_command_line_git() {
    let tr = TempRepo::new();
    let r = tr.repo();

    // $ printf '100644 blob 45b983be36b73c0788dc9cbcb76cbb80fc7bb057\thello.txt\n' | git mktree
    let id = common::write_single_file_tree(&r, "hello.txt", "hi\n");
    assert_eq!(id.to_string(), "7a2871192d49caaff5451df37b27afc373d8298b");

    let listing = minigit::ls_tree(&r, &id, false).unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(
        listing[0].to_string(),
        format!("100644 blob {}\thello.txt", HI_ID)
    );
}
