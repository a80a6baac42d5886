use std::fs;
use std::io::Write;
use std::path::PathBuf;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use minigit::{Blob, FileMode, Id, Object, Repository, Tree, TreeEntry};

#[allow(dead_code)]
pub fn write_blob(r: &Repository, data: &str) -> Id {
    minigit::write_object(&Object::Blob(Blob::new(data)), Some(r)).unwrap()
}

// Write a tree containing a single regular file.
#[allow(dead_code)]
pub fn write_single_file_tree(r: &Repository, name: &str, data: &str) -> Id {
    let blob = write_blob(r, data);
    let tree = Tree::from_entries(vec![TreeEntry::new(FileMode::NORMAL, name, blob)]);
    minigit::write_object(&Object::Tree(tree), Some(r)).unwrap()
}

// Store raw bytes, zlib-compressed, at the loose-object path for `id`,
// bypassing all encoding and validation.
#[allow(dead_code)]
pub fn plant_loose_object(r: &Repository, id: &Id, raw: &[u8]) -> PathBuf {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).unwrap();
    let compressed = encoder.finish().unwrap();

    let path = r.object_path(id);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, compressed).unwrap();
    path
}
