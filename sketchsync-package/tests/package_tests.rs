use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use sketchsync_core::{walk_files, SuffixFilter};
use sketchsync_package::{package_all, write_archive};
use tempfile::TempDir;
use zip::ZipArchive;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

fn archive_entries(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(path).expect("open archive")).expect("zip");
    let mut out = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).expect("entry");
        let mut body = Vec::new();
        entry.read_to_end(&mut body).expect("read entry");
        out.insert(entry.name().to_owned(), body);
    }
    out
}

/// Unpack `archive` into `dest` using the stored entry names.
fn extract(archive: &Path, dest: &Path) {
    for (name, body) in archive_entries(archive) {
        let path = name.split('/').fold(dest.to_path_buf(), |p, seg| p.join(seg));
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, body).expect("write extracted");
    }
}

#[test]
fn archive_then_extract_reproduces_files() {
    let src = TempDir::new().expect("src");
    let out = TempDir::new().expect("out");
    let unpacked = TempDir::new().expect("unpacked");

    write(src.path(), "Flocking/Flocking.pde", b"Flock flock;\n");
    write(src.path(), "Flocking/Boid.pde", b"class Boid {}\n");
    write(src.path(), "Flocking/data/font.vlw", &[0, 1, 2, 3, 254, 255]);

    let archive = out.path().join("Flocking.pdez");
    write_archive(&archive, &src.path().join("Flocking")).expect("write archive");
    extract(&archive, unpacked.path());

    let original = walk_files(&src.path().join("Flocking")).expect("walk src");
    let restored = walk_files(&unpacked.path().join("Flocking")).expect("walk unpacked");
    assert_eq!(original, restored);
    for rel in original {
        assert_eq!(
            fs::read(rel.under(&src.path().join("Flocking"))).expect("read src"),
            fs::read(rel.under(&unpacked.path().join("Flocking"))).expect("read restored"),
            "content differs for {rel}"
        );
    }
}

#[test]
fn one_archive_per_sketch_group_with_only_its_files() {
    let src = TempDir::new().expect("src");
    let dst = TempDir::new().expect("dst");
    write(src.path(), "Basics/Arrays/Array/Array.pde", b"a");
    write(src.path(), "Basics/Arrays/Array2D/Array2D.pde", b"b");
    write(src.path(), "Basics/Color/Hue/Hue.pde", b"c");
    write(src.path(), "Basics/Color/Hue/data/swatch.png", b"d");

    let written =
        package_all(src.path(), dst.path(), &SuffixFilter::default(), "zip").expect("package");
    let paths: Vec<PathBuf> = written.iter().map(|s| s.path.clone()).collect();
    assert_eq!(
        paths,
        [
            dst.path().join("Basics/Arrays").join("Array.zip"),
            dst.path().join("Basics/Arrays").join("Array2D.zip"),
            dst.path().join("Basics/Color").join("Hue.zip"),
        ]
    );

    let on_disk: Vec<String> = walk_files(dst.path())
        .expect("walk dst")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        on_disk,
        [
            "Basics/Arrays/Array.zip",
            "Basics/Arrays/Array2D.zip",
            "Basics/Color/Hue.zip"
        ]
    );

    let array = archive_entries(&dst.path().join("Basics/Arrays/Array.zip"));
    assert_eq!(array.keys().collect::<Vec<_>>(), ["Array/Array.pde"]);
    let hue = archive_entries(&dst.path().join("Basics/Color/Hue.zip"));
    assert_eq!(
        hue.keys().collect::<Vec<_>>(),
        ["Hue/Hue.pde", "Hue/data/swatch.png"]
    );
}

#[test]
fn brightness_scenario_has_no_absolute_entry_names() {
    let src = TempDir::new().expect("src");
    let dst = TempDir::new().expect("dst");
    write(src.path(), "Topics/Color/Brightness/Brightness.pde", b"brightness");
    write(src.path(), "Topics/Color/Hue/Hue.pde", b"hue");

    package_all(src.path(), dst.path(), &SuffixFilter::default(), "zip").expect("package");

    let archive = dst.path().join("Topics/Color/Brightness.zip");
    assert!(archive.is_file());
    let entries = archive_entries(&archive);
    assert_eq!(
        entries.keys().collect::<Vec<_>>(),
        ["Brightness/Brightness.pde"]
    );
    let src_prefix = src.path().to_string_lossy().trim_start_matches('/').to_string();
    for name in entries.keys() {
        assert!(!name.starts_with('/'), "absolute entry name: {name}");
        assert!(!name.contains(&src_prefix), "leaked source path: {name}");
        assert!(name.starts_with("Brightness/"));
    }
}

#[test]
fn custom_extension_is_used_for_archive_names() {
    let src = TempDir::new().expect("src");
    let dst = TempDir::new().expect("dst");
    write(src.path(), "Demos/Graphics/Wiggling/Wiggling.pde", b"w");

    let written =
        package_all(src.path(), dst.path(), &SuffixFilter::default(), "pdez").expect("package");
    assert_eq!(written.len(), 1);
    assert!(dst.path().join("Demos/Graphics/Wiggling.pdez").is_file());
}
