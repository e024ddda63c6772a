//! End-to-end pipeline tests: scan, classify, create buckets, transfer,
//! fix timestamps.

use bucketize::commands::run;
use bucketize::{Config, TransferPolicy};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

// 2023-05-14T12:00:00Z
const MAY_14_2023: u64 = 1_684_065_600;
// 2021-12-31T08:00:00Z
const DEC_31_2021: u64 = 1_640_937_600;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn write_file(path: &Path, content: &[u8], modified: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
    filetime::set_file_mtime(path, filetime::FileTime::from_system_time(at(modified)))
        .expect("set mtime");
}

fn config_for(source: &Path, target: &Path, policy: TransferPolicy, ext: &str) -> Config {
    Config {
        source: source.to_path_buf(),
        target: target.to_path_buf(),
        policy,
        extension: ext.to_string(),
        ..Config::default()
    }
}

fn bucket(target: &Path, rel: &str) -> PathBuf {
    target.join(rel)
}

#[test]
fn test_copy_into_date_buckets() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    write_file(&src.path().join("video1.mp4"), b"one", MAY_14_2023);
    write_file(&src.path().join("trip/video2.mp4"), b"two", DEC_31_2021);
    write_file(&src.path().join("trip/notes.txt"), b"ignore me", MAY_14_2023);

    let report = run(&config_for(
        src.path(),
        dst.path(),
        TransferPolicy::Overwrite,
        "mp4",
    ))
    .expect("run should succeed");

    assert_eq!(
        fs::read(bucket(dst.path(), "2023/2023-05-14/video1.mp4")).expect("read video1"),
        b"one"
    );
    assert_eq!(
        fs::read(bucket(dst.path(), "2021/2021-12-31/video2.mp4")).expect("read video2"),
        b"two"
    );
    assert!(!bucket(dst.path(), "2023/2023-05-14/notes.txt").exists());

    assert_eq!(report.classify.matched, 2);
    assert_eq!(report.classify.ignored, 1);
    assert_eq!(report.directories.created, 2);
    assert_eq!(report.transfers.copied, 2);
    assert_eq!(report.timestamps.synced, 2);
    assert!(!report.has_failures());

    // Copies leave the source tree alone
    assert!(src.path().join("video1.mp4").exists());
}

#[test]
fn test_non_matching_extension_changes_nothing() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("video1.mp4"), b"one", MAY_14_2023);

    let report = run(&config_for(
        src.path(),
        dst.path(),
        TransferPolicy::Overwrite,
        "mov",
    ))
    .expect("run should succeed");

    assert_eq!(report.classify.matched, 0);
    assert_eq!(report.classify.ignored, 1);
    assert_eq!(report.directories.created, 0);
    assert_eq!(
        fs::read_dir(dst.path()).expect("read target").count(),
        0,
        "target must stay empty"
    );
}

#[test]
fn test_skip_mode_is_idempotent() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("a.mp4"), b"a", MAY_14_2023);
    write_file(&src.path().join("b.mp4"), b"b", MAY_14_2023);

    let config = config_for(src.path(), dst.path(), TransferPolicy::Skip, "mp4");

    let first = run(&config).expect("first run");
    assert_eq!(first.transfers.copied, 2);

    let second = run(&config).expect("second run");
    assert_eq!(second.transfers.copied, 0);
    assert_eq!(second.transfers.skipped, 2);
    assert_eq!(second.directories.created, 0);

    let entries: Vec<_> = fs::read_dir(bucket(dst.path(), "2023/2023-05-14"))
        .expect("read bucket")
        .collect();
    assert_eq!(entries.len(), 2, "no duplicates or part files");
}

#[test]
fn test_skip_mode_keeps_existing_content() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("a.mp4"), b"source", MAY_14_2023);
    write_file(
        &bucket(dst.path(), "2023/2023-05-14/a.mp4"),
        b"already here",
        MAY_14_2023,
    );

    run(&config_for(src.path(), dst.path(), TransferPolicy::Skip, "mp4")).expect("run");

    assert_eq!(
        fs::read(bucket(dst.path(), "2023/2023-05-14/a.mp4")).expect("read dest"),
        b"already here"
    );
}

#[test]
fn test_skip_mode_keeps_part_named_file_in_bucket() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("clip.mp4"), b"new clip", MAY_14_2023);
    write_file(
        &bucket(dst.path(), "2023/2023-05-14/clip.mp4.part"),
        b"unrelated partial download",
        MAY_14_2023,
    );

    let report =
        run(&config_for(src.path(), dst.path(), TransferPolicy::Skip, "mp4")).expect("run");

    assert_eq!(report.transfers.copied, 1);
    assert_eq!(
        fs::read(bucket(dst.path(), "2023/2023-05-14/clip.mp4")).expect("read dest"),
        b"new clip"
    );
    assert_eq!(
        fs::read(bucket(dst.path(), "2023/2023-05-14/clip.mp4.part")).expect("read part"),
        b"unrelated partial download"
    );
}

#[test]
fn test_part_named_source_and_its_stem_both_arrive() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("a/clip.mp4.part"), b"partial", MAY_14_2023);
    write_file(&src.path().join("b/clip.mp4"), b"complete", MAY_14_2023);

    let report =
        run(&config_for(src.path(), dst.path(), TransferPolicy::Skip, "")).expect("run");

    assert_eq!(report.transfers.copied, 2);
    let day = bucket(dst.path(), "2023/2023-05-14");
    assert_eq!(fs::read(day.join("clip.mp4.part")).expect("read part"), b"partial");
    assert_eq!(fs::read(day.join("clip.mp4")).expect("read clip"), b"complete");
    assert_eq!(fs::read_dir(&day).expect("read bucket").count(), 2);
}

#[test]
fn test_overwrite_mode_replaces_content() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("a.mp4"), b"fresh source", MAY_14_2023);
    write_file(
        &bucket(dst.path(), "2023/2023-05-14/a.mp4"),
        b"stale",
        MAY_14_2023,
    );

    let report =
        run(&config_for(src.path(), dst.path(), TransferPolicy::Overwrite, "mp4")).expect("run");

    assert_eq!(report.transfers.copied, 1);
    assert_eq!(
        fs::read(bucket(dst.path(), "2023/2023-05-14/a.mp4")).expect("read dest"),
        b"fresh source"
    );
}

#[test]
fn test_move_mode_relocates_files() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("deep/a.mp4"), b"moving", MAY_14_2023);
    write_file(&src.path().join("b.mp4"), b"blocked", MAY_14_2023);
    write_file(
        &bucket(dst.path(), "2023/2023-05-14/b.mp4"),
        b"occupant",
        MAY_14_2023,
    );

    let report =
        run(&config_for(src.path(), dst.path(), TransferPolicy::Move, "mp4")).expect("run");

    assert_eq!(report.transfers.moved, 1);
    assert_eq!(report.transfers.skipped, 1);
    assert!(!src.path().join("deep/a.mp4").exists());
    assert_eq!(
        fs::read(bucket(dst.path(), "2023/2023-05-14/a.mp4")).expect("read moved"),
        b"moving"
    );
    // Conflicting source stays put
    assert!(src.path().join("b.mp4").exists());
    assert_eq!(
        fs::read(bucket(dst.path(), "2023/2023-05-14/b.mp4")).expect("read occupant"),
        b"occupant"
    );
}

#[test]
fn test_subdir_is_appended_to_bucket() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("a.mp4"), b"a", MAY_14_2023);

    let config = Config {
        subdir: Some(PathBuf::from("dashcam")),
        ..config_for(src.path(), dst.path(), TransferPolicy::Skip, "mp4")
    };
    run(&config).expect("run");

    assert!(bucket(dst.path(), "2023/2023-05-14/dashcam/a.mp4").is_file());
}

#[test]
fn test_transferred_files_keep_modified_time() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("a.mp4"), b"a", MAY_14_2023);

    run(&config_for(src.path(), dst.path(), TransferPolicy::Skip, "mp4")).expect("run");

    let modified = fs::metadata(bucket(dst.path(), "2023/2023-05-14/a.mp4"))
        .and_then(|m| m.modified())
        .expect("dest mtime");
    assert_eq!(modified, at(MAY_14_2023));
}

#[test]
fn test_empty_extension_matches_everything() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("a.mp4"), b"a", MAY_14_2023);
    write_file(&src.path().join("b.jpg"), b"b", MAY_14_2023);
    write_file(&src.path().join("README"), b"c", MAY_14_2023);

    let report =
        run(&config_for(src.path(), dst.path(), TransferPolicy::Skip, "")).expect("run");

    assert_eq!(report.classify.matched, 3);
    assert!(bucket(dst.path(), "2023/2023-05-14/README").is_file());
}

#[test]
fn test_same_name_in_different_folders_collides() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write_file(&src.path().join("cam1/clip.mp4"), b"first", MAY_14_2023);
    write_file(&src.path().join("cam2/clip.mp4"), b"second", MAY_14_2023);

    let report =
        run(&config_for(src.path(), dst.path(), TransferPolicy::Skip, "mp4")).expect("run");

    // Two distinct records, one destination: the second one finds it taken.
    assert_eq!(report.transfers.total, 2);
    assert_eq!(report.transfers.copied, 1);
    assert_eq!(report.transfers.skipped, 1);
}

#[test]
fn test_missing_source_root_is_fatal() {
    let dst = TempDir::new().expect("create dst tempdir");
    let missing = dst.path().join("no-such-source");

    let result = run(&config_for(&missing, dst.path(), TransferPolicy::Skip, "mp4"));
    assert!(result.is_err());
}
