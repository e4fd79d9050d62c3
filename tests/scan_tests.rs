//! End-to-end scan scenarios against real temporary directory trees.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use dupescan::duplicates::{scan, DetectionMode, GroupingEngine, ScanConfig, ScanError};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

fn set_mtime(path: &Path, secs: i64) {
    filetime::set_file_mtime(path, filetime::FileTime::from_unix_time(secs, 0)).unwrap();
}

/// Sorted member paths per group, for order-insensitive comparison.
fn membership(result: &dupescan::duplicates::ScanResult) -> Vec<Vec<PathBuf>> {
    let mut groups: Vec<Vec<PathBuf>> = result
        .groups
        .iter()
        .map(|g| {
            let mut paths = g.paths.clone();
            paths.sort();
            paths
        })
        .collect();
    groups.sort();
    groups
}

#[test]
fn identical_content_groups_under_content_mode() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.txt", b"hi");
    let b = write_file(dir.path(), "b.txt", b"hi");
    let c = write_file(dir.path(), "c.txt", b"bye");

    let result = scan(dir.path(), &[], true).unwrap();

    assert_eq!(result.mode, DetectionMode::Content);
    assert_eq!(result.groups.len(), 1);

    let group = &result.groups[0];
    assert_eq!(group.len(), 2);
    assert!(group.paths.contains(&a));
    assert!(group.paths.contains(&b));
    assert!(!group.paths.contains(&c));
    assert_eq!(group.size(), 2);
}

#[test]
fn metadata_false_positive_corrected_by_content_mode() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.txt", b"hi");
    let b = write_file(dir.path(), "b.txt", b"ho");

    // Same size, forced identical mtime, different content
    set_mtime(&a, 1_700_000_000);
    set_mtime(&b, 1_700_000_000);

    let cheap = scan(dir.path(), &[], false).unwrap();
    assert_eq!(cheap.groups.len(), 1);
    assert_eq!(cheap.groups[0].len(), 2);

    let verified = scan(dir.path(), &[], true).unwrap();
    assert!(verified.groups.is_empty());
}

#[test]
fn content_mode_groups_despite_differing_mtimes() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.txt", b"same bytes");
    let b = write_file(dir.path(), "b.txt", b"same bytes");
    set_mtime(&a, 1_000_000_000);
    set_mtime(&b, 1_100_000_000);

    // The touched copy false-negatives in metadata mode...
    let cheap = scan(dir.path(), &[], false).unwrap();
    assert!(cheap.groups.is_empty());

    // ...but the content digest is authoritative
    let verified = scan(dir.path(), &[], true).unwrap();
    assert_eq!(verified.groups.len(), 1);
    assert_eq!(verified.groups[0].len(), 2);
}

#[test]
fn repeated_scans_agree_on_membership() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", b"hi");
    write_file(dir.path(), "b.txt", b"hi");
    write_file(dir.path(), "c.txt", b"bye");
    let sub = dir.path().join("nested");
    fs::create_dir(&sub).unwrap();
    write_file(&sub, "d.txt", b"hi");

    for verify in [false, true] {
        let first = scan(dir.path(), &[], verify).unwrap();
        let second = scan(dir.path(), &[], verify).unwrap();
        assert_eq!(membership(&first), membership(&second));
    }
}

#[test]
fn no_singleton_groups_ever_surface() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", b"one");
    write_file(dir.path(), "b.txt", b"two");
    write_file(dir.path(), "c.txt", b"two");
    write_file(dir.path(), "d.txt", b"seventeen bytes!!");

    for verify in [false, true] {
        let result = scan(dir.path(), &[], verify).unwrap();
        for group in &result.groups {
            assert!(group.len() >= 2, "singleton group surfaced: {:?}", group);
        }
    }
}

#[test]
fn duplicates_found_across_subdirectories() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "top.txt", b"shared content");

    let deep = dir.path().join("x").join("y");
    fs::create_dir_all(&deep).unwrap();
    let b = write_file(&deep, "deep.txt", b"shared content");

    let result = scan(dir.path(), &[], true).unwrap();

    assert_eq!(result.groups.len(), 1);
    assert!(result.groups[0].paths.contains(&a));
    assert!(result.groups[0].paths.contains(&b));
}

#[test]
fn excluded_directory_names_prune_subtrees_at_any_depth() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "keep.txt", b"payload");

    let top_cache = dir.path().join("cache");
    fs::create_dir(&top_cache).unwrap();
    write_file(&top_cache, "dup1.txt", b"payload");

    let nested_cache = dir.path().join("sub").join("cache");
    fs::create_dir_all(&nested_cache).unwrap();
    write_file(&nested_cache, "dup2.txt", b"payload");

    let result = scan(dir.path(), &["cache".to_string()], true).unwrap();

    assert!(result.groups.is_empty());
    assert_eq!(result.summary.total_files, 1);
}

#[test]
fn invalid_root_fails_before_any_work() {
    let err = scan(Path::new("/definitely/not/here/24680"), &[], true).unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound(_)));

    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "plain.txt", b"x");
    let err = scan(&file, &[], true).unwrap_err();
    assert!(matches!(err, ScanError::RootNotADirectory(_)));
}

#[test]
fn empty_tree_scans_clean() {
    let dir = TempDir::new().unwrap();
    let result = scan(dir.path(), &[], true).unwrap();

    assert!(result.groups.is_empty());
    assert!(result.skipped.is_empty());
    assert_eq!(result.summary.total_files, 0);
}

#[test]
fn empty_files_group_like_any_others() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.empty", b"");
    write_file(dir.path(), "b.empty", b"");

    let result = scan(dir.path(), &[], true).unwrap();

    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].size(), 0);
    assert_eq!(result.groups[0].len(), 2);
}

#[test]
fn engine_config_threads_do_not_change_membership() {
    let dir = TempDir::new().unwrap();
    for i in 0..20 {
        write_file(dir.path(), &format!("dup{i}.txt"), b"many copies");
        write_file(dir.path(), &format!("uniq{i}.txt"), format!("unique {i}").as_bytes());
    }

    let single = GroupingEngine::new(
        ScanConfig::default()
            .with_verify_content(true)
            .with_io_threads(1),
    )
    .scan(dir.path())
    .unwrap();

    let parallel = GroupingEngine::new(
        ScanConfig::default()
            .with_verify_content(true)
            .with_io_threads(8),
    )
    .scan(dir.path())
    .unwrap();

    assert_eq!(membership(&single), membership(&parallel));
    assert_eq!(single.groups.len(), 1);
    assert_eq!(single.groups[0].len(), 20);
}

#[test]
#[cfg(unix)]
fn unreadable_file_lands_in_audit_channel() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", b"pair");
    write_file(dir.path(), "b.txt", b"pair");
    let locked = write_file(dir.path(), "locked.txt", b"pair");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let enforced = File::open(&locked).is_err();

    let result = scan(dir.path(), &[], true).unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    if !enforced {
        return;
    }

    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].path, locked);
    assert_eq!(result.skipped[0].reason.stage(), "read");
    assert!(result.skipped[0].reason.to_string().contains("Permission denied"));

    // The scan still completes and groups the readable pair
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].len(), 2);
    assert_eq!(result.summary.total_files, 3);
    assert_eq!(result.summary.skipped_files, 1);
}

#[test]
#[cfg(unix)]
fn unreadable_directory_is_skipped_subtree() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", b"pair");
    write_file(dir.path(), "b.txt", b"pair");

    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    write_file(&locked, "c.txt", b"pair");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let enforced = fs::read_dir(&locked).is_err();

    let result = scan(dir.path(), &[], true).unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !enforced {
        return;
    }

    // The subtree is absent, the rest of the scan is unaffected
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].len(), 2);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason.stage(), "walk");
}

#[test]
#[cfg(unix)]
fn symlinked_file_participates_in_grouping() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    let target = write_file(dir.path(), "real.txt", b"linked bytes");
    let other = write_file(dir.path(), "other.txt", b"linked bytes");
    let link = dir.path().join("alias.txt");
    symlink(&target, &link).unwrap();

    let result = scan(dir.path(), &[], true).unwrap();

    assert_eq!(result.groups.len(), 1);
    let group = &result.groups[0];
    assert_eq!(group.len(), 3);
    assert!(group.paths.contains(&target));
    assert!(group.paths.contains(&other));
    assert!(group.paths.contains(&link));
}

#[test]
#[cfg(unix)]
fn directory_symlink_cycles_terminate() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", b"hi");
    write_file(dir.path(), "b.txt", b"hi");
    symlink(dir.path(), dir.path().join("loop")).unwrap();

    let result = scan(dir.path(), &[], true).unwrap();

    // Terminates, and each file is counted exactly once
    assert_eq!(result.summary.total_files, 2);
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].len(), 2);
}
