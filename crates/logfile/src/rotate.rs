use std::fs;
use std::io;
use std::path::Path;

use crate::compress::compress_file;

const GZ_SUFFIX: &str = ".gz";

/// Bounds the retention set in `dir` to the `keep_count` newest files.
///
/// The retention set is every entry whose name ends with `suffix`; names
/// must embed a sortable run identifier so that lexicographic order equals
/// age (a naming contract, not enforced here). Compressed `.gz` outputs do
/// not match the suffix and never re-enter the set.
///
/// Each selected file is deleted outright, or — with `compress` — gzipped to
/// a `.gz` sibling and deleted only after compression succeeds; a failed
/// compression keeps the original. Per-file outcomes are independent.
///
/// Rotating a file that a writer is still appending to races with that
/// writer; callers only rotate logs of completed runs.
///
/// Returns the number of files rotated out.
pub fn rotate(dir: &Path, suffix: &str, keep_count: usize, compress: bool) -> io::Result<usize> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.ends_with(suffix))
        .collect();

    if names.len() <= keep_count {
        return Ok(0);
    }

    names.sort();
    let excess = names.len() - keep_count;
    let mut rotated = 0;

    for name in &names[..excess] {
        let path = dir.join(name);

        if compress {
            let gz_path = dir.join(format!("{name}{GZ_SUFFIX}"));
            if let Err(e) = compress_file(&path, &gz_path) {
                tracing::warn!(file = %path.display(), error = %e, "compression failed, keeping original");
                let _ = fs::remove_file(&gz_path);
                continue;
            }
        }

        match fs::remove_file(&path) {
            Ok(()) => rotated += 1,
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "removal failed"),
        }
    }

    Ok(rotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn seed(dir: &Path, count: usize) -> Vec<PathBuf> {
        (1..=count)
            .map(|i| {
                let path = dir.join(format!("run_{i:03}.jsonl"));
                fs::write(&path, format!("{{\"n\":{i}}}\n")).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn removes_exactly_the_oldest_excess() {
        let dir = tempfile::tempdir().unwrap();
        let files = seed(dir.path(), 15);

        let rotated = rotate(dir.path(), ".jsonl", 10, false).unwrap();
        assert_eq!(rotated, 5);

        for old in &files[..5] {
            assert!(!old.exists(), "{} should be gone", old.display());
        }
        for kept in &files[5..] {
            assert!(kept.exists(), "{} should remain", kept.display());
        }
    }

    #[test]
    fn at_or_below_keep_count_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let files = seed(dir.path(), 10);

        assert_eq!(rotate(dir.path(), ".jsonl", 10, false).unwrap(), 0);
        assert!(files.iter().all(|f| f.exists()));
    }

    #[test]
    fn compress_replaces_originals_with_gz() {
        let dir = tempfile::tempdir().unwrap();
        let files = seed(dir.path(), 12);

        let rotated = rotate(dir.path(), ".jsonl", 10, true).unwrap();
        assert_eq!(rotated, 2);

        for old in &files[..2] {
            assert!(!old.exists());
            let gz = old.with_file_name(format!(
                "{}{}",
                old.file_name().unwrap().to_string_lossy(),
                GZ_SUFFIX
            ));
            assert!(gz.exists(), "{} missing", gz.display());
        }
    }

    #[test]
    fn compressed_outputs_stay_out_of_the_retention_set() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), 12);
        for i in 1..=5 {
            fs::write(dir.path().join(format!("old_{i:03}.jsonl.gz")), b"gz").unwrap();
        }

        // Only the 12 live logs count; the 5 archives are not candidates.
        let rotated = rotate(dir.path(), ".jsonl", 10, false).unwrap();
        assert_eq!(rotated, 2);
        for i in 1..=5 {
            assert!(dir.path().join(format!("old_{i:03}.jsonl.gz")).exists());
        }
    }

    #[test]
    fn unreadable_directory_fails_the_pass() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(rotate(&missing, ".jsonl", 10, false).is_err());
    }

    #[test]
    fn non_matching_files_are_untouched() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), 15);
        let other = dir.path().join("alerts.log");
        fs::write(&other, b"x").unwrap();

        rotate(dir.path(), ".jsonl", 10, false).unwrap();
        assert!(other.exists());
    }
}
