use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends one record line to `path` through a whole-file atomic replace.
///
/// The current content (empty if the file is absent) plus the new line is
/// written to a sibling `<name>.tmp` file, forced to stable storage, then
/// renamed over the target. A concurrent observer sees the file either fully
/// pre- or fully post-append, never in between.
///
/// Cost is O(file size) per append, which is acceptable for bounded, rotated
/// logs only. Exactly one writer may own a path; two concurrent appenders
/// race and the later rename silently discards the earlier line.
///
/// `line` must be a single record without embedded newlines; a terminating
/// newline is added if missing.
pub fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let temp = temp_path(path);

    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    // Creation failure leaves the target untouched.
    let mut file = File::create(&temp)?;
    if let Err(e) = write_contents(&mut file, &existing, line) {
        drop(file);
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    drop(file);

    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    Ok(())
}

fn write_contents(file: &mut File, existing: &str, line: &str) -> io::Result<()> {
    file.write_all(existing.as_bytes())?;
    file.write_all(line.as_bytes())?;
    if !line.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    file.flush()?;
    file.sync_data()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("log"));
    name.push(".tmp");
    path.with_file_name(name)
}
