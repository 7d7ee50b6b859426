use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Streams `src` through gzip into `dst`. On failure `dst` may be partial;
/// callers delete the source only after this returns Ok.
pub fn compress_file(src: &Path, dst: &Path) -> io::Result<()> {
    let input = File::open(src)?;
    let output = File::create(dst)?;

    let mut reader = BufReader::new(input);
    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
    io::copy(&mut reader, &mut encoder)?;

    let mut writer = encoder.finish()?;
    writer.flush()
}
