//! Result writer - raw, cleaned and plain text dumps.
//!
//! Formatting functions write to any `Write`; [`write_file`] places a dump on
//! disk via a temporary file that is renamed into place, so a failed write
//! never leaves a truncated result behind and concurrent writers never share
//! a partial file.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tempfile::NamedTempFile;

use crate::error::{ListError, Result};
use crate::layout::{Detection, OrderedList};

/// Writes one line per detection text, in recognition order.
pub fn write_raw<W: Write + ?Sized>(writer: &mut W, detections: &[Detection]) -> io::Result<()> {
    for det in detections {
        writeln!(writer, "{}", det.text())?;
    }
    Ok(())
}

/// Writes `List <k>: w1, w2, ...` per list, numbered from 1.
pub fn write_lists<W: Write + ?Sized>(writer: &mut W, lists: &[OrderedList]) -> io::Result<()> {
    for (i, words) in lists.iter().enumerate() {
        writeln!(writer, "List {}: {}", i + 1, words.iter().join(", "))?;
    }
    Ok(())
}

/// Writes all detection texts joined by newlines, without a trailing newline.
pub fn write_plain<W: Write + ?Sized>(writer: &mut W, detections: &[Detection]) -> io::Result<()> {
    write!(writer, "{}", detections.iter().map(Detection::text).join("\n"))
}

/// Output file locations for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// `<name>_raw.txt`
    pub raw: PathBuf,
    /// `<name>.txt`
    pub cleaned: PathBuf,
}

impl OutputPaths {
    /// Paths for `image`, placed in `output_dir` or beside the image.
    pub fn for_image(image: &Path, output_dir: Option<&Path>) -> Self {
        let stem = image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| image.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        Self {
            raw: dir.join(format!("{stem}_raw.txt")),
            cleaned: dir.join(format!("{stem}.txt")),
        }
    }
}

/// Writes a dump to `path` through a uniquely named temporary file in the
/// same directory, persisted over `path` once fully written.
pub fn write_file<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let written = NamedTempFile::new_in(dir).and_then(|tmp| {
        let mut writer = BufWriter::new(tmp);
        render(&mut writer)?;
        let tmp = writer.into_inner().map_err(|e| e.into_error())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    });
    // A temp file that never got persisted is removed when dropped.
    written.map_err(|source| ListError::Io {
        path: path.to_path_buf(),
        source,
    })
}
