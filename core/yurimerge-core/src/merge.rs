//! Amalgamation: filter every source header and stitch them into one file

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::MergeConfig;
use crate::error::{MergeError, Result};
use crate::filter::{LineFilter, REFLECT_INCLUDE};

/// Per-source line accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub path: PathBuf,
    pub lines_read: usize,
    pub lines_kept: usize,
    pub lines_dropped: usize,
}

/// Summary of one merge run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub output: PathBuf,
    pub guard: String,
    pub sources: Vec<SourceStats>,
    /// Body lines plus the three guard lines.
    pub lines_written: usize,
}

/// Result of comparing a fresh render against the header on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    Stale,
    Missing,
}

/// Write the merged header to the configured output path.
///
/// The document is staged next to the output and renamed into place once
/// every source was copied, so a failing run leaves any previous header
/// untouched and never produces a partial one. A symlinked output is
/// followed: the link stays, its target receives the header.
///
/// Source lines are copied verbatim, except that a final line without a
/// newline gets one, so it cannot run into the next header or the closing
/// `#endif`.
pub fn amalgamate(config: &MergeConfig) -> Result<MergeReport> {
    config.validate()?;

    let output = config.output_path();
    let target = resolve_output(&output).map_err(|source| MergeError::OpenOutput {
        path: output.clone(),
        source,
    })?;
    let staging_dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let staged = NamedTempFile::new_in(&staging_dir).map_err(|source| MergeError::OpenOutput {
        path: output.clone(),
        source,
    })?;
    let write_err = |source: io::Error| MergeError::WriteOutput {
        path: output.clone(),
        source,
    };

    let mut writer = BufWriter::new(staged);
    let report = write_document(config, &mut writer, &output)?;
    writer.flush().map_err(write_err)?;
    let staged = writer.into_inner().map_err(|e| write_err(e.into_error()))?;

    carry_permissions(staged.as_file(), &target).map_err(write_err)?;
    staged
        .persist(&target)
        .map_err(|e| MergeError::OpenOutput {
            path: output.clone(),
            source: e.error,
        })?;

    info!(
        output = %output.display(),
        target = %target.display(),
        sources = report.sources.len(),
        lines = report.lines_written,
        "wrote amalgamated header"
    );

    Ok(report)
}

/// Stream the merged header into `out` without touching the filesystem
/// beyond reading the sources.
///
/// Like [`amalgamate`], a source whose last line lacks a newline gets one.
pub fn render(config: &MergeConfig, out: impl Write) -> Result<MergeReport> {
    config.validate()?;
    write_document(config, out, Path::new("-"))
}

/// Compare what a merge would produce with the header currently on disk.
pub fn check(config: &MergeConfig) -> Result<CheckOutcome> {
    config.validate()?;

    let output = config.output_path();
    let mut fresh = Vec::new();
    write_document(config, &mut fresh, &output)?;

    let target = resolve_output(&output).map_err(|source| MergeError::OpenOutput {
        path: output.clone(),
        source,
    })?;
    let existing = match fs::read(&target) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(output = %output.display(), "no header on disk yet");
            return Ok(CheckOutcome::Missing);
        }
        Err(source) => {
            return Err(MergeError::OpenOutput {
                path: output,
                source,
            })
        }
    };

    if existing == fresh {
        Ok(CheckOutcome::UpToDate)
    } else {
        Ok(CheckOutcome::Stale)
    }
}

fn write_document(config: &MergeConfig, mut out: impl Write, sink: &Path) -> Result<MergeReport> {
    let write_err = |source: io::Error| MergeError::WriteOutput {
        path: sink.to_path_buf(),
        source,
    };
    let guard = config.guard();

    write!(out, "#ifndef {guard}\n#define {guard}\n").map_err(write_err)?;

    let mut sources = Vec::new();
    let mut reflect_merged = false;
    let mut lines_written = 3;

    for path in config.source_paths() {
        let stats = copy_source(&path, config.filter(), reflect_merged, &mut out, sink)?;
        lines_written += stats.lines_kept;
        reflect_merged |= is_reflect_header(&path);
        sources.push(stats);
    }

    out.write_all(b"#endif\n").map_err(write_err)?;

    Ok(MergeReport {
        output: sink.to_path_buf(),
        guard: guard.to_string(),
        sources,
        lines_written,
    })
}

fn copy_source(
    path: &Path,
    filter: &LineFilter,
    reflect_merged: bool,
    out: &mut impl Write,
    sink: &Path,
) -> Result<SourceStats> {
    let file = File::open(path).map_err(|source| MergeError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut stats = SourceStats {
        path: path.to_path_buf(),
        lines_read: 0,
        lines_kept: 0,
        lines_dropped: 0,
    };
    let mut warned = false;
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| MergeError::ReadInput {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        stats.lines_read += 1;

        if filter.is_dropped(&line) {
            stats.lines_dropped += 1;
            if !reflect_merged && !warned && line.starts_with(REFLECT_INCLUDE.as_bytes()) {
                warn!(
                    source = %path.display(),
                    "dropped `{REFLECT_INCLUDE}` but reflect.h was not merged ahead of this header"
                );
                warned = true;
            }
            continue;
        }

        // An unterminated last line would otherwise run into whatever follows.
        if !line.ends_with(b"\n") {
            line.push(b'\n');
        }

        out.write_all(&line)
            .map_err(|source| MergeError::WriteOutput {
                path: sink.to_path_buf(),
                source,
            })?;
        stats.lines_kept += 1;
    }

    debug!(
        source = %path.display(),
        read = stats.lines_read,
        kept = stats.lines_kept,
        dropped = stats.lines_dropped,
        "merged header"
    );

    Ok(stats)
}

/// The file a write to `output` should land in. Symlinks are followed so
/// renaming the staged file replaces the target, not the link; a dangling
/// link resolves to where it points.
fn resolve_output(output: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(output) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(output) {
            Ok(resolved) => Ok(resolved),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let link = fs::read_link(output)?;
                let dir = output.parent().unwrap_or_else(|| Path::new("."));
                Ok(dir.join(link))
            }
            Err(err) => Err(err),
        },
        Ok(_) => Ok(output.to_path_buf()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(output.to_path_buf()),
        Err(err) => Err(err),
    }
}

fn is_reflect_header(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "reflect.h")
}

/// Temp files are created owner-only; give the header the mode a plain
/// create would have had, or keep the mode of the file it replaces.
fn carry_permissions(staged: &File, output: &Path) -> io::Result<()> {
    match fs::metadata(output) {
        Ok(meta) => staged.set_permissions(meta.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => set_default_mode(staged),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn set_default_mode(staged: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    staged.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_mode(_staged: &File) -> io::Result<()> {
    Ok(())
}
