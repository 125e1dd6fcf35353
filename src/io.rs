//! File-level compress / decompress operations for the CLI.
//!
//! Each operation reads the whole source file, runs the in-memory
//! compressor or decompressor, and writes the destination in one piece.
//! The destination is opened with `create_new` unless overwriting was
//! forced, so an existing file is never clobbered by accident.
//!
//! Diagnostics and the summary line are emitted through
//! [`displaylevel!`](crate::displaylevel); errors are reported as
//! `io::Error` with library failures mapped onto `InvalidInput` /
//! `InvalidData`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};

use crate::compressor::{Compressor, Decompressor};
use crate::displaylevel;

/// Fails fast when the destination already exists and overwriting was not
/// forced.  Checked before any work happens so a long optimization cannot
/// end in a refused write.
fn check_overwrite(path: &str, force_overwrite: bool) -> io::Result<()> {
    if !force_overwrite && std::path::Path::new(path).exists() {
        displaylevel!(1, "Error: Already existing output file {}\n", path);
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{}: already exists", path),
        ));
    }
    Ok(())
}

/// Opens the destination path.  `create_new` re-checks the overwrite policy
/// at the filesystem level when overwriting was not forced.
fn open_dst_file(path: &str, force_overwrite: bool) -> io::Result<File> {
    if force_overwrite {
        return File::create(path);
    }
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// Compresses `src` into `dst` using the configured `compressor`.
///
/// Prints a `File compressed …` summary at display level 2+.
pub fn compress_filename(
    src: &str,
    dst: &str,
    compressor: &Compressor,
    backwards_mode: bool,
    force_overwrite: bool,
) -> io::Result<()> {
    check_overwrite(dst, force_overwrite)?;
    let input = std::fs::read(src).map_err(|e| {
        displaylevel!(1, "Error: Cannot read input file {}\n", src);
        e
    })?;
    if input.is_empty() {
        displaylevel!(1, "Error: Empty input file {}\n", src);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: empty input file", src),
        ));
    }

    let result = compressor
        .compress(&input)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut out_file = open_dst_file(dst, force_overwrite)?;
    out_file.write_all(&result.output)?;
    out_file.flush()?;

    displaylevel!(
        2,
        "File compressed{} from {} to {} bytes! (delta {})\n",
        if backwards_mode { " backwards" } else { "" },
        input.len(),
        result.output.len(),
        result.delta
    );
    Ok(())
}

/// Decompresses `src` into `dst` using the configured `decompressor`.
pub fn decompress_filename(
    src: &str,
    dst: &str,
    decompressor: &Decompressor,
    backwards_mode: bool,
    force_overwrite: bool,
) -> io::Result<()> {
    check_overwrite(dst, force_overwrite)?;
    let input = std::fs::read(src).map_err(|e| {
        displaylevel!(1, "Error: Cannot read input file {}\n", src);
        e
    })?;

    let output = decompressor.decompress(&input).map_err(|e| {
        displaylevel!(1, "Error: Invalid compressed data in file {}\n", src);
        io::Error::new(io::ErrorKind::InvalidData, e.to_string())
    })?;

    let mut out_file = open_dst_file(dst, force_overwrite)?;
    out_file.write_all(&output)?;
    out_file.flush()?;

    displaylevel!(
        2,
        "File decompressed{} from {} to {} bytes!\n",
        if backwards_mode { " backwards" } else { "" },
        input.len(),
        output.len()
    );
    Ok(())
}
