// mactext - converts text between MacRoman and UTF-8.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Converting whole files between MacRoman and UTF-8.

#![cfg_attr(not(test), warn(missing_docs))]
use std::{
    collections::TryReserveError,
    fs::{self, File, OpenOptions, Permissions},
    io::{BufWriter, Error as IoError, ErrorKind, Read, Write},
    path::{Path, PathBuf},
};

use log::debug;
use thiserror::Error as ThisError;

use crate::transcode::{Direction, Expand, Reduce};

/// An error converting a file.
///
/// Each message names the file involved and ends with the underlying
/// operating system error.
#[derive(ThisError, Debug)]
pub enum Error {
    /// The source file does not exist.
    #[error("Couldn't find source file \"{}\" ({source}).", .path.display())]
    SourceNotFound {
        /// Source file name.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },

    /// The source file exists but could not be opened.
    #[error("Couldn't open source file \"{}\" for reading ({source}).", .path.display())]
    OpenSource {
        /// Source file name.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },

    /// The source file's length and permissions could not be read.
    #[error("Couldn't measure length of source file \"{}\" ({source}).", .path.display())]
    SourceMetadata {
        /// Source file name.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },

    /// There is not enough memory to hold the source file.
    #[error("Not enough memory to read source file \"{}\" ({size} bytes).", .path.display())]
    OutOfMemory {
        /// Source file name.
        path: PathBuf,
        /// Size of the source file in bytes.
        size: u64,
        /// Underlying error.
        source: TryReserveError,
    },

    /// Reading the source file failed.
    #[error("Error reading source file \"{}\" ({source}).", .path.display())]
    ReadSource {
        /// Source file name.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },

    /// The directory that should contain the destination does not exist.
    #[error("Couldn't find location for destination file \"{}\".", .path.display())]
    DestinationDirNotFound {
        /// Destination file name.
        path: PathBuf,
    },

    /// The destination file could not be created.
    #[error("Error creating destination file \"{}\" ({source}).", .path.display())]
    CreateDestination {
        /// Destination file name.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },

    /// Writing the destination file failed.
    #[error("Error writing to destination file \"{}\" ({source}).", .path.display())]
    WriteDestination {
        /// Destination file name.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },

    /// Writing output to a stream other than a named file failed.
    #[error("Error writing output ({source}).")]
    WriteOutput {
        /// Underlying error.
        source: IoError,
    },

    /// The source file's permissions could not be applied to the destination.
    #[error("Error setting permissions of destination file \"{}\" ({source}).", .path.display())]
    SetPermissions {
        /// Destination file name.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },
}

/// Summary of a completed conversion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Number of bytes read from the source.
    pub read: usize,

    /// Number of bytes written to the destination.
    pub written: usize,

    /// Number of source bytes that had no MacRoman equivalent and were written
    /// as `?`.  Always zero for conversion to UTF-8.
    pub substitutions: usize,
}

/// Options for converting a file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Direction of conversion.
    pub direction: Direction,

    /// Whether to replace an existing destination file.  If false, converting
    /// to an existing file fails.
    pub overwrite: bool,

    /// Whether to give the destination file the same permissions as the
    /// source.
    pub permissions: bool,
}

impl ConvertOptions {
    /// Constructs options for converting in `direction`, without overwriting
    /// and with permissions copied to the destination.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            overwrite: false,
            permissions: true,
        }
    }

    /// Returns `self` with overwriting set to `overwrite`.
    pub fn with_overwrite(self, overwrite: bool) -> Self {
        Self { overwrite, ..self }
    }

    /// Returns `self` with permission copying set to `permissions`.
    pub fn with_permissions(self, permissions: bool) -> Self {
        Self {
            permissions,
            ..self
        }
    }

    /// Converts the file at `source` and writes the result to a new file at
    /// `destination`.
    pub fn convert_file(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<Report, Error> {
        let source = source.as_ref();
        let destination = destination.as_ref();
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(Error::DestinationDirNotFound {
                path: destination.into(),
            });
        }

        let (input, permissions) = read_source(source)?;

        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let file = options
            .open(destination)
            .map_err(|source| Error::CreateDestination {
                path: destination.into(),
                source,
            })?;

        let report = self
            .write_converted(&input, file)
            .map_err(|source| Error::WriteDestination {
                path: destination.into(),
                source,
            })?;

        if self.permissions {
            fs::set_permissions(destination, permissions).map_err(|source| {
                Error::SetPermissions {
                    path: destination.into(),
                    source,
                }
            })?;
        }

        debug!(
            "{} -> {} ({}): {report:?}",
            source.display(),
            destination.display(),
            self.direction
        );
        Ok(report)
    }

    /// Converts the file at `source` and writes the result to `writer`.
    ///
    /// Permissions and overwriting don't apply.
    pub fn convert_to_writer<W>(&self, source: impl AsRef<Path>, writer: W) -> Result<Report, Error>
    where
        W: Write,
    {
        let source = source.as_ref();
        let (input, _) = read_source(source)?;
        let report = self
            .write_converted(&input, writer)
            .map_err(|source| Error::WriteOutput { source })?;
        debug!("{} ({}): {report:?}", source.display(), self.direction);
        Ok(report)
    }

    /// Writes `input` converted in this direction to `writer`, one converted
    /// unit at a time.
    fn write_converted<W>(&self, input: &[u8], writer: W) -> Result<Report, IoError>
    where
        W: Write,
    {
        let mut writer = BufWriter::new(writer);
        let mut report = Report {
            read: input.len(),
            ..Report::default()
        };
        match self.direction {
            Direction::ToUtf8 => {
                for segment in Expand::new(input) {
                    writer.write_all(segment)?;
                    report.written += segment.len();
                }
            }
            Direction::ToMacRoman => {
                let mut reduce = Reduce::new(input);
                for byte in reduce.by_ref() {
                    writer.write_all(&[byte])?;
                    report.written += 1;
                }
                report.substitutions = reduce.substitutions();
            }
        }
        writer.flush()?;
        Ok(report)
    }
}

/// Reads all of `path` into memory.  Also returns its permissions.
fn read_source(path: &Path) -> Result<(Vec<u8>, Permissions), Error> {
    let mut file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::SourceNotFound {
            path: path.into(),
            source,
        },
        _ => Error::OpenSource {
            path: path.into(),
            source,
        },
    })?;

    let metadata = file.metadata().map_err(|source| Error::SourceMetadata {
        path: path.into(),
        source,
    })?;
    let size = metadata.len();

    let mut input = Vec::new();
    input
        .try_reserve_exact(usize::try_from(size).unwrap_or(usize::MAX))
        .map_err(|source| Error::OutOfMemory {
            path: path.into(),
            size,
            source,
        })?;
    file.read_to_end(&mut input)
        .map_err(|source| Error::ReadSource {
            path: path.into(),
            source,
        })?;
    Ok((input, metadata.permissions()))
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io::{Error as IoError, ErrorKind, Result as IoResult, Write},
        path::{Path, PathBuf},
    };

    use crate::{
        file::{ConvertOptions, Error, Report},
        transcode::Direction,
    };

    /// Returns an empty directory for test `name` to work in.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mactext-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(path: &Path, contents: &[u8]) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn to_utf8() {
        let dir = scratch_dir("to_utf8");
        let source = dir.join("source.txt");
        let destination = dir.join("destination.txt");
        write_file(&source, b"Caf\x8e\rna\x95ve\x11");

        let report = ConvertOptions::new(Direction::ToUtf8)
            .convert_file(&source, &destination)
            .unwrap();
        assert_eq!(fs::read(&destination).unwrap(), "Café\nnaïve⌘".as_bytes());
        assert_eq!(
            report,
            Report {
                read: 11,
                written: 15,
                substitutions: 0
            }
        );
    }

    #[test]
    fn to_mac_roman() {
        let dir = scratch_dir("to_mac_roman");
        let source = dir.join("source.txt");
        let destination = dir.join("destination.txt");
        write_file(&source, "Café\nā".as_bytes());

        let report = ConvertOptions::new(Direction::ToMacRoman)
            .convert_file(&source, &destination)
            .unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"Caf\x8e\r??");
        assert_eq!(
            report,
            Report {
                read: 8,
                written: 7,
                substitutions: 2
            }
        );
    }

    #[test]
    fn to_writer() {
        let dir = scratch_dir("to_writer");
        let source = dir.join("source.txt");
        write_file(&source, b"\xa5 item\r");

        let mut output = Vec::new();
        let report = ConvertOptions::new(Direction::ToUtf8)
            .convert_to_writer(&source, &mut output)
            .unwrap();
        assert_eq!(output, "• item\n".as_bytes());
        assert_eq!(report.written, output.len());
    }

    #[test]
    fn empty_file() {
        let dir = scratch_dir("empty_file");
        let source = dir.join("source.txt");
        let destination = dir.join("destination.txt");
        write_file(&source, b"");

        let report = ConvertOptions::new(Direction::ToMacRoman)
            .convert_file(&source, &destination)
            .unwrap();
        assert_eq!(report, Report::default());
        assert_eq!(fs::read(&destination).unwrap(), b"");
    }

    #[test]
    fn missing_source() {
        let dir = scratch_dir("missing_source");
        let source = dir.join("nonexistent.txt");
        let error = ConvertOptions::new(Direction::ToUtf8)
            .convert_file(&source, dir.join("destination.txt"))
            .unwrap_err();
        assert!(matches!(error, Error::SourceNotFound { .. }));
        let message = error.to_string();
        assert!(message.starts_with("Couldn't find source file \""));
        assert!(message.contains("nonexistent.txt"));
        assert!(!dir.join("destination.txt").exists());
    }

    #[test]
    fn missing_destination_directory() {
        let dir = scratch_dir("missing_destination_directory");
        let source = dir.join("source.txt");
        write_file(&source, b"text");
        let destination = dir.join("nonexistent").join("destination.txt");
        let error = ConvertOptions::new(Direction::ToUtf8)
            .convert_file(&source, &destination)
            .unwrap_err();
        assert!(matches!(&error, Error::DestinationDirNotFound { path } if *path == destination));
    }

    #[test]
    fn destination_directory_checked_before_source() {
        let dir = scratch_dir("destination_directory_checked_before_source");
        let destination = dir.join("nonexistent").join("destination.txt");
        let error = ConvertOptions::new(Direction::ToUtf8)
            .convert_file(dir.join("nonexistent.txt"), &destination)
            .unwrap_err();
        assert!(matches!(error, Error::DestinationDirNotFound { .. }));
        assert!(error.to_string().contains("destination.txt"));
    }

    #[test]
    fn source_is_directory() {
        let dir = scratch_dir("source_is_directory");
        let error = ConvertOptions::new(Direction::ToUtf8)
            .convert_file(&dir, dir.join("destination.txt"))
            .unwrap_err();
        // Some platforms refuse to open a directory, others refuse to read it.
        assert!(
            matches!(error, Error::ReadSource { .. } | Error::OpenSource { .. }),
            "unexpected error {error:?}"
        );
        assert!(!dir.join("destination.txt").exists());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> IoResult<usize> {
            Err(IoError::other("disk on fire"))
        }

        fn flush(&mut self) -> IoResult<()> {
            Err(IoError::other("disk on fire"))
        }
    }

    #[test]
    fn failing_writer() {
        let dir = scratch_dir("failing_writer");
        let source = dir.join("source.txt");
        write_file(&source, b"text\r");

        for direction in [Direction::ToUtf8, Direction::ToMacRoman] {
            let error = ConvertOptions::new(direction)
                .convert_to_writer(&source, FailingWriter)
                .unwrap_err();
            assert!(matches!(error, Error::WriteOutput { .. }), "{error:?}");
            assert_eq!(error.to_string(), "Error writing output (disk on fire).");
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn full_destination() {
        let dir = scratch_dir("full_destination");
        let source = dir.join("source.txt");
        write_file(&source, b"text");

        let error = ConvertOptions::new(Direction::ToUtf8)
            .with_overwrite(true)
            .with_permissions(false)
            .convert_file(&source, "/dev/full")
            .unwrap_err();
        let Error::WriteDestination { path, source } = &error else {
            panic!("unexpected error {error:?}");
        };
        assert_eq!(path, Path::new("/dev/full"));
        assert_eq!(source.raw_os_error(), Some(28));
        assert!(error.to_string().starts_with("Error writing to destination file \"/dev/full\""));
    }

    #[test]
    fn existing_destination() {
        let dir = scratch_dir("existing_destination");
        let source = dir.join("source.txt");
        let destination = dir.join("destination.txt");
        write_file(&source, b"new");
        write_file(&destination, b"old contents");

        let options = ConvertOptions::new(Direction::ToUtf8);
        let error = options.convert_file(&source, &destination).unwrap_err();
        let Error::CreateDestination { source: io_error, .. } = &error else {
            panic!("unexpected error {error:?}");
        };
        assert_eq!(io_error.kind(), ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&destination).unwrap(), b"old contents");

        options
            .with_overwrite(true)
            .convert_file(&source, &destination)
            .unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scratch_dir("permissions");
        let source = dir.join("source.txt");
        write_file(&source, b"text");
        fs::set_permissions(&source, fs::Permissions::from_mode(0o640)).unwrap();

        let copied = dir.join("copied.txt");
        ConvertOptions::new(Direction::ToUtf8)
            .convert_file(&source, &copied)
            .unwrap();
        let mode = fs::metadata(&copied).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);

        let uncopied = dir.join("uncopied.txt");
        ConvertOptions::new(Direction::ToUtf8)
            .with_permissions(false)
            .convert_file(&source, &uncopied)
            .unwrap();
        assert!(fs::metadata(&uncopied).unwrap().permissions().mode() & 0o200 != 0);
    }
}
