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

use std::{io::stdout, path::PathBuf};

use anyhow::Result;
use clap::Args;
use log::{info, warn};
use mactext::{Direction, file::ConvertOptions};

/// Convert a text file between MacRoman and UTF-8.
///
/// Line endings are swapped along the way: CR in MacRoman text becomes LF in
/// UTF-8 text, and vice versa.
#[derive(Args, Clone, Debug)]
pub struct Convert {
    /// Direction of conversion.
    #[arg(value_enum, ignore_case = true)]
    direction: Direction,

    /// Input file name.
    input: PathBuf,

    /// Output file name (if omitted, output is written to stdout).
    output: Option<PathBuf>,

    /// Replace the output file if it already exists.
    #[arg(short, long)]
    force: bool,

    /// Don't give the output file the input file's permissions.
    #[arg(long)]
    no_preserve_permissions: bool,
}

impl Convert {
    pub fn run(self) -> Result<()> {
        let options = ConvertOptions::new(self.direction)
            .with_overwrite(self.force)
            .with_permissions(!self.no_preserve_permissions);
        let report = match &self.output {
            Some(output) => options.convert_file(&self.input, output)?,
            None => options.convert_to_writer(&self.input, stdout().lock())?,
        };
        info!(
            "{}: converted {} bytes into {} bytes",
            self.input.display(),
            report.read,
            report.written
        );
        if report.substitutions > 0 {
            warn!(
                "{}: {} bytes have no MacRoman equivalent and were written as `?`",
                self.input.display(),
                report.substitutions
            );
        }
        Ok(())
    }
}
