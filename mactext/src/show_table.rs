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

use std::io::{Write, stdout};

use anyhow::Result;
use clap::{Args, ValueEnum};
use mactext::table::MAC_ROMAN;
use serde::Serialize;

/// Show the table that maps MacRoman bytes 0x80 through 0xff to UTF-8.
#[derive(Args, Clone, Debug)]
pub struct ShowTable {
    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t)]
    format: TableFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
enum TableFormat {
    /// One line per entry.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Serialize)]
struct Row {
    byte: u8,
    code_point: String,
    utf8: String,
    character: String,
}

impl Row {
    fn new(byte: u8, utf8: &[u8]) -> Self {
        let character = String::from_utf8_lossy(utf8).into_owned();
        let code_point = character
            .chars()
            .next()
            .map_or_else(String::new, |c| format!("U+{:04X}", u32::from(c)));
        Self {
            byte,
            code_point,
            utf8: utf8
                .iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" "),
            character,
        }
    }
}

impl ShowTable {
    pub fn run(self) -> Result<()> {
        let rows = MAC_ROMAN
            .iter()
            .map(|(byte, utf8)| Row::new(byte, utf8))
            .collect::<Vec<_>>();
        let mut stdout = stdout().lock();
        match self.format {
            TableFormat::Text => {
                for row in &rows {
                    writeln!(
                        stdout,
                        "{:#04x}  {:<8}{:<10}{}",
                        row.byte, row.code_point, row.utf8, row.character
                    )?;
                }
            }
            TableFormat::Json => {
                serde_json::to_writer_pretty(&mut stdout, &rows)?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }
}
