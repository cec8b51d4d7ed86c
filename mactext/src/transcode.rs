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

//! Converting text between MacRoman and UTF-8.
//!
//! [expand] converts MacRoman to UTF-8 and [reduce] converts UTF-8 back to
//! MacRoman.  Both are total: every input produces some output.  Both also
//! swap carriage return and line feed, since classic Mac OS ended lines with
//! CR where other systems use LF.

#![cfg_attr(not(test), warn(missing_docs))]
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    iter::FusedIterator,
    slice,
};

use clap::ValueEnum;

use crate::table::{MAC_ROMAN, MAX_SEQUENCE_LEN};

/// UTF-8 encoding of U+2318 PLACE OF INTEREST SIGN, the command-key glyph.
pub const COMMAND_KEY: [u8; 3] = [0xe2, 0x8c, 0x98];

/// Control code that Mac OS system fonts draw as the command-key glyph.
pub const COMMAND_KEY_BYTE: u8 = 0x11;

/// Byte that [reduce] emits for input with no MacRoman equivalent.
pub const REPLACEMENT: u8 = b'?';

static ASCII: [u8; 128] = {
    let mut ascii = [0; 128];
    let mut i = 0;
    while i < ascii.len() {
        ascii[i] = i as u8;
        i += 1;
    }
    ascii
};

/// Swaps carriage return and line feed.  Other bytes are returned unchanged.
pub const fn swap_line_ending(byte: u8) -> u8 {
    match byte {
        b'\r' => b'\n',
        b'\n' => b'\r',
        other => other,
    }
}

/// Returns the UTF-8 output for MacRoman `byte`.
pub fn expand_byte(byte: u8) -> &'static [u8] {
    match MAC_ROMAN.lookup_by_legacy_byte(byte) {
        Some(utf8) => utf8,
        None if byte == COMMAND_KEY_BYTE => &COMMAND_KEY,
        None => slice::from_ref(&ASCII[swap_line_ending(byte) as usize]),
    }
}

/// Iterator over the UTF-8 output of [expand], one segment per input byte.
#[derive(Clone, Debug)]
pub struct Expand<'a> {
    input: slice::Iter<'a, u8>,
}

impl<'a> Expand<'a> {
    /// Constructs a new iterator over the UTF-8 form of MacRoman `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input: input.iter(),
        }
    }
}

impl Iterator for Expand<'_> {
    type Item = &'static [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.input.next().map(|&byte| expand_byte(byte))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.input.size_hint()
    }
}

impl ExactSizeIterator for Expand<'_> {}

impl FusedIterator for Expand<'_> {}

/// Converts MacRoman `input` to UTF-8.
///
/// Bytes `0x80` and above become their UTF-8 equivalents, byte `0x11` becomes
/// the command-key glyph `⌘`, CR and LF are swapped, and everything else is
/// copied unchanged.
pub fn expand(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    for segment in Expand::new(input) {
        output.extend_from_slice(segment);
    }
    output
}

/// Iterator over the MacRoman output of [reduce].
///
/// Each call to [Iterator::next] consumes one ASCII byte, one complete UTF-8
/// sequence from the MacRoman table, or (if neither applies) one byte that is
/// replaced by [REPLACEMENT].
#[derive(Clone, Debug)]
pub struct Reduce<'a> {
    input: &'a [u8],
    offset: usize,
    substitutions: usize,
}

impl<'a> Reduce<'a> {
    /// Constructs a new iterator over the MacRoman form of UTF-8 `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            substitutions: 0,
        }
    }

    /// Returns the number of input bytes replaced by [REPLACEMENT] so far.
    pub fn substitutions(&self) -> usize {
        self.substitutions
    }

    /// Returns the part of the input not yet consumed.
    pub fn remainder(&self) -> &'a [u8] {
        &self.input[self.offset..]
    }
}

impl Iterator for Reduce<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.input.get(self.offset)?;
        if byte < 0x80 {
            self.offset += 1;
            Some(swap_line_ending(byte))
        } else if let Some((legacy, len)) = MAC_ROMAN.lookup_by_utf8_prefix(self.input, self.offset)
        {
            self.offset += len;
            Some(legacy)
        } else {
            self.offset += 1;
            self.substitutions += 1;
            Some(REPLACEMENT)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.input.len() - self.offset;
        (remaining.div_ceil(MAX_SEQUENCE_LEN), Some(remaining))
    }
}

impl FusedIterator for Reduce<'_> {}

/// Converts UTF-8 `input` to MacRoman.
///
/// ASCII bytes are copied unchanged, except that CR and LF are swapped.  Each
/// UTF-8 sequence in the MacRoman table becomes its MacRoman byte.  Any other
/// byte, including each byte of a malformed or truncated sequence, becomes
/// `?`.
///
/// This is not an exact inverse of [expand]: the command-key glyph that
/// [expand] produces for byte `0x11` has no table entry, so it reduces to
/// `???`.
pub fn reduce(input: &[u8]) -> Vec<u8> {
    Reduce::new(input).collect()
}

/// Direction of a conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// MacRoman to UTF-8.
    #[value(name = "to-utf8", alias = "toutf8")]
    ToUtf8,

    /// UTF-8 to MacRoman.
    #[value(name = "to-mac-roman", alias = "tomacroman")]
    ToMacRoman,
}

impl Direction {
    /// Converts `input` in this direction.
    pub fn convert(self, input: &[u8]) -> Vec<u8> {
        match self {
            Direction::ToUtf8 => expand(input),
            Direction::ToMacRoman => reduce(input),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Direction::ToUtf8 => "to-utf8",
            Direction::ToMacRoman => "to-mac-roman",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
