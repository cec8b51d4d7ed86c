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

//! The MacRoman character set, as a table of UTF-8 sequences.
//!
//! The low half of MacRoman is ASCII.  The table covers the high half, bytes
//! `0x80` through `0xff`, in ascending order.

#![cfg_attr(not(test), warn(missing_docs))]

/// Maximum length of the UTF-8 sequence in a single table entry.
pub const MAX_SEQUENCE_LEN: usize = 4;

/// First byte covered by a [CodepointTable].
const FIRST_BYTE: u8 = 0x80;

/// The UTF-8 sequence for one legacy byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    bytes: [u8; MAX_SEQUENCE_LEN],
    len: u8,
}

impl Entry {
    const fn new(utf8: &[u8]) -> Self {
        assert!(!utf8.is_empty() && utf8.len() <= MAX_SEQUENCE_LEN);
        let mut bytes = [0; MAX_SEQUENCE_LEN];
        let mut i = 0;
        while i < utf8.len() {
            assert!(utf8[i] != 0);
            bytes[i] = utf8[i];
            i += 1;
        }
        Self {
            bytes,
            len: utf8.len() as u8,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// Maps each byte in `0x80..=0xff` of an 8-bit character set to UTF-8.
#[derive(Clone, Debug)]
pub struct CodepointTable {
    entries: [Entry; 128],
}

impl CodepointTable {
    /// Returns the UTF-8 sequence for `byte`, or `None` if `byte` is below
    /// `0x80` and therefore not in the table.
    pub fn lookup_by_legacy_byte(&self, byte: u8) -> Option<&[u8]> {
        let index = byte.checked_sub(FIRST_BYTE)?;
        Some(self.entries[index as usize].as_bytes())
    }

    /// Looks for a table entry whose UTF-8 sequence appears in `input` at
    /// `offset`.  Returns the entry's legacy byte and the length of its
    /// sequence, or `None` if no entry matches.
    ///
    /// A sequence only matches if all of it lies within `input`, so a
    /// truncated sequence at the end of `input` never matches.  Entries are
    /// tried in ascending order of legacy byte and the first match wins, even
    /// if a later entry would match more bytes.
    pub fn lookup_by_utf8_prefix(&self, input: &[u8], offset: usize) -> Option<(u8, usize)> {
        let rest = input.get(offset..)?;
        self.iter()
            .find(|(_, utf8)| rest.starts_with(utf8))
            .map(|(byte, utf8)| (byte, utf8.len()))
    }

    /// Iterates over the table's `(legacy byte, UTF-8 sequence)` pairs in
    /// ascending order of legacy byte.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> {
        (FIRST_BYTE..=u8::MAX).zip(self.entries.iter().map(Entry::as_bytes))
    }
}

/// The MacRoman character set, as revised by Apple in Mac OS 8.5 to put the
/// euro sign at `0xdb`.
#[rustfmt::skip]
pub static MAC_ROMAN: CodepointTable = CodepointTable {
    entries: [
        Entry::new(&[0xc3, 0x84]), // 0x80 Ä
        Entry::new(&[0xc3, 0x85]), // 0x81 Å
        Entry::new(&[0xc3, 0x87]), // 0x82 Ç
        Entry::new(&[0xc3, 0x89]), // 0x83 É
        Entry::new(&[0xc3, 0x91]), // 0x84 Ñ
        Entry::new(&[0xc3, 0x96]), // 0x85 Ö
        Entry::new(&[0xc3, 0x9c]), // 0x86 Ü
        Entry::new(&[0xc3, 0xa1]), // 0x87 á
        Entry::new(&[0xc3, 0xa0]), // 0x88 à
        Entry::new(&[0xc3, 0xa2]), // 0x89 â
        Entry::new(&[0xc3, 0xa4]), // 0x8a ä
        Entry::new(&[0xc3, 0xa3]), // 0x8b ã
        Entry::new(&[0xc3, 0xa5]), // 0x8c å
        Entry::new(&[0xc3, 0xa7]), // 0x8d ç
        Entry::new(&[0xc3, 0xa9]), // 0x8e é
        Entry::new(&[0xc3, 0xa8]), // 0x8f è
        Entry::new(&[0xc3, 0xaa]), // 0x90 ê
        Entry::new(&[0xc3, 0xab]), // 0x91 ë
        Entry::new(&[0xc3, 0xad]), // 0x92 í
        Entry::new(&[0xc3, 0xac]), // 0x93 ì
        Entry::new(&[0xc3, 0xae]), // 0x94 î
        Entry::new(&[0xc3, 0xaf]), // 0x95 ï
        Entry::new(&[0xc3, 0xb1]), // 0x96 ñ
        Entry::new(&[0xc3, 0xb3]), // 0x97 ó
        Entry::new(&[0xc3, 0xb2]), // 0x98 ò
        Entry::new(&[0xc3, 0xb4]), // 0x99 ô
        Entry::new(&[0xc3, 0xb6]), // 0x9a ö
        Entry::new(&[0xc3, 0xb5]), // 0x9b õ
        Entry::new(&[0xc3, 0xba]), // 0x9c ú
        Entry::new(&[0xc3, 0xb9]), // 0x9d ù
        Entry::new(&[0xc3, 0xbb]), // 0x9e û
        Entry::new(&[0xc3, 0xbc]), // 0x9f ü
        Entry::new(&[0xe2, 0x80, 0xa0]), // 0xa0 †
        Entry::new(&[0xc2, 0xb0]), // 0xa1 °
        Entry::new(&[0xc2, 0xa2]), // 0xa2 ¢
        Entry::new(&[0xc2, 0xa3]), // 0xa3 £
        Entry::new(&[0xc2, 0xa7]), // 0xa4 §
        Entry::new(&[0xe2, 0x80, 0xa2]), // 0xa5 •
        Entry::new(&[0xc2, 0xb6]), // 0xa6 ¶
        Entry::new(&[0xc3, 0x9f]), // 0xa7 ß
        Entry::new(&[0xc2, 0xae]), // 0xa8 ®
        Entry::new(&[0xc2, 0xa9]), // 0xa9 ©
        Entry::new(&[0xe2, 0x84, 0xa2]), // 0xaa ™
        Entry::new(&[0xc2, 0xb4]), // 0xab ´
        Entry::new(&[0xc2, 0xa8]), // 0xac ¨
        Entry::new(&[0xe2, 0x89, 0xa0]), // 0xad ≠
        Entry::new(&[0xc3, 0x86]), // 0xae Æ
        Entry::new(&[0xc3, 0x98]), // 0xaf Ø
        Entry::new(&[0xe2, 0x88, 0x9e]), // 0xb0 ∞
        Entry::new(&[0xc2, 0xb1]), // 0xb1 ±
        Entry::new(&[0xe2, 0x89, 0xa4]), // 0xb2 ≤
        Entry::new(&[0xe2, 0x89, 0xa5]), // 0xb3 ≥
        Entry::new(&[0xc2, 0xa5]), // 0xb4 ¥
        Entry::new(&[0xc2, 0xb5]), // 0xb5 µ
        Entry::new(&[0xe2, 0x88, 0x82]), // 0xb6 ∂
        Entry::new(&[0xe2, 0x88, 0x91]), // 0xb7 ∑
        Entry::new(&[0xe2, 0x88, 0x8f]), // 0xb8 ∏
        Entry::new(&[0xcf, 0x80]), // 0xb9 π
        Entry::new(&[0xe2, 0x88, 0xab]), // 0xba ∫
        Entry::new(&[0xc2, 0xaa]), // 0xbb ª
        Entry::new(&[0xc2, 0xba]), // 0xbc º
        Entry::new(&[0xce, 0xa9]), // 0xbd Ω
        Entry::new(&[0xc3, 0xa6]), // 0xbe æ
        Entry::new(&[0xc3, 0xb8]), // 0xbf ø
        Entry::new(&[0xc2, 0xbf]), // 0xc0 ¿
        Entry::new(&[0xc2, 0xa1]), // 0xc1 ¡
        Entry::new(&[0xc2, 0xac]), // 0xc2 ¬
        Entry::new(&[0xe2, 0x88, 0x9a]), // 0xc3 √
        Entry::new(&[0xc6, 0x92]), // 0xc4 ƒ
        Entry::new(&[0xe2, 0x89, 0x88]), // 0xc5 ≈
        Entry::new(&[0xe2, 0x88, 0x86]), // 0xc6 ∆
        Entry::new(&[0xc2, 0xab]), // 0xc7 «
        Entry::new(&[0xc2, 0xbb]), // 0xc8 »
        Entry::new(&[0xe2, 0x80, 0xa6]), // 0xc9 …
        Entry::new(&[0xc2, 0xa0]), // 0xca no-break space
        Entry::new(&[0xc3, 0x80]), // 0xcb À
        Entry::new(&[0xc3, 0x83]), // 0xcc Ã
        Entry::new(&[0xc3, 0x95]), // 0xcd Õ
        Entry::new(&[0xc5, 0x92]), // 0xce Œ
        Entry::new(&[0xc5, 0x93]), // 0xcf œ
        Entry::new(&[0xe2, 0x80, 0x93]), // 0xd0 –
        Entry::new(&[0xe2, 0x80, 0x94]), // 0xd1 —
        Entry::new(&[0xe2, 0x80, 0x9c]), // 0xd2 “
        Entry::new(&[0xe2, 0x80, 0x9d]), // 0xd3 ”
        Entry::new(&[0xe2, 0x80, 0x98]), // 0xd4 ‘
        Entry::new(&[0xe2, 0x80, 0x99]), // 0xd5 ’
        Entry::new(&[0xc3, 0xb7]), // 0xd6 ÷
        Entry::new(&[0xe2, 0x97, 0x8a]), // 0xd7 ◊
        Entry::new(&[0xc3, 0xbf]), // 0xd8 ÿ
        Entry::new(&[0xc5, 0xb8]), // 0xd9 Ÿ
        Entry::new(&[0xe2, 0x81, 0x84]), // 0xda ⁄
        Entry::new(&[0xe2, 0x82, 0xac]), // 0xdb €
        Entry::new(&[0xe2, 0x80, 0xb9]), // 0xdc ‹
        Entry::new(&[0xe2, 0x80, 0xba]), // 0xdd ›
        Entry::new(&[0xef, 0xac, 0x81]), // 0xde ﬁ
        Entry::new(&[0xef, 0xac, 0x82]), // 0xdf ﬂ
        Entry::new(&[0xe2, 0x80, 0xa1]), // 0xe0 ‡
        Entry::new(&[0xc2, 0xb7]), // 0xe1 ·
        Entry::new(&[0xe2, 0x80, 0x9a]), // 0xe2 ‚
        Entry::new(&[0xe2, 0x80, 0x9e]), // 0xe3 „
        Entry::new(&[0xe2, 0x80, 0xb0]), // 0xe4 ‰
        Entry::new(&[0xc3, 0x82]), // 0xe5 Â
        Entry::new(&[0xc3, 0x8a]), // 0xe6 Ê
        Entry::new(&[0xc3, 0x81]), // 0xe7 Á
        Entry::new(&[0xc3, 0x8b]), // 0xe8 Ë
        Entry::new(&[0xc3, 0x88]), // 0xe9 È
        Entry::new(&[0xc3, 0x8d]), // 0xea Í
        Entry::new(&[0xc3, 0x8e]), // 0xeb Î
        Entry::new(&[0xc3, 0x8f]), // 0xec Ï
        Entry::new(&[0xc3, 0x8c]), // 0xed Ì
        Entry::new(&[0xc3, 0x93]), // 0xee Ó
        Entry::new(&[0xc3, 0x94]), // 0xef Ô
        Entry::new(&[0xef, 0xa3, 0xbf]), // 0xf0 Apple logo (private use)
        Entry::new(&[0xc3, 0x92]), // 0xf1 Ò
        Entry::new(&[0xc3, 0x9a]), // 0xf2 Ú
        Entry::new(&[0xc3, 0x9b]), // 0xf3 Û
        Entry::new(&[0xc3, 0x99]), // 0xf4 Ù
        Entry::new(&[0xc4, 0xb1]), // 0xf5 ı
        Entry::new(&[0xcb, 0x86]), // 0xf6 ˆ
        Entry::new(&[0xcb, 0x9c]), // 0xf7 ˜
        Entry::new(&[0xc2, 0xaf]), // 0xf8 ¯
        Entry::new(&[0xcb, 0x98]), // 0xf9 ˘
        Entry::new(&[0xcb, 0x99]), // 0xfa ˙
        Entry::new(&[0xcb, 0x9a]), // 0xfb ˚
        Entry::new(&[0xc2, 0xb8]), // 0xfc ¸
        Entry::new(&[0xcb, 0x9d]), // 0xfd ˝
        Entry::new(&[0xcb, 0x9b]), // 0xfe ˛
        Entry::new(&[0xcb, 0x87]), // 0xff ˇ
    ],
};
