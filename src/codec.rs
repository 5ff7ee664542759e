//! Byte-pair codec.
//!
//! A UTF-16 stream is handled as a sequence of opaque 2-byte code units. This
//! module owns the code unit type, the byte-swap primitive and the unit-wise
//! read/write helpers.

use std::io::{self, Read, Write};

use crate::endian::Endianness;

/// A single 2-byte code unit, kept in stream order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeUnit([u8; 2]);

impl CodeUnit {
    #[must_use]
    pub const fn new(first: u8, second: u8) -> Self {
        Self([first, second])
    }

    /// The two bytes in stream order.
    #[must_use]
    pub const fn bytes(self) -> [u8; 2] {
        self.0
    }

    /// The same unit with its two bytes exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self([self.0[1], self.0[0]])
    }

    /// Build the unit carrying `signal` at the position `endianness` dictates,
    /// with the other byte set to zero.
    #[must_use]
    pub fn signal(endianness: Endianness, signal: u8) -> Self {
        let mut bytes = [0; 2];
        bytes[endianness.signal_index()] = signal;
        Self(bytes)
    }

    /// Whether this unit is exactly `0x00` paired with `signal` at the
    /// position `endianness` dictates.
    #[must_use]
    pub fn is_signal(self, endianness: Endianness, signal: u8) -> bool {
        self == Self::signal(endianness, signal)
    }

    /// Split the leading code unit off an aligned byte run.
    pub(crate) fn split_first(units: &[u8]) -> Option<(Self, &[u8])> {
        match units {
            [a, b, rest @ ..] => Some((Self([*a, *b]), rest)),
            _ => None,
        }
    }

    /// The code unit starting at byte `offset`, if a complete one is present.
    pub(crate) fn at(units: &[u8], offset: usize) -> Option<Self> {
        units
            .get(offset..offset + 2)
            .map(|pair| Self([pair[0], pair[1]]))
    }
}

/// Read one code unit from `reader`.
///
/// Returns `Ok(None)` at end of stream. A trailing odd byte is treated as end
/// of stream and discarded.
///
/// # Errors
///
/// Propagates any I/O error other than `Interrupted`.
pub fn read_unit<R: Read>(reader: &mut R) -> io::Result<Option<CodeUnit>> {
    let mut bytes = [0; 2];
    let mut filled = 0;
    while filled < bytes.len() {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) => return Ok(None),
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(Some(CodeUnit(bytes)))
}

/// Write one code unit to `writer`.
///
/// # Errors
///
/// Propagates the error of the underlying `write_all`.
pub fn write_unit<W: Write>(writer: &mut W, unit: CodeUnit) -> io::Result<()> {
    writer.write_all(&unit.0)
}
