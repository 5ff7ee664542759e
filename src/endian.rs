use crate::codec::CodeUnit;

/// Byte order of a UTF-16 stream, derived once from its byte-order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Classify a stream from its first code unit.
    ///
    /// Big-endian iff the second byte is `0xFF` (the `FE FF` mark), little-endian
    /// otherwise.
    #[must_use]
    pub fn detect(bom: CodeUnit) -> Self {
        if bom.bytes()[1] == 0xff {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    /// Index of the byte holding a CR/LF signal within a code unit.
    #[must_use]
    pub const fn signal_index(self) -> usize {
        match self {
            Endianness::Little => 0,
            Endianness::Big => 1,
        }
    }
}
