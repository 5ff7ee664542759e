use crate::{
    codec::CodeUnit,
    endian::Endianness,
    strategies::{find_signal, Emitter},
    types::{CR, LF},
};

/// Expand every `source` signal unit into the two units CR, LF.
pub(super) fn scan(units: &[u8], endianness: Endianness, source: u8, out: &mut Emitter<'_>) {
    let cr = CodeUnit::signal(endianness, CR);
    let lf = CodeUnit::signal(endianness, LF);

    let mut read_pos = 0;
    while let Some(i) = find_signal(units, read_pos, source, endianness) {
        out.run(&units[read_pos..i]);
        out.unit(cr);
        out.unit(lf);
        read_pos = i + 2;
    }
    out.run(&units[read_pos..]);
}
