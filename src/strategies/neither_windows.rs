use crate::{
    codec::CodeUnit,
    endian::Endianness,
    strategies::{find_signal, Emitter},
};

/// Replace every `source` signal unit with a `destination` signal unit.
pub(super) fn scan(
    units: &[u8],
    endianness: Endianness,
    source: u8,
    destination: u8,
    out: &mut Emitter<'_>,
) {
    let replacement = CodeUnit::signal(endianness, destination);

    let mut read_pos = 0;
    while let Some(i) = find_signal(units, read_pos, source, endianness) {
        out.run(&units[read_pos..i]);
        out.unit(replacement);
        read_pos = i + 2;
    }
    out.run(&units[read_pos..]);
}
