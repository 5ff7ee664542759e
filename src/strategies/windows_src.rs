use crate::{
    codec::CodeUnit,
    endian::Endianness,
    strategies::{find_signal, Emitter},
    types::{CR, LF},
};

/// Collapse every CR, LF pair into one `destination` signal unit.
///
/// `saw_cr` is the scanner's state: when set, a CR was consumed at the end of
/// the previous run and has not been written yet.
pub(super) fn scan(
    units: &[u8],
    endianness: Endianness,
    destination: u8,
    saw_cr: &mut bool,
    out: &mut Emitter<'_>,
) {
    let mut read_pos = 0;

    if *saw_cr {
        let Some(next) = CodeUnit::at(units, 0) else {
            return;
        };
        *saw_cr = false;
        resolve_cr(next, endianness, destination, out);
        read_pos = 2;
    }

    while let Some(i) = find_signal(units, read_pos, CR, endianness) {
        out.run(&units[read_pos..i]);
        match CodeUnit::at(units, i + 2) {
            Some(next) => {
                resolve_cr(next, endianness, destination, out);
                read_pos = i + 4;
            }
            None => {
                // We found:
                // - a CR at the last position; its follower is in a later run
                *saw_cr = true;
                return;
            }
        }
    }
    out.run(&units[read_pos..]);
}

/// Emit a CR together with the unit that followed it. The follower is not
/// examined as the start of another CR, LF pair.
fn resolve_cr(next: CodeUnit, endianness: Endianness, destination: u8, out: &mut Emitter<'_>) {
    if next.is_signal(endianness, LF) {
        out.unit(CodeUnit::signal(endianness, destination));
    } else {
        out.unit(CodeUnit::signal(endianness, CR));
        out.unit(next);
    }
}
