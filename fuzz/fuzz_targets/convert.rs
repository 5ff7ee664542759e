#![no_main]

use eolify_utf16::{Converter, Error, ScanState, Strategy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // Control byte layout (data[0]):
    // bits 0-1: source flag, bits 2-3: destination flag
    // bit 4: swap
    // bit 5: undersize output buffer (exercise OutputBufferTooSmall)
    // data[1]: split point of the payload
    const FLAGS: [&str; 4] = ["-mac", "-unix", "-win", ""];
    let control = data[0];
    let strategy = Strategy::from_flags(
        FLAGS[usize::from(control & 0x03)],
        FLAGS[usize::from((control >> 2) & 0x03)],
    );
    let converter = Converter::new(strategy, control & 0x10 != 0);
    let undersize = control & 0x20 != 0;
    let payload = &data[2..];
    let split = usize::from(data[1]).min(payload.len());

    if undersize {
        let mut out = vec![0; Converter::max_output_size_for_chunk(payload.len()) - 1];
        match converter.convert_chunk(payload, &mut out, ScanState::default(), true) {
            Err(Error::OutputBufferTooSmall { .. }) => {}
            other => panic!("Unexpected result from convert_chunk: {other:?}"),
        }
        return;
    }

    let whole = converter.convert(payload);
    let (a, b) = payload.split_at(split);
    let mut out = vec![0; Converter::max_output_size_for_chunk(payload.len())];
    let first = converter
        .convert_chunk(a, &mut out, ScanState::default(), false)
        .unwrap();
    let mut combined = out[..first.output_len()].to_vec();
    let second = converter
        .convert_chunk(b, &mut out, first.state(), true)
        .unwrap();
    combined.extend_from_slice(&out[..second.output_len()]);
    assert_eq!(combined, whole);
});
