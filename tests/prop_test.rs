use eolify_utf16::{
    read_unit, write_unit, CodeUnit, Converter, Endianness, ScanState, Strategy, CR, LF,
};
use proptest::{
    arbitrary::any, collection::vec, prop_assert, prop_assert_eq, prop_oneof, proptest,
    strategy::Just, strategy::Strategy as _, test_runner::Config,
};

/// Unit-at-a-time conversion through the byte-pair codec, used as the model
/// the chunked engine has to agree with.
fn model(strategy: Strategy, swap: bool, input: &[u8]) -> Vec<u8> {
    let mut reader = input;
    let mut out = Vec::new();
    let emit = |out: &mut Vec<u8>, unit: CodeUnit| {
        write_unit(out, if swap { unit.swapped() } else { unit }).unwrap();
    };

    let Some(bom) = read_unit(&mut reader).unwrap() else {
        return out;
    };
    if strategy == Strategy::Identity {
        emit(&mut out, bom);
        while let Some(unit) = read_unit(&mut reader).unwrap() {
            emit(&mut out, unit);
        }
        return out;
    }

    let endianness = Endianness::detect(bom);
    emit(&mut out, bom);
    while let Some(unit) = read_unit(&mut reader).unwrap() {
        match strategy {
            Strategy::Identity => unreachable!(),
            Strategy::WindowsDest { source } if unit.is_signal(endianness, source) => {
                emit(&mut out, CodeUnit::signal(endianness, CR));
                emit(&mut out, CodeUnit::signal(endianness, LF));
            }
            Strategy::NeitherWindows {
                source,
                destination,
            } if unit.is_signal(endianness, source) => {
                emit(&mut out, CodeUnit::signal(endianness, destination));
            }
            Strategy::WindowsSrc { destination } if unit.is_signal(endianness, CR) => {
                match read_unit(&mut reader).unwrap() {
                    Some(next) if next.is_signal(endianness, LF) => {
                        emit(&mut out, CodeUnit::signal(endianness, destination));
                    }
                    Some(next) => {
                        emit(&mut out, unit);
                        emit(&mut out, next);
                    }
                    None => emit(&mut out, unit),
                }
            }
            _ => emit(&mut out, unit),
        }
    }
    out
}

fn flag() -> impl proptest::strategy::Strategy<Value = &'static str> {
    prop_oneof![Just("-mac"), Just("-unix"), Just("-win"), Just("-none")]
}

fn strategies() -> impl proptest::strategy::Strategy<Value = Strategy> {
    (flag(), flag()).prop_map(|(src, dst)| Strategy::from_flags(src, dst))
}

/// Bytes biased toward CR, LF, NUL and the two byte-order marks.
fn utf16ish() -> impl proptest::strategy::Strategy<Value = Vec<u8>> {
    let bom = prop_oneof![
        Just(vec![0xff, 0xfe]),
        Just(vec![0xfe, 0xff]),
        vec(any::<u8>(), 0..3)
    ];
    let byte = prop_oneof![Just(0x00u8), Just(CR), Just(LF), any::<u8>()];
    (bom, vec(byte, 0..256)).prop_map(|(mut bom, body)| {
        bom.extend(body);
        bom
    })
}

fn count_signals(input: &[u8], signal: u8) -> usize {
    let Some(bom) = input.get(..2) else {
        return 0;
    };
    let endianness = Endianness::detect(CodeUnit::new(bom[0], bom[1]));
    input[2..]
        .chunks_exact(2)
        .filter(|pair| CodeUnit::new(pair[0], pair[1]).is_signal(endianness, signal))
        .count()
}

proptest! {
    #![proptest_config(Config::with_cases(5000))]

    #[test]
    fn matches_unit_model(strategy in strategies(), swap in any::<bool>(), data in utf16ish()) {
        let converter = Converter::new(strategy, swap);
        prop_assert_eq!(converter.convert(&data), model(strategy, swap, &data));
    }

    #[test]
    fn chunk_split_invariance(
        strategy in strategies(),
        swap in any::<bool>(),
        data in utf16ish(),
        splits in vec(any::<u8>(), 0..6),
    ) {
        let converter = Converter::new(strategy, swap);
        let expected = converter.convert(&data);

        let mut cuts: Vec<usize> = splits.iter().map(|&s| (s as usize).min(data.len())).collect();
        cuts.push(0);
        cuts.push(data.len());
        cuts.sort_unstable();

        let mut combined = Vec::new();
        let mut state = ScanState::default();
        for (i, window) in cuts.windows(2).enumerate() {
            let chunk = &data[window[0]..window[1]];
            let mut out = vec![0; Converter::max_output_size_for_chunk(chunk.len())];
            let status = converter
                .convert_chunk(chunk, &mut out, state, i + 2 == cuts.len())
                .expect("output buffer too small");
            combined.extend_from_slice(&out[..status.output_len()]);
            state = status.state();
        }
        prop_assert_eq!(combined, expected);
    }

    #[test]
    fn windows_dest_adds_one_unit_per_signal(data in utf16ish(), swap in any::<bool>()) {
        let converter = Converter::new(Strategy::from_flags("-unix", "-win"), swap);
        let out = converter.convert(&data);
        let units_in = data.len() / 2;
        prop_assert_eq!(out.len() / 2, units_in + count_signals(&data, LF));
    }

    #[test]
    fn neither_windows_preserves_unit_count(data in utf16ish(), swap in any::<bool>()) {
        let converter = Converter::new(Strategy::from_flags("-mac", "-unix"), swap);
        let out = converter.convert(&data);
        prop_assert_eq!(out.len(), data.len() & !1);
        if !swap {
            prop_assert_eq!(count_signals(&out, CR), 0);
        }
    }

    #[test]
    fn windows_src_never_grows(data in utf16ish()) {
        let converter = Converter::new(Strategy::from_flags("-win", "-unix"), false);
        let out = converter.convert(&data);
        prop_assert!(out.len() <= data.len() & !1);
    }

    #[test]
    fn swap_twice_is_identity(data in utf16ish()) {
        let swap = Converter::new(Strategy::Identity, true);
        prop_assert_eq!(swap.convert(&swap.convert(&data)), data[..data.len() & !1].to_vec());
    }
}
