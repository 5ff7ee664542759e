use memchr::memchr;

use crate::{
    codec::CodeUnit,
    endian::Endianness,
    newline::{resolve, LineEnding},
    types::{CR, NUL},
    Error, Result,
};

mod neither_windows;
mod windows_dest;
mod windows_src;

/// Conversion algorithm, chosen once from the source and destination conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Copy every code unit; no newline interpretation.
    Identity,
    /// Expand each `source` signal unit into CR, LF.
    WindowsDest { source: u8 },
    /// Collapse each CR, LF pair into one `destination` signal unit.
    WindowsSrc { destination: u8 },
    /// Replace each `source` signal unit with a `destination` signal unit.
    NeitherWindows { source: u8, destination: u8 },
}

impl Strategy {
    /// Select the strategy converting `source` line endings to `destination`.
    ///
    /// Equal conventions (including both unset) select `Identity`. An unset side
    /// that still needs a signal byte uses NUL.
    #[must_use]
    pub fn select(source: Option<LineEnding>, destination: Option<LineEnding>) -> Self {
        let signal = |flag| resolve(flag).unwrap_or(NUL);
        match (source, destination) {
            (s, d) if s == d => Strategy::Identity,
            (Some(LineEnding::Windows), d) => Strategy::WindowsSrc {
                destination: signal(d),
            },
            (s, Some(LineEnding::Windows)) => Strategy::WindowsDest { source: signal(s) },
            (s, d) => Strategy::NeitherWindows {
                source: signal(s),
                destination: signal(d),
            },
        }
    }

    /// Select the strategy from the raw command-line flags.
    #[must_use]
    pub fn from_flags(source: &str, destination: &str) -> Self {
        Self::select(
            LineEnding::from_flag(source),
            LineEnding::from_flag(destination),
        )
    }
}

/// State carried from one chunk to the next.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    carry: Option<u8>,
    endianness: Option<Endianness>,
    saw_cr: bool,
}

impl ScanState {
    /// Byte order detected from the byte-order mark, once it has been seen.
    #[must_use]
    pub fn endianness(&self) -> Option<Endianness> {
        self.endianness
    }

    /// Whether the last processed code unit was a CR whose follower has not been
    /// seen yet.
    #[must_use]
    pub fn saw_cr(&self) -> bool {
        self.saw_cr
    }

    /// Whether half a code unit is held back until the next chunk.
    #[must_use]
    pub fn has_carry(&self) -> bool {
        self.carry.is_some()
    }
}

/// Status returned by `convert_chunk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertChunkResult {
    output_len: usize,
    state: ScanState,
}

impl ConvertChunkResult {
    /// Number of bytes written into the output buffer for this chunk.
    #[must_use]
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// State to pass to the next invocation of `convert_chunk`.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }
}

/// A strategy together with the output swap flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Converter {
    strategy: Strategy,
    swap: bool,
}

impl Converter {
    #[must_use]
    pub const fn new(strategy: Strategy, swap: bool) -> Self {
        Self { strategy, swap }
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub const fn swap(&self) -> bool {
        self.swap
    }

    /// Worst-case output size for an input chunk of `chunk_size` bytes.
    #[must_use]
    pub const fn max_output_size_for_chunk(chunk_size: usize) -> usize {
        // Worst case is WindowsDest with every unit matching: each unit (including
        // one completed from a carried byte) becomes four bytes. WindowsSrc can also
        // flush a CR held over from the previous chunk, which the extra slack covers.
        chunk_size * 2 + 4
    }

    /// Convert a single chunk of input into the provided `output` buffer.
    ///
    /// Parameters:
    /// - `input`: bytes to convert, not necessarily aligned to code units
    /// - `output`: destination buffer, see `max_output_size_for_chunk`
    /// - `state`: state returned for the previous chunk, default for the first
    /// - `is_last_chunk`: set to `true` for the final chunk of the stream
    ///
    /// # Errors
    ///
    /// Returns `Err(Error::OutputBufferTooSmall { required })` if `output` is too
    /// small to hold the worst-case expansion of `input`.
    pub fn convert_chunk(
        &self,
        input: &[u8],
        output: &mut [u8],
        state: ScanState,
        is_last_chunk: bool,
    ) -> Result<ConvertChunkResult> {
        let required = Self::max_output_size_for_chunk(input.len());
        if output.len() < required {
            return Err(Error::OutputBufferTooSmall { required });
        }

        let mut state = state;
        let mut out = Emitter::new(output, self.swap);
        let mut input = input;

        if let Some(first) = state.carry.take() {
            match input.split_first() {
                Some((&second, rest)) => {
                    self.scan(&[first, second], &mut state, &mut out);
                    input = rest;
                }
                None => state.carry = Some(first),
            }
        }

        let aligned = input.len() & !1;
        self.scan(&input[..aligned], &mut state, &mut out);
        if aligned < input.len() {
            state.carry = Some(input[aligned]);
        }

        if is_last_chunk {
            // A dangling half unit is dropped; a dangling CR is kept.
            state.carry = None;
            if let (true, Some(endianness)) = (state.saw_cr, state.endianness) {
                out.unit(CodeUnit::signal(endianness, CR));
                state.saw_cr = false;
            }
        }

        Ok(ConvertChunkResult {
            output_len: out.len(),
            state,
        })
    }

    /// Convert a complete buffer.
    #[must_use]
    pub fn convert(&self, input: &[u8]) -> Vec<u8> {
        let mut output = vec![0; Self::max_output_size_for_chunk(input.len())];
        let status = self
            .convert_chunk(input, &mut output, ScanState::default(), true)
            .unwrap_or_else(|err| unreachable!("{err} (should be impossible)"));
        output.truncate(status.output_len());
        output
    }

    fn scan(&self, units: &[u8], state: &mut ScanState, out: &mut Emitter<'_>) {
        if self.strategy == Strategy::Identity {
            out.run(units);
            return;
        }

        let (endianness, units) = match state.endianness {
            Some(endianness) => (endianness, units),
            None => {
                let Some((bom, rest)) = CodeUnit::split_first(units) else {
                    return;
                };
                let endianness = Endianness::detect(bom);
                state.endianness = Some(endianness);
                out.unit(bom);
                (endianness, rest)
            }
        };

        match self.strategy {
            Strategy::Identity => unreachable!("identity handled above"),
            Strategy::WindowsDest { source } => {
                windows_dest::scan(units, endianness, source, out);
            }
            Strategy::WindowsSrc { destination } => {
                windows_src::scan(units, endianness, destination, &mut state.saw_cr, out);
            }
            Strategy::NeitherWindows {
                source,
                destination,
            } => neither_windows::scan(units, endianness, source, destination, out),
        }
    }
}

/// Byte offset of the next code unit at or after `from` that is `0x00` paired
/// with `signal` at the endianness-correct position.
pub(crate) fn find_signal(
    units: &[u8],
    from: usize,
    signal: u8,
    endianness: Endianness,
) -> Option<usize> {
    let signal_index = endianness.signal_index();
    let mut scan_pos = from;
    while let Some(i) = memchr(signal, &units[scan_pos..]).map(|i| i + scan_pos) {
        let start = i & !1;
        if i - start == signal_index && units[start + 1 - signal_index] == 0 {
            return Some(start);
        }
        scan_pos = i + 1;
    }
    None
}

/// Output cursor applying the swap flag as the last step before each write.
pub(crate) struct Emitter<'a> {
    output: &'a mut [u8],
    write_pos: usize,
    swap: bool,
}

impl<'a> Emitter<'a> {
    fn new(output: &'a mut [u8], swap: bool) -> Self {
        Self {
            output,
            write_pos: 0,
            swap,
        }
    }

    fn len(&self) -> usize {
        self.write_pos
    }

    pub(crate) fn unit(&mut self, unit: CodeUnit) {
        let unit = if self.swap { unit.swapped() } else { unit };
        self.output[self.write_pos..self.write_pos + 2].copy_from_slice(&unit.bytes());
        self.write_pos += 2;
    }

    /// Copy an aligned run of unmatched code units.
    pub(crate) fn run(&mut self, units: &[u8]) {
        let dest = &mut self.output[self.write_pos..self.write_pos + units.len()];
        dest.copy_from_slice(units);
        if self.swap {
            for pair in dest.chunks_exact_mut(2) {
                pair.swap(0, 1);
            }
        }
        self.write_pos += units.len();
    }
}
