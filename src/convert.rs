//! File-level driver: turns the positional command line into a conversion and
//! runs it between two files.

use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, trace};

use crate::{
    wrappers::io::DEFAULT_BUFFER_SIZE, Converter, Error, LineEnding, Result, Strategy,
};

/// Literal fifth argument enabling byte swapping.
pub const SWAP_FLAG: &str = "-swap";

/// Settings for a single conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub strategy: Strategy,
    pub swap: bool,
    /// Size of the chunks read from the source.
    pub buffer_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strategy: Strategy::Identity,
            swap: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Options {
    #[must_use]
    pub fn converter(&self) -> Converter {
        Converter::new(self.strategy, self.swap)
    }
}

/// A parsed `<src> <dst> [<srcOS> <dstOS> [-swap]]` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub options: Options,
}

impl Invocation {
    /// Parse the positional arguments following the program name.
    ///
    /// Returns `None` unless exactly 2, 4 or 5 arguments are given. Swapping is
    /// enabled only when the fifth argument is literally `-swap`. Paths are taken
    /// as given, whatever their encoding; flags that are not valid UTF-8 are unset.
    pub fn parse<S: AsRef<OsStr>>(args: &[S]) -> Option<Self> {
        let args: Vec<&OsStr> = args.iter().map(|arg| arg.as_ref()).collect();
        let (source, destination, flags, swap) = match args.as_slice() {
            [src, dst] => (*src, *dst, None, false),
            [src, dst, src_os, dst_os] => (*src, *dst, Some((*src_os, *dst_os)), false),
            [src, dst, src_os, dst_os, swap] => (
                *src,
                *dst,
                Some((*src_os, *dst_os)),
                swap.to_str() == Some(SWAP_FLAG),
            ),
            _ => return None,
        };

        let line_ending = |flag: &OsStr| flag.to_str().and_then(LineEnding::from_flag);
        let strategy = match flags {
            None => Strategy::Identity,
            Some((src_os, dst_os)) => {
                let (from, to) = (line_ending(src_os), line_ending(dst_os));
                debug!("line endings {} -> {}", describe(from), describe(to));
                Strategy::select(from, to)
            }
        };

        Some(Self {
            source: PathBuf::from(source),
            destination: PathBuf::from(destination),
            options: Options {
                strategy,
                swap,
                ..Options::default()
            },
        })
    }

    /// Run the conversion. See [`convert_file`].
    ///
    /// # Errors
    ///
    /// See [`convert_file`].
    pub fn run(&self) -> Result<u64> {
        convert_file(&self.source, &self.destination, &self.options)
    }
}

/// Convert `source` into `destination` and return the number of bytes written.
///
/// The destination is only created once the source has been opened and read.
///
/// # Errors
///
/// - `Error::SameFile` if both paths name the same file
/// - `Error::SourceOpen` if the source cannot be opened or read
/// - `Error::DestinationCreate` if the destination cannot be created
/// - `Error::Io` if reading or writing fails midway
pub fn convert_file(source: &Path, destination: &Path, options: &Options) -> Result<u64> {
    if is_same_file(source, destination) {
        return Err(Error::SameFile);
    }

    let source_error = |err: io::Error| Error::SourceOpen {
        path: source.to_path_buf(),
        source: err,
    };
    let input = File::open(source).map_err(source_error)?;
    // Opening succeeds for a directory on some platforms; the first read must
    // also succeed before the destination is created.
    let mut input = BufReader::with_capacity(options.buffer_size.max(2), input);
    input.fill_buf().map_err(source_error)?;

    let output = File::create(destination).map_err(|err| Error::DestinationCreate {
        path: destination.to_path_buf(),
        source: err,
    })?;
    debug!(
        "converting {} -> {} with {:?} (swap: {})",
        source.display(),
        destination.display(),
        options.strategy,
        options.swap
    );

    let mut reader = options
        .converter()
        .wrap_reader_with_buffer_size(input, options.buffer_size);
    let mut writer = BufWriter::new(output);
    let written = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(written)
}

fn describe(ending: Option<LineEnding>) -> &'static str {
    ending.map_or("unset", LineEnding::flag)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        // The destination usually does not exist yet.
        (a, b) => {
            trace!("cannot canonicalize: {:?} / {:?}", a.err(), b.err());
            false
        }
    }
}
