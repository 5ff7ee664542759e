#![doc = include_str!("../README.md")]

mod codec;
mod convert;
mod endian;
mod newline;
mod strategies;
mod types;
mod wrappers;

pub use codec::{read_unit, write_unit, CodeUnit};
pub use convert::{convert_file, Invocation, Options, SWAP_FLAG};
pub use endian::Endianness;
pub use newline::{resolve, LineEnding};
pub use strategies::{ConvertChunkResult, Converter, ScanState, Strategy};
pub use types::{Error, Result, CR, LF, NUL};
pub use wrappers::io::{ReadExt, Reader, WriteExt, Writer};
