//! The `io` module provides wrappers for standard I/O `Read` and `Write`
//! traits to perform UTF-16 line ending conversion on-the-fly.

use std::io::{Read, Write};

use crate::{Converter, ScanState};

pub(crate) const DEFAULT_BUFFER_SIZE: usize = 8192;

/// A `std::io::Read` wrapper that converts code units on-the-fly.
pub struct Reader<R> {
    converter: Converter,
    inner: R,
    input_buf: Box<[u8]>,
    output_buf: Box<[u8]>,
    output_pos: usize,
    output_size: usize,
    state: ScanState,
    end_of_stream: bool,
}

impl<R: Read> Reader<R> {
    pub fn new(reader: R, converter: Converter, buf_size: usize) -> Self {
        let buf_size = buf_size.max(2);
        let required = Converter::max_output_size_for_chunk(buf_size);
        Self {
            converter,
            inner: reader,
            input_buf: vec![0; buf_size].into_boxed_slice(),
            output_buf: vec![0; required].into_boxed_slice(),
            output_pos: 0,
            output_size: 0,
            state: ScanState::default(),
            end_of_stream: false,
        }
    }

    fn fill_buf(&mut self) -> std::io::Result<()> {
        self.output_pos = 0;
        self.output_size = 0;

        // A chunk can produce no output (e.g. a lone BOM byte), so keep reading
        // until there is something to hand out or the stream is done.
        while self.output_size == 0 && !self.end_of_stream {
            let bytes_read = self.inner.read(&mut self.input_buf)?;
            self.end_of_stream = bytes_read == 0;

            let status = self
                .converter
                .convert_chunk(
                    &self.input_buf[..bytes_read],
                    &mut self.output_buf,
                    self.state,
                    self.end_of_stream,
                )
                .map_err(std::io::Error::other)?;

            self.output_size = status.output_len();
            self.state = status.state();
        }
        Ok(())
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.output_pos >= self.output_size {
            self.fill_buf()?;
        }
        if self.output_size == 0 {
            return Ok(0);
        }

        let bytes_now = buf.len().min(self.output_size - self.output_pos);
        buf[..bytes_now]
            .copy_from_slice(&self.output_buf[self.output_pos..self.output_pos + bytes_now]);
        self.output_pos += bytes_now;
        Ok(bytes_now)
    }
}

/// A `std::io::Write` wrapper that converts code units on-the-fly.
///
/// Call [`Writer::finish`] once all input has been written; a CR held back
/// while waiting for a possible LF is only emitted then.
pub struct Writer<W> {
    converter: Converter,
    inner: W,
    input_buf: Box<[u8]>,
    output_buf: Box<[u8]>,
    input_pos: usize,
    state: ScanState,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W, converter: Converter, buf_size: usize) -> Self {
        let buf_size = buf_size.max(2);
        let required = Converter::max_output_size_for_chunk(buf_size);
        Self {
            converter,
            inner,
            input_buf: vec![0; buf_size].into_boxed_slice(),
            output_buf: vec![0; required].into_boxed_slice(),
            input_pos: 0,
            state: ScanState::default(),
        }
    }

    pub fn finish(self) -> std::io::Result<W> {
        let mut this = self;
        // Finalize any remaining input
        let status = this
            .converter
            .convert_chunk(
                &this.input_buf[..this.input_pos],
                &mut this.output_buf,
                this.state,
                true, // this is the last chunk
            )
            .map_err(std::io::Error::other)?;

        this.inner
            .write_all(&this.output_buf[..status.output_len()])?;
        this.inner.flush()?;
        Ok(this.inner)
    }

    fn convert_pending(&mut self) -> std::io::Result<()> {
        let status = self
            .converter
            .convert_chunk(
                &self.input_buf[..self.input_pos],
                &mut self.output_buf,
                self.state,
                false,
            )
            .map_err(std::io::Error::other)?;

        self.inner
            .write_all(&self.output_buf[..status.output_len()])?;
        self.state = status.state();
        self.input_pos = 0;
        Ok(())
    }
}

impl<W: Write> Write for Writer<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut source_buf = buf;
        let mut total_bytes = 0;

        while total_bytes < buf.len() {
            let bytes_now = source_buf.len().min(self.input_buf.len() - self.input_pos);
            total_bytes += bytes_now;

            self.input_buf[self.input_pos..self.input_pos + bytes_now]
                .copy_from_slice(&source_buf[..bytes_now]);
            self.input_pos += bytes_now;
            source_buf = &source_buf[bytes_now..];

            if self.input_pos < self.input_buf.len() {
                // Not enough data yet to process a full chunk.
                return Ok(total_bytes);
            }

            self.convert_pending()?;
        }
        Ok(total_bytes)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        // Flush is not necessarily the end of stream: a dangling CR or half a
        // code unit stays in `state`.
        if self.input_pos > 0 {
            self.convert_pending()?;
        }
        self.inner.flush()
    }
}

impl Converter {
    /// Wrap a reader with a converting `Reader`.
    pub fn wrap_reader<R: Read>(self, reader: R) -> Reader<R> {
        self.wrap_reader_with_buffer_size(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Wrap a reader with a converting `Reader` and specify the internal buffer size.
    pub fn wrap_reader_with_buffer_size<R: Read>(self, reader: R, buf_size: usize) -> Reader<R> {
        Reader::new(reader, self, buf_size)
    }

    /// Wrap a writer with a converting `Writer`.
    pub fn wrap_writer<W: Write>(self, writer: W) -> Writer<W> {
        self.wrap_writer_with_buffer_size(writer, DEFAULT_BUFFER_SIZE)
    }

    /// Wrap a writer with a converting `Writer` and specify the internal buffer size.
    pub fn wrap_writer_with_buffer_size<W: Write>(self, writer: W, buf_size: usize) -> Writer<W> {
        Writer::new(writer, self, buf_size)
    }
}

/// Extension trait to provide convenient methods on `std::io::Read`.
pub trait ReadExt {
    /// Wrap the reader with a converting `Reader`.
    fn convert_utf16(self, converter: Converter) -> Reader<Self>
    where
        Self: Sized;
}

impl<R: Read> ReadExt for R {
    fn convert_utf16(self, converter: Converter) -> Reader<Self>
    where
        Self: Sized,
    {
        converter.wrap_reader(self)
    }
}

/// Extension trait to provide convenient methods on `std::io::Write`.
pub trait WriteExt {
    /// Wrap the writer with a converting `Writer`.
    fn convert_utf16(self, converter: Converter) -> Writer<Self>
    where
        Self: Sized;
}

impl<W: Write> WriteExt for W {
    fn convert_utf16(self, converter: Converter) -> Writer<Self>
    where
        Self: Sized,
    {
        converter.wrap_writer(self)
    }
}
