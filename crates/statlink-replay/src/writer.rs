//! Journal recording writer.
//!
//! [`JournalWriter`] streams frames to any `Write` sink. The header is
//! written immediately on construction.

use std::io::Write;

use statlink_core::{Command, Receipt, SlotRead};

use crate::codec::{encode_frame, encode_header};
use crate::error::ReplayError;
use crate::hash::{state_hash, UNINITIALIZED_HASH};
use crate::types::{Frame, JournalHeader};

/// Writes a journal to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and callers can use
/// `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use statlink_core::{Command, Receipt};
/// use statlink_replay::{JournalHeader, JournalReader, JournalWriter};
///
/// let mut buf = Vec::new();
/// let mut writer = JournalWriter::new(&mut buf, JournalHeader::for_capacity(5)).unwrap();
/// writer
///     .write_step(&Command::Initialize, &Receipt::applied_without_slot(), None)
///     .unwrap();
/// assert_eq!(writer.frames_written(), 1);
/// drop(writer);
///
/// let mut reader = JournalReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.header().capacity, 5);
/// let frame = reader.next_frame().unwrap().unwrap();
/// assert_eq!(frame.command, Command::Initialize);
/// assert!(reader.next_frame().unwrap().is_none());
/// ```
pub struct JournalWriter<W: Write> {
    writer: W,
    header: JournalHeader,
    frames_written: u64,
}

impl<W: Write> JournalWriter<W> {
    /// Create a new journal writer, immediately writing the header.
    pub fn new(mut writer: W, header: JournalHeader) -> Result<Self, ReplayError> {
        encode_header(&mut writer, &header)?;
        Ok(Self {
            writer,
            header,
            frames_written: 0,
        })
    }

    /// The header this journal was opened with.
    pub fn header(&self) -> &JournalHeader {
        &self.header
    }

    /// Record one step: the command, its receipt, and the resulting state.
    ///
    /// Pass `None` for `state` while the simulator is uninitialized.
    pub fn write_step(
        &mut self,
        command: &Command,
        receipt: &Receipt,
        state: Option<&dyn SlotRead>,
    ) -> Result<(), ReplayError> {
        let frame = Frame {
            seq: self.frames_written,
            command: command.clone(),
            receipt: *receipt,
            state_hash: state.map_or(UNINITIALIZED_HASH, state_hash),
        };
        self.write_raw_frame(&frame)
    }

    /// Write a pre-built frame directly.
    ///
    /// The frame is encoded in full before any byte reaches the sink, so an
    /// unencodable frame leaves the journal as it was.
    pub fn write_raw_frame(&mut self, frame: &Frame) -> Result<(), ReplayError> {
        let mut buf = Vec::with_capacity(32);
        encode_frame(&mut buf, frame)?;
        self.writer.write_all(&buf)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
