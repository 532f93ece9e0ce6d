//! Binary encode/decode for the journal format.
//!
//! All integers are little-endian. Strings are length-prefixed with a
//! `u32` length. Optional values carry a one-byte presence flag.

use std::io::{Read, Write};

use statlink_core::{Command, Receipt, RejectReason, SlotIndex};

use crate::error::ReplayError;
use crate::types::{Frame, JournalHeader};
use crate::{FORMAT_VERSION, MAGIC};

/// Tag for [`Command::Initialize`].
pub const TAG_INITIALIZE: u8 = 0;
/// Tag for [`Command::Insert`].
pub const TAG_INSERT: u8 = 1;
/// Tag for [`Command::Delete`].
pub const TAG_DELETE: u8 = 2;

/// Largest command value, in bytes, the journal accepts.
///
/// Valid payloads are a single char (at most 4 bytes); rejected commands
/// are journaled with their raw input, so the bound is looser than that.
pub const MAX_VALUE_BYTES: usize = 256;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ReplayError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i64.
pub fn write_i64_le(w: &mut dyn Write, v: i64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed UTF-8 string (u32 length + bytes).
///
/// Strings longer than [`MAX_VALUE_BYTES`] are rejected.
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), ReplayError> {
    if s.len() > MAX_VALUE_BYTES {
        return Err(ReplayError::MalformedFrame {
            detail: format!("string of {} bytes exceeds {MAX_VALUE_BYTES}", s.len()),
        });
    }
    write_u32_le(w, s.len() as u32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, ReplayError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian i64.
pub fn read_i64_le(r: &mut dyn Read) -> Result<i64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string.
///
/// The length is checked against [`MAX_VALUE_BYTES`] before anything is
/// allocated.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, ReplayError> {
    let len = read_u32_le(r)? as usize;
    if len > MAX_VALUE_BYTES {
        return Err(ReplayError::MalformedFrame {
            detail: format!("string length {len} exceeds {MAX_VALUE_BYTES}"),
        });
    }
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| ReplayError::MalformedFrame {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

fn read_flag(r: &mut dyn Read, what: &str) -> Result<bool, ReplayError> {
    match read_u8(r)? {
        0 => Ok(false),
        1 => Ok(true),
        flag => Err(ReplayError::MalformedFrame {
            detail: format!("invalid {what} presence flag: {flag}"),
        }),
    }
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the journal header (magic, version, capacity, config hash).
pub fn encode_header(w: &mut dyn Write, header: &JournalHeader) -> Result<(), ReplayError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u32_le(w, header.capacity)?;
    write_u64_le(w, header.config_hash)?;
    Ok(())
}

/// Decode and validate the journal header.
pub fn decode_header(r: &mut dyn Read) -> Result<JournalHeader, ReplayError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReplayError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: version });
    }

    let header = JournalHeader {
        capacity: read_u32_le(r)?,
        config_hash: read_u64_le(r)?,
    };
    let current = crate::hash::config_hash(header.capacity);
    if header.config_hash != current {
        return Err(ReplayError::ConfigMismatch {
            recorded: header.config_hash,
            current,
        });
    }
    Ok(header)
}

// ── Command / receipt encode/decode ─────────────────────────────

/// Encode a command as a tag byte plus its fields.
pub fn encode_command(w: &mut dyn Write, cmd: &Command) -> Result<(), ReplayError> {
    match cmd {
        Command::Initialize => write_u8(w, TAG_INITIALIZE),
        Command::Insert { value, position } => {
            write_u8(w, TAG_INSERT)?;
            write_length_prefixed_str(w, value)?;
            write_i64_le(w, *position)
        }
        Command::Delete { value } => {
            write_u8(w, TAG_DELETE)?;
            write_length_prefixed_str(w, value)
        }
    }
}

/// Decode a command written by [`encode_command`].
pub fn decode_command(r: &mut dyn Read) -> Result<Command, ReplayError> {
    match read_u8(r)? {
        TAG_INITIALIZE => Ok(Command::Initialize),
        TAG_INSERT => {
            let value = read_length_prefixed_str(r)?;
            let position = read_i64_le(r)?;
            Ok(Command::Insert { value, position })
        }
        TAG_DELETE => Ok(Command::Delete {
            value: read_length_prefixed_str(r)?,
        }),
        tag => Err(ReplayError::UnknownCommandTag { tag }),
    }
}

/// Wire code of a reject reason. Never 0.
pub fn reason_to_code(reason: RejectReason) -> u8 {
    match reason {
        RejectReason::NotInitialized => 1,
        RejectReason::InvalidArgument => 2,
        RejectReason::PositionOutOfRange => 3,
        RejectReason::ArenaFull => 4,
        RejectReason::NotFound => 5,
        RejectReason::IndexOutOfRange => 6,
    }
}

/// Inverse of [`reason_to_code`].
pub fn reason_from_code(code: u8) -> Result<RejectReason, ReplayError> {
    Ok(match code {
        1 => RejectReason::NotInitialized,
        2 => RejectReason::InvalidArgument,
        3 => RejectReason::PositionOutOfRange,
        4 => RejectReason::ArenaFull,
        5 => RejectReason::NotFound,
        6 => RejectReason::IndexOutOfRange,
        _ => {
            return Err(ReplayError::MalformedFrame {
                detail: format!("unknown reject reason code {code}"),
            })
        }
    })
}

/// Encode a receipt: accepted byte, optional slot, optional reason.
pub fn encode_receipt(w: &mut dyn Write, receipt: &Receipt) -> Result<(), ReplayError> {
    write_u8(w, u8::from(receipt.accepted))?;
    match receipt.slot {
        Some(slot) => {
            write_u8(w, 1)?;
            write_u32_le(w, slot.0)?;
        }
        None => write_u8(w, 0)?,
    }
    match receipt.reason_code {
        Some(reason) => write_u8(w, reason_to_code(reason))?,
        None => write_u8(w, 0)?,
    }
    Ok(())
}

/// Decode a receipt written by [`encode_receipt`].
pub fn decode_receipt(r: &mut dyn Read) -> Result<Receipt, ReplayError> {
    let accepted = read_flag(r, "accepted")?;
    let slot = if read_flag(r, "slot")? {
        Some(SlotIndex(read_u32_le(r)?))
    } else {
        None
    };
    let reason_code = match read_u8(r)? {
        0 => None,
        code => Some(reason_from_code(code)?),
    };
    Ok(Receipt {
        accepted,
        slot,
        reason_code,
    })
}

// ── Frame encode/decode ─────────────────────────────────────────

/// Encode a single journal frame.
pub fn encode_frame(w: &mut dyn Write, frame: &Frame) -> Result<(), ReplayError> {
    write_u64_le(w, frame.seq)?;
    encode_command(w, &frame.command)?;
    encode_receipt(w, &frame.receipt)?;
    write_u64_le(w, frame.state_hash)?;
    Ok(())
}

/// Decode a single journal frame.
///
/// Returns `Ok(None)` on clean EOF (no bytes available), `Ok(Some(frame))`
/// on success, or an error on truncated or corrupt data.
pub fn decode_frame(r: &mut dyn Read) -> Result<Option<Frame>, ReplayError> {
    // Read seq byte by byte to tell clean EOF from a truncated header.
    let mut seq_buf = [0u8; 8];
    let mut filled = 0;
    while filled < 8 {
        match r.read(&mut seq_buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(ReplayError::MalformedFrame {
                    detail: format!("truncated frame header: got {filled} of 8 bytes for seq"),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReplayError::Io(e)),
        }
    }
    let seq = u64::from_le_bytes(seq_buf);

    let command = decode_command(r)?;
    let receipt = decode_receipt(r)?;
    let state_hash = read_u64_le(r)?;

    Ok(Some(Frame {
        seq,
        command,
        receipt,
        state_hash,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            Just(Command::Initialize),
            (".{0,3}", any::<i64>()).prop_map(|(v, p)| Command::insert(v, p)),
            ".{0,3}".prop_map(Command::delete),
        ]
    }

    fn arb_reason() -> impl Strategy<Value = RejectReason> {
        prop::sample::select(vec![
            RejectReason::NotInitialized,
            RejectReason::InvalidArgument,
            RejectReason::PositionOutOfRange,
            RejectReason::ArenaFull,
            RejectReason::NotFound,
            RejectReason::IndexOutOfRange,
        ])
    }

    fn arb_receipt() -> impl Strategy<Value = Receipt> {
        prop_oneof![
            Just(Receipt::applied_without_slot()),
            any::<u32>().prop_map(|s| Receipt::applied(SlotIndex(s))),
            arb_reason().prop_map(Receipt::rejected),
        ]
    }

    proptest! {
        #[test]
        fn frame_survives_the_wire(
            seq in any::<u64>(),
            command in arb_command(),
            receipt in arb_receipt(),
            state_hash in any::<u64>(),
        ) {
            let frame = Frame { seq, command, receipt, state_hash };
            let mut buf = Vec::new();
            encode_frame(&mut buf, &frame).unwrap();
            let decoded = decode_frame(&mut buf.as_slice()).unwrap();
            prop_assert_eq!(decoded, Some(frame));
        }
    }

    #[test]
    fn header_roundtrip() {
        let header = JournalHeader::for_capacity(7);
        let mut buf = Vec::new();
        encode_header(&mut buf, &header).unwrap();
        assert_eq!(&buf[..4], b"SLNK");
        assert_eq!(decode_header(&mut buf.as_slice()).unwrap(), header);
    }

    #[test]
    fn bad_magic_rejected() {
        let buf = b"NOPE\x01\x05\x00\x00\x00".to_vec();
        assert!(matches!(
            decode_header(&mut buf.as_slice()),
            Err(ReplayError::InvalidMagic)
        ));
    }

    #[test]
    fn bad_version_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC);
        buf.push(99);
        assert!(matches!(
            decode_header(&mut buf.as_slice()),
            Err(ReplayError::UnsupportedVersion { found: 99 })
        ));
    }

    #[test]
    fn tampered_config_hash_rejected() {
        let mut header = JournalHeader::for_capacity(5);
        header.config_hash ^= 1;
        let mut buf = Vec::new();
        encode_header(&mut buf, &header).unwrap();
        assert!(matches!(
            decode_header(&mut buf.as_slice()),
            Err(ReplayError::ConfigMismatch { .. })
        ));
    }

    #[test]
    fn eof_returns_none() {
        let empty: &[u8] = &[];
        assert!(decode_frame(&mut &*empty).unwrap().is_none());
    }

    #[test]
    fn partial_seq_is_error_not_eof() {
        let buf = [1u8, 0, 0];
        assert!(matches!(
            decode_frame(&mut &buf[..]),
            Err(ReplayError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn truncated_body_is_error() {
        let frame = Frame {
            seq: 3,
            command: Command::insert("q", 2),
            receipt: Receipt::applied(SlotIndex(1)),
            state_hash: 0xABCD,
        };
        let mut buf = Vec::new();
        encode_frame(&mut buf, &frame).unwrap();
        buf.truncate(buf.len() - 3);
        assert!(matches!(
            decode_frame(&mut buf.as_slice()),
            Err(ReplayError::Io(_))
        ));
    }

    #[test]
    fn unknown_tag_rejected() {
        let mut buf = 0u64.to_le_bytes().to_vec();
        buf.push(9);
        assert!(matches!(
            decode_frame(&mut buf.as_slice()),
            Err(ReplayError::UnknownCommandTag { tag: 9 })
        ));
    }

    #[test]
    fn invalid_slot_flag_rejected() {
        let buf = [1u8, 2];
        assert!(matches!(
            decode_receipt(&mut &buf[..]),
            Err(ReplayError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn unknown_reason_code_rejected() {
        let buf = [0u8, 0, 42];
        assert!(matches!(
            decode_receipt(&mut &buf[..]),
            Err(ReplayError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn oversized_length_prefix_rejected_before_read() {
        // seq, insert tag, then a 4 GiB length with no bytes behind it.
        let mut buf = 0u64.to_le_bytes().to_vec();
        buf.push(TAG_INSERT);
        buf.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            decode_frame(&mut buf.as_slice()),
            Err(ReplayError::MalformedFrame { .. })
        ));

        let mut buf = Vec::new();
        write_u32_le(&mut buf, MAX_VALUE_BYTES as u32 + 1).unwrap();
        assert!(matches!(
            read_length_prefixed_str(&mut buf.as_slice()),
            Err(ReplayError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn oversized_value_not_written() {
        let long = "x".repeat(MAX_VALUE_BYTES + 1);
        let mut buf = Vec::new();
        assert!(matches!(
            encode_command(&mut buf, &Command::delete(long)),
            Err(ReplayError::MalformedFrame { .. })
        ));

        let edge = "y".repeat(MAX_VALUE_BYTES);
        let mut buf = Vec::new();
        encode_command(&mut buf, &Command::delete(edge.clone())).unwrap();
        assert_eq!(
            decode_command(&mut buf.as_slice()).unwrap(),
            Command::delete(edge)
        );
    }
}
