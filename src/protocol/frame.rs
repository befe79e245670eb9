//! Line framing for messages on a byte link.
//!
//! Each message travels as one ASCII line:
//!
//! ```text
//! $SHO,2,7*51\n
//! ```
//!
//! The payload between `$` and `*` is a three-letter tag followed by up to
//! three comma-separated decimal parameters. The two hex digits after `*`
//! are the XOR of every payload byte.

use super::{Message, TransportErrorKind};
use crate::engine::common::AttackOutcome;

/// Longest payload accepted between `$` and `*`: a tag and three full `u32` words.
pub const MAX_PAYLOAD_LEN: usize = 36;
/// Hex digits in a checksum.
pub const CHECKSUM_LEN: usize = 2;
/// Longest complete frame, including `$`, `*` and the newline.
pub const MAX_FRAME_LEN: usize = MAX_PAYLOAD_LEN + CHECKSUM_LEN + 4;

const START: char = '$';
const CHECKSUM_DELIM: char = '*';

/// XOR of all payload bytes.
pub fn checksum(payload: &str) -> u8 {
    payload.bytes().fold(0, |acc, b| acc ^ b)
}

/// Payload text for `msg`, or `None` for [`Message::None`].
pub fn payload(msg: &Message) -> Option<String> {
    let text = match *msg {
        Message::None => return None,
        Message::Challenge {
            commitment: [w0, w1, w2],
        } => format!("CHA,{},{},{}", w0, w1, w2),
        Message::Accept { secret } => format!("ACC,{}", secret),
        Message::Reveal { secret, nonce } => {
            format!("REV,{},{},{}", secret, (nonce >> 32) as u32, nonce as u32)
        }
        Message::Shot { row, col } => format!("SHO,{},{}", row, col),
        Message::Result { row, col, outcome } => {
            format!("RES,{},{},{}", row, col, outcome.code())
        }
    };
    Some(text)
}

/// Complete frame for `msg`, newline included.
pub fn encode(msg: &Message) -> Option<String> {
    let payload = payload(msg)?;
    Some(format!(
        "{}{}{}{:02X}\n",
        START,
        payload,
        CHECKSUM_DELIM,
        checksum(&payload)
    ))
}

/// Decode one frame. A trailing `\n` or `\r\n` is optional.
pub fn decode(line: &str) -> Result<Message, TransportErrorKind> {
    let line = line.trim_end_matches(['\n', '\r']);
    let body = line
        .strip_prefix(START)
        .ok_or(TransportErrorKind::ParseFailure)?;

    let Some((payload, sum)) = body.split_once(CHECKSUM_DELIM) else {
        return Err(if body.len() > MAX_PAYLOAD_LEN {
            TransportErrorKind::PayloadLengthExceeded
        } else {
            TransportErrorKind::ParseFailure
        });
    };
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(TransportErrorKind::PayloadLengthExceeded);
    }
    if sum.len() > CHECKSUM_LEN {
        return Err(TransportErrorKind::ChecksumLengthExceeded);
    }
    if sum.len() < CHECKSUM_LEN {
        return Err(TransportErrorKind::ChecksumLengthInsufficient);
    }
    let expected = u8::from_str_radix(sum, 16).map_err(|_| TransportErrorKind::ParseFailure)?;
    if checksum(payload) != expected {
        return Err(TransportErrorKind::BadChecksum);
    }

    parse_payload(payload)
}

fn parse_payload(payload: &str) -> Result<Message, TransportErrorKind> {
    let mut fields = payload.split(',');
    let tag = fields.next().unwrap_or_default();
    let mut params = [0u32; 3];
    let mut count = 0;
    for field in fields {
        let slot = params
            .get_mut(count)
            .ok_or(TransportErrorKind::ParseFailure)?;
        *slot = field.parse().map_err(|_| TransportErrorKind::ParseFailure)?;
        count += 1;
    }

    let arity = match tag {
        "ACC" => 1,
        "SHO" => 2,
        "CHA" | "REV" | "RES" => 3,
        _ => return Err(TransportErrorKind::InvalidMessageType),
    };
    if count != arity {
        return Err(TransportErrorKind::ParseFailure);
    }

    let coord = |v: u32| u8::try_from(v).map_err(|_| TransportErrorKind::ParseFailure);
    let msg = match tag {
        "CHA" => Message::Challenge { commitment: params },
        "ACC" => Message::Accept { secret: params[0] },
        "REV" => Message::Reveal {
            secret: params[0],
            nonce: (u64::from(params[1]) << 32) | u64::from(params[2]),
        },
        "SHO" => Message::Shot {
            row: coord(params[0])?,
            col: coord(params[1])?,
        },
        _ => Message::Result {
            row: coord(params[0])?,
            col: coord(params[1])?,
            outcome: AttackOutcome::from_code(params[2])
                .ok_or(TransportErrorKind::ParseFailure)?,
        },
    };
    Ok(msg)
}
