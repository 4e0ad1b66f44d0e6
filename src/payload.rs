//! Payload runs and their placement on carrier characters.

use crate::codec::Codec;
use crate::error::{PawpadError, Result};
use serde::{Deserialize, Serialize};

/// Largest run that may follow a single carrier, in bytes
pub const MAX_RUN_BYTES: usize = 256;

/// Largest message a length-prefixed run can hold
pub const MAX_MESSAGE_BYTES: usize = MAX_RUN_BYTES - 1;

/// How the bytes of a run are delimited.
///
/// The run boundary itself always comes from the codec (the next visible
/// character ends it); the frame decides how the run's bytes map to a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// The whole run is the payload (fingerprints)
    Raw,
    /// The run must be exactly this many bytes (signatures)
    Fixed(usize),
    /// One length byte followed by that many content bytes (messages)
    Prefixed,
}

impl Frame {
    /// Wrap a payload into the bytes of a run
    pub fn frame(&self, payload: &[u8]) -> Result<Vec<u8>> {
        match *self {
            Frame::Raw => {
                check_size(payload.len(), MAX_RUN_BYTES)?;
                Ok(payload.to_vec())
            }
            Frame::Fixed(width) => {
                if payload.len() != width {
                    return Err(PawpadError::Decode(format!(
                        "fixed frame expects {} bytes, got {}",
                        width,
                        payload.len()
                    )));
                }
                check_size(width, MAX_RUN_BYTES)?;
                Ok(payload.to_vec())
            }
            Frame::Prefixed => {
                check_size(payload.len(), MAX_MESSAGE_BYTES)?;
                let mut run = Vec::with_capacity(payload.len() + 1);
                run.push(payload.len() as u8);
                run.extend_from_slice(payload);
                Ok(run)
            }
        }
    }

    /// Recover the payload from the bytes of one run
    pub fn unframe(&self, run: &[u8]) -> Result<Vec<u8>> {
        match *self {
            Frame::Raw => {
                if run.len() > MAX_RUN_BYTES {
                    return Err(PawpadError::Decode(format!(
                        "run of {} bytes exceeds {} bytes",
                        run.len(),
                        MAX_RUN_BYTES
                    )));
                }
                Ok(run.to_vec())
            }
            Frame::Fixed(width) => {
                if run.len() != width {
                    return Err(PawpadError::Decode(format!(
                        "expected {}-byte run, found {} bytes",
                        width,
                        run.len()
                    )));
                }
                Ok(run.to_vec())
            }
            Frame::Prefixed => {
                let (&len, content) = run
                    .split_first()
                    .ok_or_else(|| PawpadError::Decode("empty length-prefixed run".into()))?;
                if content.len() != len as usize {
                    return Err(PawpadError::Decode(format!(
                        "length prefix says {} bytes, run holds {}",
                        len,
                        content.len()
                    )));
                }
                Ok(content.to_vec())
            }
        }
    }
}

fn check_size(size: usize, max: usize) -> Result<()> {
    if size > max {
        return Err(PawpadError::PayloadTooLarge { size, max });
    }
    Ok(())
}

/// Where a payload is attached in the host text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    EveryCharacter,
    SingleCharacter,
}

impl std::str::FromStr for Placement {
    type Err = PawpadError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "every" | "every-character" => Ok(Self::EveryCharacter),
            "single" | "single-character" => Ok(Self::SingleCharacter),
            _ => Err(PawpadError::UnsupportedAlgorithm(format!(
                "placement: {}",
                s
            ))),
        }
    }
}

/// Attach a framed payload to the host text.
///
/// Runs already present in `text` are dropped first, so every carrier ends
/// up with either the new run or nothing.
pub fn attach(
    text: &str,
    payload: &[u8],
    frame: Frame,
    placement: Placement,
    codec: &Codec,
) -> Result<String> {
    let run = codec.encode_bytes(&frame.frame(payload)?);
    let mut carriers = text.chars().filter(|&c| !codec.is_selector(c)).peekable();

    if carriers.peek().is_none() {
        return Err(PawpadError::EmptyCarrier);
    }

    let mut out = String::with_capacity(text.len() + run.len());
    for (i, c) in carriers.enumerate() {
        out.push(c);
        if i == 0 || placement == Placement::EveryCharacter {
            out.push_str(&run);
        }
    }

    Ok(out)
}

/// Read the payload that every non-empty run in `text` carries.
///
/// Only runs that follow a carrier count; selectors ahead of the first
/// visible character are ignored. Returns `Ok(None)` when no carried run is
/// present. All runs must hold exactly the
/// same bytes; the first disagreement is reported as
/// [`PawpadError::InconsistentPayload`].
pub fn uniform_payload(text: &str, frame: Frame, codec: &Codec) -> Result<Option<Vec<u8>>> {
    let segments = codec.scan(text);
    let mut runs = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.carrier.is_some() && segment.has_payload());

    let (first, reference) = match runs.next() {
        Some((i, segment)) => (i, &segment.payload),
        None => return Ok(None),
    };

    for (i, segment) in runs {
        if &segment.payload != reference {
            return Err(PawpadError::InconsistentPayload {
                first,
                conflicting: i,
            });
        }
    }

    frame.unframe(reference).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_frame() {
        let run = Frame::Prefixed.frame(b"hey").unwrap();
        assert_eq!(run, vec![3, b'h', b'e', b'y']);
        assert_eq!(Frame::Prefixed.unframe(&run).unwrap(), b"hey");
    }

    #[test]
    fn test_prefixed_frame_rejects_bad_length() {
        assert!(Frame::Prefixed.unframe(&[5, 1, 2]).is_err());
        assert!(Frame::Prefixed.unframe(&[]).is_err());
        assert!(matches!(
            Frame::Prefixed.frame(&[0u8; 256]),
            Err(PawpadError::PayloadTooLarge { size: 256, max: 255 })
        ));
        assert!(Frame::Prefixed.frame(&[0u8; 255]).is_ok());
    }

    #[test]
    fn test_fixed_frame_width() {
        assert!(Frame::Fixed(4).frame(&[1, 2, 3, 4]).is_ok());
        assert!(Frame::Fixed(4).frame(&[1, 2, 3]).is_err());
        assert!(matches!(
            Frame::Fixed(4).unframe(&[1, 2, 3, 4, 5]),
            Err(PawpadError::Decode(_))
        ));
    }

    #[test]
    fn test_raw_frame_limit() {
        assert!(Frame::Raw.frame(&[9u8; 256]).is_ok());
        assert!(Frame::Raw.frame(&[9u8; 257]).is_err());
    }

    #[test]
    fn test_raw_unframe_limit() {
        assert_eq!(Frame::Raw.unframe(&[1u8; 256]).unwrap().len(), 256);
        assert!(matches!(
            Frame::Raw.unframe(&[1u8; 257]),
            Err(PawpadError::Decode(_))
        ));
    }

    #[test]
    fn test_uniform_payload_rejects_oversized_run() {
        let codec = Codec::default();
        let text = format!("a{}", codec.encode_bytes(&[9u8; 300]));
        assert!(matches!(
            uniform_payload(&text, Frame::Raw, &codec),
            Err(PawpadError::Decode(_))
        ));
    }

    #[test]
    fn test_uniform_payload_skips_uncarried_run() {
        let codec = Codec::default();
        let bare = codec.encode_bytes(&[1, 2, 3]);
        assert_eq!(uniform_payload(&bare, Frame::Raw, &codec).unwrap(), None);

        let text = format!("{}a{}", codec.encode_bytes(&[4]), codec.encode_bytes(&[5]));
        assert_eq!(
            uniform_payload(&text, Frame::Raw, &codec).unwrap(),
            Some(vec![5])
        );
    }

    #[test]
    fn test_attach_every_character() {
        let codec = Codec::default();
        let out = attach("abc", &[1, 2], Frame::Raw, Placement::EveryCharacter, &codec).unwrap();
        let segments = codec.scan(&out);

        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.payload == vec![1, 2]));
    }

    #[test]
    fn test_attach_single_character() {
        let codec = Codec::default();
        let out = attach("abc", b"x", Frame::Prefixed, Placement::SingleCharacter, &codec).unwrap();
        let segments = codec.scan(&out);

        assert_eq!(segments[0].payload, vec![1, b'x']);
        assert!(!segments[1].has_payload());
        assert!(!segments[2].has_payload());
    }

    #[test]
    fn test_attach_replaces_existing_runs() {
        let codec = Codec::default();
        let once = attach("ab", &[1], Frame::Raw, Placement::EveryCharacter, &codec).unwrap();
        let twice = attach(&once, &[2], Frame::Raw, Placement::EveryCharacter, &codec).unwrap();

        assert!(codec.scan(&twice).iter().all(|s| s.payload == vec![2]));
    }

    #[test]
    fn test_attach_empty_text() {
        let codec = Codec::default();
        assert!(matches!(
            attach("", &[1], Frame::Raw, Placement::EveryCharacter, &codec),
            Err(PawpadError::EmptyCarrier)
        ));
    }

    #[test]
    fn test_uniform_payload_strict() {
        let codec = Codec::default();
        let text = format!(
            "a{}b{}c{}",
            codec.encode_bytes(&[1]),
            codec.encode_bytes(&[1]),
            codec.encode_bytes(&[2])
        );

        match uniform_payload(&text, Frame::Raw, &codec) {
            Err(PawpadError::InconsistentPayload { first, conflicting }) => {
                assert_eq!(first, 0);
                assert_eq!(conflicting, 2);
            }
            other => panic!("expected inconsistent payload, got {:?}", other),
        }
    }

    #[test]
    fn test_uniform_payload_ignores_bare_carriers() {
        let codec = Codec::default();
        let text = format!("a{}bc{}", codec.encode_bytes(&[7]), codec.encode_bytes(&[7]));
        assert_eq!(
            uniform_payload(&text, Frame::Raw, &codec).unwrap(),
            Some(vec![7])
        );
        assert_eq!(uniform_payload("plain", Frame::Raw, &codec).unwrap(), None);
    }

    #[test]
    fn test_placement_from_str() {
        assert_eq!("every".parse::<Placement>().unwrap(), Placement::EveryCharacter);
        assert_eq!(
            "Single-Character".parse::<Placement>().unwrap(),
            Placement::SingleCharacter
        );
        assert!("middle".parse::<Placement>().is_err());
    }
}
