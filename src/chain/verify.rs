use crate::chain::key::SigningKey;
use crate::chain::mac::{constant_time_compare, HashAlgorithm};
use crate::chain::sign::{compute_chain, SIGNATURE_FRAME, SIGNATURE_SIZE};
use crate::codec::Codec;
use crate::error::{PawpadError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Framing problem found while lining runs up with characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralMismatch {
    /// No character carries a run
    Unsigned,
    /// Selectors found before the first character
    OrphanedRun { length: usize },
    /// A run that is not exactly one signature wide
    RunWidth {
        position: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralMismatch::Unsigned => write!(f, "text carries no signatures"),
            StructuralMismatch::OrphanedRun { length } => {
                write!(f, "{} signature bytes precede the first character", length)
            }
            StructuralMismatch::RunWidth {
                position,
                expected,
                found,
            } => write!(
                f,
                "run after character {} holds {} bytes, expected {}",
                position, found, expected
            ),
        }
    }
}

/// Outcome of checking a signed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub is_valid: bool,
    /// Character positions whose embedded link does not match, ascending
    pub invalid_positions: Vec<usize>,
    pub total_characters: usize,
    /// First framing problem, if any
    pub structural_mismatch: Option<StructuralMismatch>,
}

impl VerificationReport {
    pub fn first_invalid(&self) -> Option<usize> {
        self.invalid_positions.first().copied()
    }

    /// Turn a failed verdict into an error
    pub fn ensure_intact(self) -> Result<Self> {
        if let Some(mismatch) = &self.structural_mismatch {
            return Err(PawpadError::StructuralMismatch(mismatch.clone()));
        }
        if let Some(first_position) = self.first_invalid() {
            return Err(PawpadError::Tampered {
                first_position,
                count: self.invalid_positions.len(),
            });
        }
        Ok(self)
    }
}

/// Verify a signed document against `key`.
///
/// The chain is recomputed from the characters actually present, so an edit
/// at position `j` marks `j` and every later position invalid. Runs of the
/// wrong width (from inserted or deleted characters) are flagged invalid and
/// reported as a structural mismatch. Tampering is a normal `Ok` verdict.
///
/// The chain does not commit to the document length: removing the final
/// character together with its run leaves a prefix that verifies as valid.
pub fn verify(
    text: &str,
    key: &SigningKey,
    algorithm: HashAlgorithm,
    codec: &Codec,
) -> Result<VerificationReport> {
    let mut structural = None;
    let mut carriers = Vec::new();
    let mut runs = Vec::new();

    for segment in codec.scan(text) {
        match segment.carrier {
            Some(c) => {
                carriers.push(c);
                runs.push(segment.payload);
            }
            None => {
                structural.get_or_insert(StructuralMismatch::OrphanedRun {
                    length: segment.payload.len(),
                });
            }
        }
    }

    if runs.iter().all(|run| run.is_empty()) {
        structural.get_or_insert(StructuralMismatch::Unsigned);
    }

    let expected = compute_chain(carriers.iter().copied(), key, algorithm);
    let mut invalid_positions = Vec::new();

    for (position, (run, link)) in runs.iter().zip(expected.iter()).enumerate() {
        match SIGNATURE_FRAME.unframe(run) {
            Ok(embedded) => {
                if !constant_time_compare(&embedded, link.as_bytes()) {
                    invalid_positions.push(position);
                }
            }
            Err(_) => {
                invalid_positions.push(position);
                structural.get_or_insert(StructuralMismatch::RunWidth {
                    position,
                    expected: SIGNATURE_SIZE,
                    found: run.len(),
                });
            }
        }
    }

    Ok(VerificationReport {
        is_valid: invalid_positions.is_empty() && structural.is_none(),
        invalid_positions,
        total_characters: carriers.len(),
        structural_mismatch: structural,
    })
}
