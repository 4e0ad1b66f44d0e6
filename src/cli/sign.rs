use crate::chain::{sign, verify, HashAlgorithm, SigningKey, VerificationReport};
use crate::cli::input::emit;
use crate::codec::Codec;
use crate::error::Result;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Options for the sign command
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    pub hash: HashAlgorithm,
    pub output: Option<PathBuf>,
}

/// Options for the verify command
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub hash: HashAlgorithm,
    /// Render the report as JSON
    pub json: bool,
}

/// Sign every character of `text`
pub fn sign_text(text: &str, key: &SigningKey, options: &SignOptions, codec: &Codec) -> Result<String> {
    debug!(hash = ?options.hash, chars = text.chars().count(), "signing text");
    let signed = sign(text, key, options.hash, codec)?;
    emit(&signed, options.output.as_deref())
}

/// Verify a signed text, returning the report and its rendering
pub fn verify_text(
    text: &str,
    key: &SigningKey,
    options: &VerifyOptions,
    codec: &Codec,
) -> Result<(VerificationReport, String)> {
    let report = verify(text, key, options.hash, codec)?;
    if !report.is_valid {
        warn!(
            first_invalid = ?report.first_invalid(),
            invalid = report.invalid_positions.len(),
            "signature chain does not verify"
        );
    }

    let rendered = if options.json {
        format!("{}\n", serde_json::to_string_pretty(&report)?)
    } else {
        render_report(&report)
    };
    Ok((report, rendered))
}

fn render_report(report: &VerificationReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Valid: {}\n", if report.is_valid { "yes" } else { "no" }));
    output.push_str(&format!("Characters: {}\n", report.total_characters));
    if !report.invalid_positions.is_empty() {
        output.push_str(&format!(
            "Invalid positions: {}\n",
            format_positions(&report.invalid_positions)
        ));
    }
    if let Some(mismatch) = &report.structural_mismatch {
        output.push_str(&format!("Structure: {}\n", mismatch));
    }

    output
}

/// Collapse sorted positions into ranges, e.g. `1, 4-9`
fn format_positions(positions: &[usize]) -> String {
    let mut ranges: Vec<String> = Vec::new();
    let mut iter = positions.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if start == end {
            ranges.push(start.to_string());
        } else {
            ranges.push(format!("{}-{}", start, end));
        }
    }

    ranges.join(", ")
}
