use crate::analyze::analyze;
use crate::codec::Codec;
use crate::error::Result;

/// Render a per-character table of hidden data
pub fn show_analysis(text: &str, json: bool, codec: &Codec) -> Result<String> {
    let report = analyze(text, codec);
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&report)?));
    }

    let mut output = String::new();
    output.push_str("Character Analysis\n");
    output.push_str("==================\n\n");

    for entry in &report {
        let carrier = match entry.carrier {
            Some(c) if !c.is_control() => c.to_string(),
            Some(_) => "\u{FFFD}".to_string(),
            None => "-".to_string(),
        };
        output.push_str(&format!(
            "{:>5}  {:<3} {:<9} {}\n",
            entry.position,
            carrier,
            entry.codepoint.as_deref().unwrap_or("(none)"),
            if entry.has_payload() { entry.payload.as_str() } else { "-" }
        ));
    }

    let carrying = report.iter().filter(|e| e.has_payload()).count();
    output.push('\n');
    if carrying > 0 {
        output.push_str(&format!(
            "Hidden data detected in {} of {} characters\n",
            carrying,
            report.len()
        ));
    } else {
        output.push_str("No hidden data found\n");
    }

    Ok(output)
}
