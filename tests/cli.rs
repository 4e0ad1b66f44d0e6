use std::error::Error;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn pawpad_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pawpad"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(pawpad_command().args(args).output()?)
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Result<Output, Box<dyn Error>> {
    let mut child = pawpad_command()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or("stdin not captured")?
        .write_all(stdin.as_bytes())?;
    Ok(child.wait_with_output()?)
}

#[test]
fn version_flag_prints_build_information() -> Result<(), Box<dyn Error>> {
    let output = run(&["--version"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("pawpad "), "unexpected version line: {}", stdout);
    assert!(stdout.contains("build"), "missing build value: {}", stdout);
    Ok(())
}

#[test]
fn running_without_subcommand_displays_help() -> Result<(), Box<dyn Error>> {
    let output = pawpad_command().output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Usage: pawpad"), "help output missing usage: {}", stdout);
    assert!(stdout.contains("Commands:"), "help output missing commands: {}", stdout);
    Ok(())
}

#[test]
fn sign_verify_extract_flow() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let key = dir.path().join("key.bin");
    let input = dir.path().join("doc.txt");
    let signed = dir.path().join("doc.signed.txt");
    let recovered = dir.path().join("doc.original.txt");

    fs::write(&key, b"\x00\x01shared secret bytes")?;
    fs::write(&input, "Chain of custody.")?;

    let sign = run(&[
        "sign",
        "--key-file",
        key.to_str().unwrap(),
        "--input",
        input.to_str().unwrap(),
        "--output",
        signed.to_str().unwrap(),
    ])?;
    assert!(
        sign.status.success(),
        "sign failed: {}",
        String::from_utf8_lossy(&sign.stderr)
    );
    assert!(String::from_utf8(sign.stdout)?.contains("Wrote"));

    let verify = run(&[
        "verify",
        "--key-file",
        key.to_str().unwrap(),
        "--input",
        signed.to_str().unwrap(),
    ])?;
    assert!(
        verify.status.success(),
        "verify failed: {}",
        String::from_utf8_lossy(&verify.stderr)
    );
    assert!(String::from_utf8(verify.stdout)?.contains("Valid: yes"));

    let extract = run(&[
        "extract",
        "--input",
        signed.to_str().unwrap(),
        "--output",
        recovered.to_str().unwrap(),
    ])?;
    assert!(extract.status.success());
    assert_eq!(fs::read_to_string(&recovered)?, "Chain of custody.");

    Ok(())
}

#[test]
fn verify_reports_tampered_positions() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let signed = dir.path().join("signed.txt");

    let sign = run(&[
        "sign",
        "--key",
        "k",
        "--text",
        "abcd",
        "--output",
        signed.to_str().unwrap(),
    ])?;
    assert!(sign.status.success());

    let tampered = fs::read_to_string(&signed)?.replacen('c', "C", 1);
    fs::write(&signed, tampered)?;

    let verify = run(&[
        "verify",
        "--key",
        "k",
        "--json",
        "--input",
        signed.to_str().unwrap(),
    ])?;
    assert!(!verify.status.success(), "tampered text must not verify");

    let report: serde_json::Value = serde_json::from_slice(&verify.stdout)?;
    assert_eq!(report["is_valid"], false);
    assert_eq!(report["invalid_positions"], serde_json::json!([2, 3]));
    assert_eq!(report["total_characters"], 4);
    assert!(String::from_utf8(verify.stderr)?.contains("position 2"));

    Ok(())
}

#[test]
fn verify_with_wrong_key_fails() -> Result<(), Box<dyn Error>> {
    let sign = run(&["sign", "--key", "right", "--text", "xyz"])?;
    assert!(sign.status.success());
    let signed = String::from_utf8(sign.stdout)?;

    let verify = run_with_stdin(&["verify", "--key", "wrong"], &signed)?;
    assert!(!verify.status.success());
    assert!(String::from_utf8(verify.stdout)?.contains("Valid: no"));

    Ok(())
}

#[test]
fn encode_then_decode_fingerprint() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let encoded = dir.path().join("encoded.txt");

    let encode = run(&[
        "encode",
        "--text",
        "watermarked",
        "--fingerprint",
        "c0ffee",
        "--output",
        encoded.to_str().unwrap(),
    ])?;
    assert!(encode.status.success());
    assert!(String::from_utf8(encode.stdout)?.contains("Fingerprint: c0ffee"));

    let decode = run(&["decode", "--input", encoded.to_str().unwrap()])?;
    assert!(decode.status.success());
    assert_eq!(String::from_utf8(decode.stdout)?, "Fingerprint: c0ffee\n");

    let detect = run(&[
        "decode",
        "--input",
        encoded.to_str().unwrap(),
        "--fingerprint",
        "c0ffef",
    ])?;
    assert!(String::from_utf8(detect.stdout)?.contains("not present"));

    Ok(())
}

#[test]
fn hide_then_reveal_through_stdin() -> Result<(), Box<dyn Error>> {
    let hide = run(&["hide", "--text", "🐾", "--message", "paw print", "--single-char"])?;
    assert!(
        hide.status.success(),
        "hide failed: {}",
        String::from_utf8_lossy(&hide.stderr)
    );
    let hidden = String::from_utf8(hide.stdout)?;

    let reveal = run_with_stdin(&["reveal"], &hidden)?;
    assert!(reveal.status.success());
    assert_eq!(String::from_utf8(reveal.stdout)?, "paw print\n");

    Ok(())
}

#[test]
fn single_char_mode_rejects_longer_host() -> Result<(), Box<dyn Error>> {
    let hide = run(&["hide", "--text", "ab", "--message", "m", "--single-char"])?;
    assert!(!hide.status.success());
    assert!(String::from_utf8(hide.stderr)?.contains("exactly one host character"));
    Ok(())
}

#[test]
fn generate_prints_hex_of_requested_length() -> Result<(), Box<dyn Error>> {
    let output = run(&["generate", "--length", "8"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.trim().len(), 16);
    assert!(stdout.trim().chars().all(|c| c.is_ascii_hexdigit()));
    Ok(())
}

#[test]
fn analyze_lists_carriers() -> Result<(), Box<dyn Error>> {
    let encode = run(&["encode", "--text", "ab", "--fingerprint", "01"])?;
    let stdout = String::from_utf8(encode.stdout)?;
    let encoded = stdout.lines().nth(1).ok_or("missing encoded line")?;

    let analyze = run(&["analyze", "--text", encoded])?;
    assert!(analyze.status.success());
    let report = String::from_utf8(analyze.stdout)?;
    assert!(report.contains("U+0061"));
    assert!(report.contains("Hidden data detected in 2 of 2 characters"));
    Ok(())
}

#[test]
fn sign_without_key_is_an_error() -> Result<(), Box<dyn Error>> {
    let output = run(&["sign", "--text", "abc"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("no key provided"));
    Ok(())
}
