use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

fn send_request(
    stdin: &mut std::process::ChildStdin,
    stdout: &mut BufReader<std::process::ChildStdout>,
    request: serde_json::Value,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let serialized = serde_json::to_string(&request)?;
    writeln!(stdin, "{serialized}")?;
    stdin.flush()?;

    let mut line = String::new();
    stdout.read_line(&mut line)?;
    let response: serde_json::Value = serde_json::from_str(line.trim())?;
    Ok(response)
}

fn request(id: u64, method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

#[test]
fn clear_all_needs_confirmation() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut child = Command::new(env!("CARGO_BIN_EXE_ai-tool-builder"))
        .args(["serve", "--stdio", "--config"])
        .arg(dir.path().join("missing.toml"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    send_request(&mut stdin, &mut stdout, request(1, "tool.add", serde_json::json!({})))?;
    send_request(&mut stdin, &mut stdout, request(2, "tool.add", serde_json::json!({})))?;

    let declined = send_request(
        &mut stdin,
        &mut stdout,
        request(3, "tools.clear_all", serde_json::json!({})),
    )?;
    let structured = &declined["result"]["structuredContent"];
    assert_eq!(structured["cleared"], false);
    assert_eq!(structured["schema"].as_array().map(Vec::len), Some(2));

    let cleared = send_request(
        &mut stdin,
        &mut stdout,
        request(4, "tools.clear_all", serde_json::json!({"confirm": true})),
    )?;
    let structured = &cleared["result"]["structuredContent"];
    assert_eq!(structured["cleared"], true);
    assert_eq!(structured["schema"], serde_json::json!([]));

    let added = send_request(&mut stdin, &mut stdout, request(5, "tool.add", serde_json::json!({})))?;
    assert_eq!(added["result"]["structuredContent"]["tool"]["id"], 1);

    let _ = child.kill();
    Ok(())
}

#[test]
fn yes_flag_confirms_clear_all() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut child = Command::new(env!("CARGO_BIN_EXE_ai-tool-builder"))
        .args(["serve", "--stdio", "--yes", "--config"])
        .arg(dir.path().join("missing.toml"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    send_request(&mut stdin, &mut stdout, request(1, "tool.add", serde_json::json!({})))?;
    let cleared = send_request(
        &mut stdin,
        &mut stdout,
        request(2, "tools.clear_all", serde_json::json!({})),
    )?;
    assert_eq!(cleared["result"]["structuredContent"]["cleared"], true);

    let kept = send_request(
        &mut stdin,
        &mut stdout,
        request(3, "tools.clear_all", serde_json::json!({"confirm": false})),
    )?;
    assert_eq!(kept["result"]["structuredContent"]["cleared"], false);

    let _ = child.kill();
    Ok(())
}
