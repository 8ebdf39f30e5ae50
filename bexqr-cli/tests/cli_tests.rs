//! End-to-end tests for the bexqr binary
//!
//! These run the compiled binary directly and need no network access.

use std::process::{Command, Output};
use tempfile::TempDir;

const ADDRESS: &str = "BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j";

fn bexqr(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bexqr"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute bexqr")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_help() {
    let output = bexqr(&["--help"]);
    assert!(output.status.success());

    let text = stdout(&output);
    for command in ["encode", "parse", "check", "show", "svg"] {
        assert!(text.contains(command), "Help should mention '{}'", command);
    }
}

#[test]
fn test_encode_prints_uri() {
    let output = bexqr(&[
        "encode",
        "--address",
        ADDRESS,
        "--amount",
        "5",
        "--vendor-field",
        "Hello!",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "ark:BQQsQfMLneMx4AjvCUvgX3CRSi1wJHdf1j?amount=5&vendorField=Hello%21"
    );
}

#[test]
fn test_encode_rejects_bad_address() {
    let output = bexqr(&["encode", "--address", "nope"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("address"), "stderr: {}", stderr);
}

#[test]
fn test_parse_json() {
    let uri = format!("ark:{}?amount=10&label=shop", ADDRESS);
    let output = bexqr(&["parse", &uri, "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["address"], ADDRESS);
    assert_eq!(value["amount"], 10.0);
    assert_eq!(value["label"], "shop");
    assert!(value.get("vendorField").is_none());
}

#[test]
fn test_parse_verbose_shows_params_after_address() {
    let uri = format!("ark:{}foo=bar&amount=3", ADDRESS);
    let output = bexqr(&["parse", &uri, "--verbose"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Amount: 3"), "stdout: {}", text);
    assert!(text.contains("foo: bar"), "stdout: {}", text);
}

#[test]
fn test_parse_rejects_foreign_uri() {
    let output = bexqr(&["parse", "bitcoin:bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"]);
    assert!(!output.status.success());
}

#[test]
fn test_check_exit_status() {
    assert!(bexqr(&["check", &format!("ark:{}", ADDRESS)]).status.success());
    assert!(!bexqr(&["check", "bad:xyz"]).status.success());
}

#[test]
fn test_show_renders_terminal_qr() {
    let output = bexqr(&["show", "--address", ADDRESS, "--label", "tip"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains(&format!("ark:{}?label=tip", ADDRESS)));
    assert!(text.contains('█') || text.contains('▀') || text.contains('▄'));
}

#[test]
fn test_show_logo_requires_size() {
    let output = bexqr(&["show", "--address", ADDRESS, "--show-logo"]);
    assert!(!output.status.success());

    let output = bexqr(&["show", "--address", ADDRESS, "--show-logo", "--size", "150"]);
    assert!(output.status.success());
}

#[test]
fn test_show_rejects_non_finite_amount() {
    for amount in ["NaN", "inf"] {
        let output = bexqr(&["show", "--address", ADDRESS, "--amount", amount]);
        assert!(!output.status.success(), "amount {} was accepted", amount);

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("invalid amount"), "stderr: {}", stderr);
    }
}

#[test]
fn test_show_without_fields_fails() {
    let output = bexqr(&["show"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not loaded"), "stderr: {}", stderr);
}

#[test]
fn test_svg_from_request_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let request = dir.path().join("request.json");
    let svg = dir.path().join("qr.svg");

    std::fs::write(
        &request,
        format!(
            r#"{{"address":"{}","amount":"2.5","vendorField":"order 42","size":300,"showLogo":true}}"#,
            ADDRESS
        ),
    )
    .unwrap();

    let output = bexqr(&[
        "svg",
        "--request",
        request.to_str().unwrap(),
        "--output",
        svg.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let contents = std::fs::read_to_string(&svg).unwrap();
    assert!(contents.contains("<svg"));
    assert!(stdout(&output).contains("vendorField=order%2042"));
}
