use crate::common::{TestHome, assert_not_contains, init_test_logging};
use std::fs;

const PAYLOAD: &str = r#"{"model":{"id":"claude-opus","display_name":"Opus"},"workspace":{"current_dir":"/tmp"}}"#;

#[test]
fn test_statusline_falls_back_when_api_unreachable() {
    init_test_logging();
    crate::test_log!("TEST START: test_statusline_falls_back_when_api_unreachable");
    let home = TestHome::new();

    let output = home.run_with_stdin(&[], PAYLOAD, Some("test-token-0123456789"));

    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Opus | Session: --% | Week: --%"
    );
    crate::test_log!("TEST PASS: test_statusline_falls_back_when_api_unreachable");
}

#[test]
fn test_statusline_unknown_model_on_bad_input() {
    init_test_logging();
    let home = TestHome::new();

    let output = home.run_with_stdin(&[], "not json", Some("test-token-0123456789"));

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Unknown | Session: --% | Week: --%"
    );
}

#[test]
fn test_statusline_respects_preferences() {
    init_test_logging();
    let home = TestHome::new();
    fs::create_dir_all(&home.claude_dir).unwrap();
    fs::write(
        home.claude_dir.join("ccstatus.json"),
        r#"{"show_weekly_usage": false}"#,
    )
    .unwrap();

    let output = home.run_with_stdin(&[], PAYLOAD, Some("test-token-0123456789"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Opus | Session: --%");
    assert_not_contains(&stdout, "Week");
}

#[test]
fn test_statusline_keeps_stdout_clean_when_verbose() {
    init_test_logging();
    let home = TestHome::new();

    let output = home.run_with_stdin(&["--verbose"], PAYLOAD, Some("test-token-0123456789"));

    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Opus | Session: --% | Week: --%"
    );
    assert!(!output.stderr.is_empty(), "verbose logs should go to stderr");
}
