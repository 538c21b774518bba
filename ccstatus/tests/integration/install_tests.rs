use crate::common::{TestHome, assert_contains, assert_json_file, init_test_logging};
use serde_json::json;

#[test]
fn test_install_yes_into_empty_home() {
    init_test_logging();
    crate::test_log!("TEST START: test_install_yes_into_empty_home");
    let home = TestHome::new();

    let output = home.run(&["install", "--yes"]);

    assert!(output.status.success(), "{output:?}");
    assert_json_file(&home.settings, &json!({"statusLine": {"command": "ccstatus"}}));
    assert!(home.backups().is_empty());
    crate::test_log!("TEST PASS: test_install_yes_into_empty_home");
}

#[test]
fn test_install_yes_preserves_foreign_keys() {
    init_test_logging();
    crate::test_log!("TEST START: test_install_yes_preserves_foreign_keys");
    let home = TestHome::new();
    let original = r#"{"otherTool":{"x":1},"statusLine":{"command":"something-else","padding":2}}"#;
    home.write_settings(original);

    let output = home.run(&["install", "-y"]);

    assert!(output.status.success(), "{output:?}");
    assert_json_file(
        &home.settings,
        &json!({
            "otherTool": {"x": 1},
            "statusLine": {"command": "ccstatus", "padding": 2}
        }),
    );
    let backups = home.backups();
    assert_eq!(backups.len(), 1);
    assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), original);
    crate::test_log!("TEST PASS: test_install_yes_preserves_foreign_keys");
}

#[test]
fn test_install_twice_is_a_noop() {
    init_test_logging();
    let home = TestHome::new();

    assert!(home.run(&["install", "--yes"]).status.success());
    let first = home.read_settings();
    let output = home.run(&["install", "--yes"]);

    assert!(output.status.success());
    assert_contains(&String::from_utf8_lossy(&output.stdout), "already configured");
    assert_eq!(home.read_settings(), first);
    assert!(home.backups().is_empty());
}

#[test]
fn test_install_without_terminal_declines() {
    init_test_logging();
    let home = TestHome::new();
    home.write_settings("{}");

    let output = home.run(&["install"]);

    assert!(output.status.success());
    assert_contains(&String::from_utf8_lossy(&output.stdout), "Installation cancelled");
    assert_eq!(home.read_settings(), "{}");
    assert!(home.backups().is_empty());
}

#[test]
fn test_install_rejects_invalid_settings() {
    init_test_logging();
    let home = TestHome::new();
    home.write_settings("[1,2,3]");

    let output = home.run(&["install", "--yes"]);

    assert_eq!(output.status.code(), Some(1));
    assert_contains(&String::from_utf8_lossy(&output.stderr), "error: failed to read");
    assert_eq!(home.read_settings(), "[1,2,3]");
}

#[test]
fn test_uninstall_yes_removes_entry_with_safety_backup() {
    init_test_logging();
    crate::test_log!("TEST START: test_uninstall_yes_removes_entry_with_safety_backup");
    let home = TestHome::new();
    home.write_settings(r#"{"theme":"dark","statusLine":{"command":"ccstatus"}}"#);

    let output = home.run(&["uninstall", "--yes"]);

    assert!(output.status.success(), "{output:?}");
    assert_json_file(&home.settings, &json!({"theme": "dark"}));
    assert_eq!(home.backups().len(), 1);
    crate::test_log!("TEST PASS: test_uninstall_yes_removes_entry_with_safety_backup");
}

#[test]
fn test_uninstall_restore_uses_latest_backup() {
    init_test_logging();
    let home = TestHome::new();
    home.write_settings(r#"{"statusLine":{"command":"previous"}}"#);
    assert!(home.run(&["install", "--yes"]).status.success());

    let output = home.run(&["uninstall", "--yes", "--restore"]);

    assert!(output.status.success(), "{output:?}");
    assert_eq!(home.read_settings(), r#"{"statusLine":{"command":"previous"}}"#);
}

#[test]
fn test_uninstall_leaves_foreign_statusline_alone() {
    init_test_logging();
    let home = TestHome::new();
    let original = r#"{"statusLine":{"command":"other"}}"#;
    home.write_settings(original);

    let output = home.run(&["uninstall", "--yes"]);

    assert!(output.status.success());
    assert_contains(&String::from_utf8_lossy(&output.stdout), "Nothing to uninstall");
    assert_eq!(home.read_settings(), original);
    assert!(home.backups().is_empty());
}
