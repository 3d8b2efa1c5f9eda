use std::collections::HashMap;

use shotlog::config::SmtpConfig;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

const FULL: [(&str, &str); 5] = [
    ("SHOTLOG_SMTP_HOST", "smtp.range.test"),
    ("SHOTLOG_SMTP_PORT", "587"),
    ("SHOTLOG_SMTP_USER", "shotlog"),
    ("SHOTLOG_SMTP_PASS", "hunter2"),
    ("SHOTLOG_SMTP_FROM", "no-reply@range.test"),
];

#[test]
fn smtp_absent_when_nothing_is_set() {
    assert!(SmtpConfig::from_lookup(lookup(&[])).unwrap().is_none());
}

#[test]
fn smtp_loaded_when_all_five_are_set() {
    let smtp = SmtpConfig::from_lookup(lookup(&FULL)).unwrap().unwrap();
    assert_eq!(smtp.host, "smtp.range.test");
    assert_eq!(smtp.port, 587);
    assert_eq!(smtp.from, "no-reply@range.test");
}

#[test]
fn partial_smtp_fails_and_names_missing_vars() {
    let err = SmtpConfig::from_lookup(lookup(&FULL[..2])).unwrap_err();
    assert!(err.contains("SHOTLOG_SMTP_USER"), "{err}");
    assert!(err.contains("SHOTLOG_SMTP_PASS"), "{err}");
    assert!(err.contains("SHOTLOG_SMTP_FROM"), "{err}");
    assert!(!err.contains("SHOTLOG_SMTP_HOST"), "{err}");
}

#[test]
fn blank_smtp_value_counts_as_missing() {
    let mut vars = FULL.to_vec();
    vars[3] = ("SHOTLOG_SMTP_PASS", "  ");
    let err = SmtpConfig::from_lookup(lookup(&vars)).unwrap_err();
    assert!(err.contains("SHOTLOG_SMTP_PASS"), "{err}");
}

#[test]
fn invalid_smtp_port_fails() {
    let mut vars = FULL.to_vec();
    vars[1] = ("SHOTLOG_SMTP_PORT", "submission");
    let err = SmtpConfig::from_lookup(lookup(&vars)).unwrap_err();
    assert!(err.contains("SHOTLOG_SMTP_PORT"), "{err}");
}
