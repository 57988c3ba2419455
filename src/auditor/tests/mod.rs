mod checks_tests;

use crate::config::{AuditConfig, AuditTarget};
use std::path::PathBuf;

pub const BASE_URL: &str = "http://storybook.test";

/// Fresh screenshot directory per test
fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "storybook-audit-{}-{}",
        test,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Config pointing at the mock Storybook with the given targets
fn test_config(test: &str, targets: &[(&str, &str)]) -> AuditConfig {
    let mut config = AuditConfig::new(BASE_URL);
    config.targets = targets
        .iter()
        .map(|(name, path)| AuditTarget::new(*name, *path))
        .collect();
    config.screenshot_dir = scratch_dir(test);
    config
}

/// URL the auditor will request for a target path
fn page_url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

fn output_text(out: Vec<u8>) -> String {
    String::from_utf8(out).expect("report is valid UTF-8")
}
