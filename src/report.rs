use crate::error::Result;
use crate::results::{PageAuditResult, RunSummary};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 70;

/// Opening box printed once per run
pub fn write_header<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        r#"
╔═══════════════════════════════════════════════════════════╗
║   EDUCACROSS STORYBOOK AUDIT - AUTOMATED                 ║
║   Testes de Interação, Acessibilidade e Visual           ║
╚═══════════════════════════════════════════════════════════╝"#
    )?;
    Ok(())
}

/// Section banner: a blank line, a rule, the title, another rule
pub fn write_banner<W: Write>(out: &mut W, title: &str) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}\n{title}\n{rule}")?;
    Ok(())
}

/// Final pass/fail tally
pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> Result<()> {
    write_banner(out, "RESUMO")?;
    writeln!(out, "\nPáginas testadas: {}", summary.total)?;
    writeln!(out, "✓ Passou: {}", summary.passed)?;
    writeln!(out, "✗ Falhou: {}", summary.failed)?;
    writeln!(out, "\nTaxa de sucesso: {:.1}%", summary.success_rate())?;

    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "Audit completo! Verifique os screenshots gerados.")?;
    writeln!(out, "{rule}\n")?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: RunSummary,
    success_rate: f64,
    results: &'a [PageAuditResult],
}

/// Write results and summary to `path` as pretty JSON
pub fn write_json_report(path: &Path, results: &[PageAuditResult]) -> Result<()> {
    let summary = RunSummary::from_results(results);
    let report = JsonReport {
        summary,
        success_rate: summary.success_rate(),
        results,
    };

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(path, json)?;
    ::log::info!("Wrote JSON report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_summary_all_failed() {
        let results = vec![
            PageAuditResult::fail("A".into(), "http://x/a".into(), "refused".into()),
            PageAuditResult::fail("B".into(), "http://x/b".into(), "refused".into()),
        ];
        let mut out = Vec::new();
        write_summary(&mut out, &RunSummary::from_results(&results)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Páginas testadas: 2"));
        assert!(text.contains("✓ Passou: 0"));
        assert!(text.contains("✗ Falhou: 2"));
        assert!(text.contains("Taxa de sucesso: 0.0%"));
    }

    #[test]
    fn test_summary_rate_one_decimal() {
        let summary = RunSummary {
            total: 7,
            passed: 6,
            failed: 1,
        };
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Taxa de sucesso: 85.7%"));
    }

    #[test]
    fn test_banner_layout() {
        let mut out = Vec::new();
        write_banner(&mut out, "TESTANDO: Button").unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1].len(), RULE_WIDTH);
        assert_eq!(lines[2], "TESTANDO: Button");
        assert_eq!(lines[3], lines[1]);
    }

    #[test]
    fn test_json_report_file() {
        let path = std::env::temp_dir().join(format!(
            "storybook-audit-report-{}.json",
            std::process::id()
        ));
        let results = vec![
            PageAuditResult::pass(
                "Button".into(),
                "http://x/button".into(),
                PathBuf::from("audit-button.png"),
                vec!["boom".into()],
            ),
            PageAuditResult::fail("Card".into(), "http://x/card".into(), "timeout".into()),
        ];

        write_json_report(&path, &results).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(json["summary"]["passed"], 1);
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["success_rate"], 50.0);
        assert_eq!(json["results"][0]["console_errors"][0], "boom");
        assert_eq!(json["results"][1]["status"], "fail");
        assert_eq!(json["results"][1]["error"], "timeout");
    }
}
