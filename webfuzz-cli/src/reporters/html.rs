//! Self-contained HTML rendering.

use webfuzz::{CheckStatus, Report};

pub fn render(report: &Report) -> String {
    let mut rows = String::new();
    for result in &report.results {
        let (class, label) = match result.status {
            CheckStatus::Pass => ("pass", "pass"),
            CheckStatus::Fail => ("fail", "fail"),
            CheckStatus::Skip => ("skip", "skip"),
        };
        let detail = match (&result.counterexample, &result.error_message) {
            (Some(counterexample), Some(message)) => format!(
                "{}<br><code>{}</code>",
                escape(message),
                escape(&serde_json::to_string(counterexample).unwrap_or_default())
            ),
            (None, Some(message)) => escape(message),
            _ => String::new(),
        };
        rows.push_str(&format!(
            "<tr class=\"{class}\"><td>{}</td><td>{label}</td><td>{}</td>\
             <td>{}</td><td>{}ms</td><td>{detail}</td></tr>\n",
            escape(&result.name),
            result.trials_run,
            result.shrink_attempts,
            result.duration_ms
        ));
    }

    let verdict = if report.passed() { "PASSED" } else { "FAILED" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>webfuzz report - {base_url}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; color: #222; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}
tr.pass td:nth-child(2) {{ color: #1a7f37; }}
tr.fail td:nth-child(2) {{ color: #cf222e; font-weight: bold; }}
tr.skip td {{ color: #888; }}
code {{ background: #f6f8fa; padding: 0 0.2rem; }}
</style>
</head>
<body>
<h1>webfuzz report: {verdict}</h1>
<p>target <strong>{base_url}</strong> &middot; seed <strong>{seed}</strong> &middot; {timestamp}</p>
<p>{passed} passed, {failed} failed, {skipped} skipped</p>
<table>
<tr><th>check</th><th>status</th><th>trials</th><th>shrinks</th><th>duration</th><th>detail</th></tr>
{rows}</table>
</body>
</html>
"#,
        base_url = escape(&report.base_url),
        seed = report.seed,
        timestamp = report.timestamp.to_rfc3339(),
        passed = report.summary.passed,
        failed = report.summary.failed,
        skipped = report.summary.skipped,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use webfuzz::CheckResult;

    #[test]
    fn test_html_escapes_adversarial_counterexamples() {
        let report = Report::new(
            "http://localhost:3000",
            1,
            vec![CheckResult::failed(
                "queryParamFuzzing",
                1,
                0,
                5,
                serde_json::json!({"q": "<script>alert(1)</script>"}),
                "HTTP 500".to_string(),
            )],
        );
        let html = render(&report);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("FAILED"));
    }

    #[test]
    fn test_html_lists_every_check() {
        let report = Report::new(
            "http://localhost:3000",
            1,
            vec![
                CheckResult::passed("noServerError", 50, 10),
                CheckResult::skipped("formFuzzing", "no forms configured".to_string()),
            ],
        );
        let html = render(&report);
        assert!(html.contains("noServerError"));
        assert!(html.contains("no forms configured"));
        assert!(html.contains("PASSED"));
    }
}
