//! Adversarial string corpus and generator.
//!
//! The corpus is a closed, enumerable set of known-hostile payloads: markup
//! injection, SQL injection, path traversal, command injection, control
//! characters, oversized strings, format strings, and numeric-edge strings.
//! Members are fixed literals, never mutated, so a seed replays the exact
//! same payloads. The generator unions the corpus with plain random strings
//! for general fuzzing coverage.

use crate::arbitrary::{boxed, one_of, BoxedArb, OneOfArb, StringArb};

/// The fixed adversarial payload corpus.
///
/// Includes the empty string, the smallest member branch-swap shrinking
/// can propose.
pub fn corpus() -> Vec<String> {
    let mut payloads: Vec<String> = [
        // Empty and whitespace
        "",
        "   ",
        "\t\t\t",
        // Markup injection
        "<script>alert(1)</script>",
        "\"><img src=x onerror=alert(1)>",
        "'-alert(1)-'",
        "<svg onload=alert(1)>",
        "javascript:alert(1)",
        "<iframe src=\"javascript:alert(1)\">",
        "{{constructor.constructor(\"alert(1)\")()}}",
        "<body onload=alert(1)>",
        // SQL injection
        "' OR '1'='1",
        "1; DROP TABLE users;--",
        "' UNION SELECT * FROM users--",
        "1' AND '1'='1",
        "admin'--",
        // Path traversal
        "../../../etc/passwd",
        "..\\..\\..\\windows\\system32\\config\\sam",
        "%2e%2e%2f%2e%2e%2f",
        // Command injection
        "; ls -la",
        "| cat /etc/passwd",
        "$(whoami)",
        "`id`",
        // Control characters
        "\x00\x01\x02",
        "\n\r\t",
        "\u{0}",
        "\u{FFFE}\u{FFFF}",
        // Unicode edge cases
        "\u{20BB7}\u{91CE}\u{5BB6}",
        "\u{1F389}\u{1F38A}\u{1F388}",
        "\u{202E}ABC",
        "\u{10000}",
        // Format strings
        "%s%s%s%s%s",
        "%n%n%n%n",
        "{0}{1}{2}",
        // JSON/XML injection
        "{\"__proto__\": {\"admin\": true}}",
        "]]><!--",
        "<?xml version=\"1.0\"?><!DOCTYPE foo [<!ENTITY xxe SYSTEM \"file:///etc/passwd\">]>",
        // Numbers as strings
        "0",
        "-1",
        "9999999999999999999",
        "1e308",
        "NaN",
        "Infinity",
        // Boolean-like
        "true",
        "false",
        "null",
        "undefined",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();

    // Oversized strings
    payloads.push("a".repeat(1000));
    payloads.push("a".repeat(10000));
    payloads.push("A".repeat(65536));

    payloads
}

/// Union of the adversarial corpus with plain random strings.
pub fn adversarial_string() -> OneOfArb<String> {
    OneOfArb::weighted(vec![
        (2, boxed(OneOfArb::constants(corpus()))),
        (1, boxed(StringArb::ascii(0, 30))),
        (1, boxed(StringArb::ascii(100, 500))),
    ])
}

/// A plain string, an adversarial payload, or an oversized string; the
/// value mix fed into form input fields.
pub fn fuzz_value() -> BoxedArb<String> {
    boxed(one_of(vec![
        boxed(StringArb::ascii(0, 30)),
        boxed(adversarial_string()),
        boxed(StringArb::ascii(0, 10000)),
    ]))
}
