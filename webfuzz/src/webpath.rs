//! Path and query-parameter generators, with glob-constrained sampling.
//!
//! Glob semantics: `**` matches the literal prefix before it plus anything
//! following, including further path separators; a single `*` matches any run
//! of characters excluding `/`; a pattern with no wildcard requires exact
//! equality.

use regex::Regex;

use crate::adversarial;
use crate::arbitrary::{
    boxed, constant, dict_of, filter, one_of, string_of, Arbitrary, BoxedArb, DictArb, OneOfArb,
    StringArb, VecArb,
};
use crate::config::PathConfig;
use crate::error::ArbitraryError;

const PATH_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789-_";

/// Paths most applications serve regardless of configuration.
const COMMON_PATHS: &[&str] = &[
    "/", "/index", "/home", "/about", "/contact", "/login", "/logout", "/register", "/signup",
    "/dashboard", "/profile", "/settings", "/admin", "/api", "/search", "/help", "/faq",
    "/privacy", "/terms", "/404", "/500",
];

/// Reduce include patterns to concrete navigable base paths.
///
/// A glob pattern contributes the literal path before its first wildcard
/// (or `/` when nothing remains); duplicates are dropped, order preserved.
pub fn expand_paths(patterns: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::new();

    for pattern in patterns {
        let base = match pattern.find('*') {
            Some(idx) => {
                let prefix = pattern[..idx].strip_suffix('/').unwrap_or(&pattern[..idx]);
                if prefix.is_empty() {
                    "/".to_string()
                } else {
                    prefix.to_string()
                }
            }
            None => pattern.clone(),
        };
        if !expanded.contains(&base) {
            expanded.push(base);
        }
    }

    expanded
}

/// Does `path` match one glob `pattern`?
pub fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(idx) = pattern.find("**") {
        // ** matches anything from here on, separators included.
        path.starts_with(&pattern[..idx])
    } else if pattern.contains('*') {
        // * matches any run of characters except the separator.
        let expr = format!(
            "^{}$",
            pattern
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("[^/]*")
        );
        Regex::new(&expr)
            .map(|re| re.is_match(path))
            .unwrap_or(false)
    } else {
        path == pattern
    }
}

/// Does `path` match any pattern in the set?
pub fn matches_any(path: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| matches_pattern(path, pattern))
}

/// Synthetic paths of 1..=5 random segments, e.g. `/a1/b-2`.
pub struct SegmentPathArb {
    segments: VecArb<StringArb>,
}

impl SegmentPathArb {
    pub fn new() -> Self {
        Self {
            segments: VecArb::new(string_of(PATH_CHARS, 1, 10), 1, 5),
        }
    }

    fn join(segments: &[String]) -> String {
        format!("/{}", segments.join("/"))
    }

    fn split(path: &str) -> Vec<String> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for SegmentPathArb {
    fn default() -> Self {
        Self::new()
    }
}

impl Arbitrary for SegmentPathArb {
    type Value = String;

    fn generate(&self, rng: &mut dyn rand::RngCore) -> Result<String, ArbitraryError> {
        Ok(Self::join(&self.segments.generate(rng)?))
    }

    fn shrink(&self, value: &String) -> Box<dyn Iterator<Item = String>> {
        let segments = Self::split(value);
        if segments.is_empty() {
            return Box::new(std::iter::empty());
        }
        Box::new(
            self.segments
                .shrink(&segments)
                .map(|segs| Self::join(&segs)),
        )
    }
}

/// Paths drawn from configured include expansions, the common-path
/// catalogue, or synthetic random segments, with everything matching the
/// exclude set rejected.
pub fn path_arbitrary(paths: &PathConfig) -> BoxedArb<String> {
    let expanded = expand_paths(&paths.include);

    let configured: BoxedArb<String> = if expanded.is_empty() {
        boxed(constant("/".to_string()))
    } else {
        boxed(OneOfArb::constants(expanded))
    };

    let union = one_of(vec![
        configured,
        boxed(SegmentPathArb::new()),
        boxed(OneOfArb::constants(
            COMMON_PATHS.iter().map(|p| p.to_string()).collect(),
        )),
    ]);

    let exclude = paths.exclude.clone();
    boxed(filter(union, move |path: &String| {
        !matches_any(path, &exclude)
    }))
}

/// Query parameter maps: random keys to adversarial, typed-looking, or plain
/// string values.
pub fn query_params() -> DictArb {
    let value: BoxedArb<String> = boxed(one_of(vec![
        boxed(StringArb::ascii(0, 20)),
        boxed(constant(String::new())),
        boxed(constant("null".to_string())),
        boxed(constant("undefined".to_string())),
        boxed(constant("true".to_string())),
        boxed(constant("false".to_string())),
        boxed(string_of("0123456789", 1, 10)),
        boxed(constant("<script>alert(1)</script>".to_string())),
        boxed(constant("' OR '1'='1".to_string())),
        boxed(adversarial::adversarial_string()),
    ]));

    dict_of(boxed(string_of(PATH_CHARS, 1, 20)), value, 0, 6)
}
