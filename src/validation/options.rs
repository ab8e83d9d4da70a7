//! Pattern tables used by the validator: dangerous whole-command patterns and
//! the classification of individual extra options.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::PackageManagerSpec;

/// Whole-command patterns that make a command unsafe no matter what else it says.
/// Matched against the normalized (lowercase, single-spaced) command.
static SUSPICIOUS_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("recursive force delete", r"rm\s+-(rf|fr)"),
        ("redirection to /dev/null", r"/dev/null"),
        ("write into /etc", r">\s*/etc/"),
        ("write into /dev", r">\s*/dev/"),
        ("sudo rm", r"sudo\s+rm"),
        ("rm after a semicolon", r";\s*rm"),
        ("pipe into a shell", r"\|\s*(ba|z|da|k|c|tc|fi)?sh"),
        ("eval", r"eval"),
        ("exec", r"exec"),
        ("trailing redirection or separator", r"[<>|;]$"),
    ]
    .into_iter()
    .map(|(label, pattern)| {
        let regex = Regex::new(pattern).expect("suspicious pattern must compile");
        (label, regex)
    })
    .collect()
});

/// Fragments that make an extra option suspicious wherever they occur in it:
/// shell metacharacters, system locations and commands that turn an install
/// into something else.
const SUSPICIOUS_FRAGMENTS: &[&str] = &[
    "rm", "remove", "delete", "purge", "/etc", "/dev", "/usr", "/var", "/root", "curl", "wget",
    "bash", "sh", "sudo", "su", ";", "|", "&&", "||", ">", ">>", "<", "`", "$(", "eval", "exec",
];

/// Returns the label of the first dangerous pattern found in `normalized`.
pub fn find_suspicious_pattern(normalized: &str) -> Option<&'static str> {
    SUSPICIOUS_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(normalized))
        .map(|(label, _)| *label)
}

/// How a single extra option was judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind<'m> {
    /// Could compromise the system; escalates the whole command.
    Suspicious,
    /// A documented option of the detected manager, with its description.
    Known(&'m str),
    /// Not recognized, but nothing about it looks dangerous.
    Unknown,
}

/// Whether an option contains a suspicious fragment anywhere, so `--remove`,
/// `--format=x` and `--noconfirm` are all suspicious.
pub fn is_suspicious_option(option: &str) -> bool {
    SUSPICIOUS_FRAGMENTS
        .iter()
        .any(|fragment| option.contains(fragment))
}

pub fn classify_option<'m>(option: &str, manager: &'m PackageManagerSpec) -> OptionKind<'m> {
    if is_suspicious_option(option) {
        return OptionKind::Suspicious;
    }
    match manager.describe_option(option) {
        Some(description) => OptionKind::Known(description),
        None => OptionKind::Unknown,
    }
}

/// Extra options sorted into the three classes, preserving command order.
#[derive(Debug, Default)]
pub struct OptionReport<'a, 'm> {
    pub suspicious: Vec<&'a str>,
    pub unknown: Vec<&'a str>,
    pub known: Vec<(&'a str, &'m str)>,
}

impl<'a, 'm> OptionReport<'a, 'm> {
    pub fn analyze(options: &[&'a str], manager: &'m PackageManagerSpec) -> Self {
        let mut report = OptionReport::default();
        for &option in options {
            match classify_option(option, manager) {
                OptionKind::Suspicious => report.suspicious.push(option),
                OptionKind::Known(description) => report.known.push((option, description)),
                OptionKind::Unknown => report.unknown.push(option),
            }
        }
        report
    }
}
