//! The iOS-readiness transform: one pass over a WireGuard `.conf` that pins
//! the `DNS` and `AllowedIPs` fields to mobile-friendly values, then writes
//! the result and its QR rendering next to the input.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProcessError, ProcessResult};

pub mod ipop;
pub mod qr;

const MOBILE_DNS: &str = "0.0.0.0/32";

/// A config field to overwrite: canonical key plus the fixed value every
/// occurrence is replaced with.
pub struct FieldRule {
    pub key: &'static str,
    pub value: String,
}

impl FieldRule {
    /// Matches `^<key>\s*=` against a single line, ASCII-case-insensitively.
    fn matches(&self, line: &str) -> bool {
        match line.get(..self.key.len()) {
            Some(head) if head.eq_ignore_ascii_case(self.key) => {
                line[self.key.len()..].trim_start().starts_with('=')
            }
            _ => false,
        }
    }

    fn render(&self) -> String {
        format!("{} = {}", self.key, self.value)
    }
}

/// The two overwrites applied to every config.
pub fn mobile_rules() -> [FieldRule; 2] {
    [
        FieldRule {
            key: "DNS",
            value: MOBILE_DNS.to_string(),
        },
        FieldRule {
            key: "AllowedIPs",
            value: ipop::mobile_allowed_ips()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        },
    ]
}

/// Replaces every line whose key matches one of `rules` with that rule's
/// canonical rendering. Other lines, and the terminators of replaced lines,
/// pass through untouched.
pub fn rewrite_fields(content: &str, rules: &[FieldRule]) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        let (body, eol) = split_eol(line);
        match rules.iter().find(|rule| rule.matches(body)) {
            Some(rule) => {
                out.push_str(&rule.render());
                out.push_str(eol);
            }
            None => out.push_str(line),
        }
    }
    out
}

fn split_eol(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// The two files a run leaves behind, both beside the input.
pub struct Artifacts {
    pub conf_path: PathBuf,
    pub qr_path: PathBuf,
}

impl Artifacts {
    pub fn derive(input: &Path) -> Artifacts {
        let parent = input.parent().unwrap_or_else(|| Path::new(""));
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let ext = input
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Artifacts {
            conf_path: parent.join(format!("{}-iOSReady{}", stem, ext)),
            qr_path: parent.join(format!("{}-iOSReady-QR.png", stem)),
        }
    }
}

/// Runs the whole transform: read, rewrite, write the new config, render the
/// QR code. Any failure aborts the remaining steps; existing artifacts are
/// overwritten.
pub fn process(input: &Path) -> ProcessResult<Artifacts> {
    debug!("Reading config from {}", input.display());
    let content = fs::read_to_string(input).map_err(|source| ProcessError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let rewritten = rewrite_fields(&content, &mobile_rules());
    let artifacts = Artifacts::derive(input);

    fs::write(&artifacts.conf_path, &rewritten).map_err(|source| ProcessError::Write {
        path: artifacts.conf_path.clone(),
        source,
    })?;
    info!("Modified config saved as {}", artifacts.conf_path.display());

    qr::save_png(&rewritten, &artifacts.qr_path)?;
    info!("QR code saved as {}", artifacts.qr_path.display());

    Ok(artifacts)
}
