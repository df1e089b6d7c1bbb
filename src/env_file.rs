// src/env_file.rs
//! Server dotenv configuration.

#![deny(missing_docs)]

use crate::error::BootstrapResult;
use crate::prompt::{Selections, validate_api_key};
use anyhow::{Context, anyhow};
use std::fmt;
use std::fs;
use std::path::Path;

/// Variable holding the OpenAI key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Written when the key prompt was left empty.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_OPENAI_KEY";
/// ui-ray log collection flag.
pub const TELEMETRY_VAR: &str = "OPENV0__COLLECT_UIRAY";

/// A dotenv value: strings are quoted, integers are bare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    /// Rendered as `"value"`.
    Str(String),
    /// Rendered as-is.
    Int(i64),
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Str(s) => write!(f, "\"{s}\""),
            EnvValue::Int(n) => write!(f, "{n}"),
        }
    }
}

/// The server's `.env`, built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    entries: Vec<(&'static str, EnvValue)>,
}

impl EnvConfig {
    /// Overlay user answers on the defaults.
    ///
    /// When `key_in_environment` is set the server reads the key from its own
    /// environment and no `OPENAI_API_KEY` line is written.
    pub fn build(selections: &Selections, key_in_environment: bool) -> Self {
        let str_ = |s: &str| EnvValue::Str(s.to_string());
        let mut entries = vec![
            ("OPENAI_MODEL", str_("gpt-4")),
            (
                "PASS__CONTEXT__COMPONENTS_LIBRARY_EXAMPLES__TOKEN_LIMIT",
                EnvValue::Int(600),
            ),
            (TELEMETRY_VAR, EnvValue::Int(i64::from(selections.telemetry))),
            ("OPENV0__API", str_("https://api.openv0.com")),
            // read by the server, not acted on yet
            ("API__GENERATE_ATTEMPTS", EnvValue::Int(1)),
            ("WEBAPP_ROOT", str_("../webapp")),
        ];
        if !key_in_environment {
            let key = if selections.api_key.is_empty() {
                API_KEY_PLACEHOLDER
            } else {
                selections.api_key.as_str()
            };
            entries.push((API_KEY_VAR, str_(key)));
        }
        Self { entries }
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[(&'static str, EnvValue)] {
        &self.entries
    }

    /// Value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// `KEY=value` lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(&format!("{key}={value}\n"));
        }
        out
    }

    /// Write to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> BootstrapResult<()> {
        for (key, value) in &self.entries {
            if let EnvValue::Str(s) = value {
                validate_api_key(s).map_err(|e| anyhow!("{key}: {e}"))?;
            }
        }
        fs::write(path, self.render()).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Framework;

    fn selections(api_key: &str, telemetry: bool) -> Selections {
        Selections {
            framework: Framework::React,
            components: "shadcn".into(),
            icons: "lucide".into(),
            api_key: api_key.into(),
            telemetry,
        }
    }

    #[test]
    fn renders_quoted_strings_and_bare_integers() {
        let cfg = EnvConfig::build(&selections("sk-test", true), false);
        assert_eq!(
            cfg.render(),
            "OPENAI_MODEL=\"gpt-4\"\n\
             PASS__CONTEXT__COMPONENTS_LIBRARY_EXAMPLES__TOKEN_LIMIT=600\n\
             OPENV0__COLLECT_UIRAY=1\n\
             OPENV0__API=\"https://api.openv0.com\"\n\
             API__GENERATE_ATTEMPTS=1\n\
             WEBAPP_ROOT=\"../webapp\"\n\
             OPENAI_API_KEY=\"sk-test\"\n"
        );
    }

    #[test]
    fn empty_key_becomes_placeholder() {
        let cfg = EnvConfig::build(&selections("", false), false);
        assert_eq!(
            cfg.get(API_KEY_VAR),
            Some(&EnvValue::Str(API_KEY_PLACEHOLDER.into()))
        );
        assert_eq!(cfg.get(TELEMETRY_VAR), Some(&EnvValue::Int(0)));
    }

    #[test]
    fn key_from_environment_is_not_written() {
        let cfg = EnvConfig::build(&selections("sk-typed", true), true);
        assert_eq!(cfg.get(API_KEY_VAR), None);
        assert_eq!(cfg.entries().len(), 6);
    }

    #[test]
    fn write_overwrites_and_rejects_quotes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "STALE=1\n").unwrap();
        EnvConfig::build(&selections("k", true), false)
            .write_to(&path)
            .unwrap();
        let s = fs::read_to_string(&path).unwrap();
        assert!(!s.contains("STALE"));
        assert!(s.ends_with("OPENAI_API_KEY=\"k\"\n"));

        let bad = EnvConfig::build(&selections("a\"b", true), false);
        assert!(bad.write_to(&path).is_err());
    }
}
