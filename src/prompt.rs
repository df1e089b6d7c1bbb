// src/prompt.rs
//! Interactive questionnaire.
//!
//! Choice lists are data: [`Framework::components`] and [`Framework::icons`]
//! give the options allowed after a framework has been picked.

#![deny(missing_docs)]

use crate::error::BootstrapResult;
use anyhow::{anyhow, bail};
use dialoguer::{Confirm, Password, Select, theme::ColorfulTheme};
use std::fmt;

/// Front-end framework of the generated webapp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    /// React + Vite.
    React,
    /// Svelte.
    Svelte,
    /// Next.js.
    Next,
}

impl Framework {
    /// All frameworks in prompt order.
    pub const ALL: [Framework; 3] = [Framework::React, Framework::Svelte, Framework::Next];

    /// Directory name under `webapps-starters/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Svelte => "svelte",
            Framework::Next => "next",
        }
    }

    /// Label shown in the framework prompt.
    pub fn label(self) -> &'static str {
        match self {
            Framework::React => "React",
            Framework::Svelte => "Svelte",
            Framework::Next => "Next (currently API only - no web dashboard)",
        }
    }

    /// Components libraries that have a starter for this framework.
    pub fn components(self) -> &'static [&'static str] {
        match self {
            Framework::React | Framework::Next => &["nextui", "flowbite", "shadcn"],
            Framework::Svelte => &["flowbite", "shadcn"],
        }
    }

    /// Icon libraries available for this framework.
    pub fn icons(self) -> &'static [&'static str] {
        &["lucide"]
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers collected before anything touches the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    /// Chosen framework.
    pub framework: Framework,
    /// Chosen components library, one of `framework.components()`.
    pub components: String,
    /// Chosen icons library, one of `framework.icons()`.
    pub icons: String,
    /// API key as typed, possibly empty.
    pub api_key: String,
    /// ui-ray debug log collection.
    pub telemetry: bool,
}

/// Question primitives. `None` means the user cancelled.
pub trait Prompter {
    /// Single choice, returns the index into `items`.
    fn select(&mut self, prompt: &str, items: &[&str]) -> BootstrapResult<Option<usize>>;
    /// Masked free text, empty allowed.
    fn password(&mut self, prompt: &str) -> BootstrapResult<Option<String>>;
    /// Yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> BootstrapResult<Option<bool>>;
}

const API_KEY_PROMPT: &str = "Paste your OpenAI API key (you can also edit it in .env later)";
const TELEMETRY_PROMPT: &str = "We are working on an open source vision model called ui-ray, \
to make generative UI multimodal\n  Enable ui-ray debug logs to contribute ? (recommended)";

/// Reject characters a double-quoted dotenv value cannot carry verbatim.
pub fn validate_api_key(key: &str) -> Result<(), String> {
    if key.contains(['"', '\n', '\r']) {
        return Err("the API key cannot contain quotes or line breaks".into());
    }
    Ok(())
}

fn cancelled() -> anyhow::Error {
    anyhow!("prompt cancelled")
}

/// Ask the five questions in order.
pub fn collect_selections(prompter: &mut dyn Prompter) -> BootstrapResult<Selections> {
    let labels: Vec<&str> = Framework::ALL.iter().map(|f| f.label()).collect();
    let idx = prompter
        .select("What framework to use?", &labels)?
        .ok_or_else(cancelled)?;
    let framework = *Framework::ALL
        .get(idx)
        .ok_or_else(|| anyhow!("framework choice {idx} out of range"))?;

    let components = pick(
        prompter,
        "What components library to use?",
        framework.components(),
    )?;
    let icons = pick(prompter, "What icons library to use?", framework.icons())?;

    let api_key = prompter.password(API_KEY_PROMPT)?.ok_or_else(cancelled)?;
    if let Err(e) = validate_api_key(&api_key) {
        bail!(e);
    }

    let telemetry = prompter
        .confirm(TELEMETRY_PROMPT, true)?
        .ok_or_else(cancelled)?;

    log::debug!("selected {framework}/{components} with {icons} icons, telemetry={telemetry}");
    Ok(Selections {
        framework,
        components,
        icons,
        api_key,
        telemetry,
    })
}

fn pick(prompter: &mut dyn Prompter, prompt: &str, items: &[&str]) -> BootstrapResult<String> {
    let idx = prompter.select(prompt, items)?.ok_or_else(cancelled)?;
    items
        .get(idx)
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("choice {idx} out of range for {prompt:?}"))
}

/// dialoguer-backed terminal prompts.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> BootstrapResult<Option<usize>> {
        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?;
        Ok(selection)
    }

    fn password(&mut self, prompt: &str) -> BootstrapResult<Option<String>> {
        let value = Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .validate_with(|input: &String| validate_api_key(input))
            .interact()?;
        Ok(Some(value))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> BootstrapResult<Option<bool>> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?;
        Ok(answer)
    }
}
