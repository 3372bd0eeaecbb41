//! Prompt Loading
//!
//! Prompts live as markdown files in a configurable directory and are read
//! once at startup, keyed by file stem.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The prompt every mode needs: the routing policy for the two agent tools.
pub const SYSTEM_PROMPT_KEY: &str = "cosmo_prompt";

/// Loads every `.md` file in `prompts_path` into a map keyed by file stem.
pub fn load_prompts(prompts_path: &Path) -> Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();
    let entries = fs::read_dir(prompts_path).with_context(|| {
        format!(
            "Could not read prompts directory '{}'",
            prompts_path.display()
        )
    })?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            prompts.insert(prompt_key, content);
        }
    }
    Ok(prompts)
}

/// Loads the system prompt from the prompts directory.
pub fn load_system_prompt(prompts_path: &Path) -> Result<String> {
    let prompts = load_prompts(prompts_path)?;
    prompts
        .get(SYSTEM_PROMPT_KEY)
        .cloned()
        .with_context(|| {
            format!(
                "{SYSTEM_PROMPT_KEY}.md not found in '{}'",
                prompts_path.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_markdown_files_keyed_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cosmo_prompt.md"), "route requests").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let prompts = load_prompts(dir.path()).unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts["cosmo_prompt"], "route requests");
    }

    #[test]
    fn system_prompt_is_required() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("other.md"), "not the one").unwrap();

        let err = load_system_prompt(dir.path()).unwrap_err();
        assert!(err.to_string().contains("cosmo_prompt.md"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(load_prompts(&missing).is_err());
    }
}
