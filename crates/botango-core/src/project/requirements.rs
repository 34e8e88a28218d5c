//! `requirements.txt` generation

use crate::atomic::write_atomic;
use crate::components::ResolvedSelection;
use anyhow::Result;
use std::path::Path;

/// One requirement per line, trailing newline included
pub fn render_requirements(selection: &ResolvedSelection<'_>) -> String {
    let mut out = selection.requirement_strings().join("\n");
    out.push('\n');
    out
}

pub fn write_requirements(path: &Path, selection: &ResolvedSelection<'_>) -> Result<Vec<String>> {
    write_atomic(path, &render_requirements(selection))?;
    Ok(selection.requirement_strings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentRegistry;
    use tempfile::tempdir;

    #[test]
    fn test_requirements_file_contents() {
        let registry = ComponentRegistry::botango().unwrap();
        let resolved = registry
            .resolve(&["base", "handlers", "fastapi", "services"])
            .unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("requirements.txt");

        let lines = write_requirements(&path, &resolved).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "aiogram>=3.8.0\npython-dotenv\naiohttp\nfastapi>=0.109.0\nuvicorn\n"
        );
        assert_eq!(lines.len(), 5);
    }
}
