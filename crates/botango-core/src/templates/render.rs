//! Template rendering
//!
//! Rendering sits behind the [`Renderer`] trait so callers can plug in a
//! real template engine. The built-in implementation on
//! [`TemplatePack`](super::TemplatePack) only fills placeholders.
//!
//! Placeholder syntax:
//!
//! - `{{ name }}` is replaced by the variable `name`; unknown names are errors
//! - `{{{{` writes a literal `{{`, for Python f-string escapes or Django tags
//! - any other `{{` without a closing `}}` is an error

use anyhow::Result;
use std::collections::BTreeMap;

/// Variables available to templates
pub type TemplateVars = BTreeMap<String, String>;

/// Turns a template id (a path relative to the template root) into text
pub trait Renderer {
    fn render(&self, template_id: &str, vars: &TemplateVars) -> Result<String>;
}

const OPEN: &str = "{{";
const ESCAPED_OPEN: &str = "{{{{";

/// Replace every `{{ name }}` with its variable and every `{{{{` with a
/// literal `{{`.
pub fn substitute(text: &str, vars: &TemplateVars) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        if rest[start..].starts_with(ESCAPED_OPEN) {
            out.push_str(OPEN);
            rest = &rest[start + ESCAPED_OPEN.len()..];
            continue;
        }

        let after = &rest[start + OPEN.len()..];
        let end = after
            .find("}}")
            .ok_or_else(|| anyhow::anyhow!("Unterminated placeholder near '{}'", preview(after)))?;
        let name = after[..end].trim();
        let value = vars
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown template variable '{}'", name))?;
        out.push_str(value);
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

fn preview(text: &str) -> &str {
    let line = text.lines().next().unwrap_or(text);
    match line.char_indices().nth(20) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
