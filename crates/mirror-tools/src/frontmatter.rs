//! YAML-frontmatter role-to-agent conversion and validation
//!
//! Converts plain role documents into agent documents by prepending a YAML
//! frontmatter block (name, description, model, color). Model and color come
//! from a built-in assignment table keyed by the role slug; unknown roles
//! fall back to a balanced default.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\r?\n(.+?)\r?\n---").unwrap());

static ROLE_INTRO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)You are now operating as a?\s*\**([^*\n]+?)\**\.?\s+Your expertise includes:")
        .unwrap()
});

/// How far past the first frontmatter block to look for a duplicate.
const DUPLICATE_SCAN_WINDOW: usize = 500;

/// Frontmatter fields of an agent document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFrontmatter {
    pub name: String,
    pub description: String,
    pub model: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Model/color pairing for one role slug.
struct Assignment {
    model: &'static str,
    color: &'static str,
}

/// Built-in role assignments; anything unlisted gets the fallback.
fn assignment_for(slug: &str) -> Assignment {
    let (model, color) = match slug {
        // Analysis-heavy roles
        "data-quality-analyst" | "data-quality-manager" => ("opus", "blue"),
        "data-governance-lead" | "data-architect" | "data-scientist" => ("opus", "purple"),
        "senior-engineer" | "solution-architect" | "machine-learning-engineer" => {
            ("opus", "purple")
        }
        "compliance-officer" => ("opus", "red"),
        "financial-analyst" | "market-analysis-mgr" => ("opus", "blue"),
        "strategic-planning-manager" => ("opus", "purple"),

        // Balanced roles
        "data-steward" | "business-analyst" | "product-manager" | "product-owner" => {
            ("sonnet", "cyan")
        }
        "data-engineer" | "database-administrator" => ("sonnet", "green"),
        "subject-matter-expert" | "change-management-specialist" => ("sonnet", "yellow"),
        "program-manager" => ("sonnet", "blue"),
        "user-research-expert" | "ux-ui-design-manager" => ("sonnet", "cyan"),

        _ => ("sonnet", "blue"),
    };
    Assignment { model, color }
}

/// `data-quality-analyst` -> `Data Quality Analyst`
fn display_name(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the agent description from the role body, falling back to a
/// generic one built from the slug.
fn extract_description(slug: &str, body: &str) -> String {
    let role = match ROLE_INTRO_PATTERN.captures(body) {
        Some(capture) => capture[1].trim().to_string(),
        None => display_name(slug),
    };
    format!(
        "Expert {} for specialized domain expertise.\n\nUse when: Need {} expertise for analysis, planning, or execution.",
        role,
        role.to_lowercase()
    )
}

/// Convert one role body into an agent document with frontmatter.
///
/// # Errors
///
/// Returns an error if the frontmatter cannot be serialized.
pub fn convert_role(slug: &str, body: &str) -> Result<String> {
    let assignment = assignment_for(slug);
    let frontmatter = AgentFrontmatter {
        name: slug.to_string(),
        description: extract_description(slug, body),
        model: assignment.model.to_string(),
        color: Some(assignment.color.to_string()),
    };

    let yaml = serde_yaml::to_string(&frontmatter)?;
    Ok(format!("---\n{}---\n\n{}", yaml, body))
}

/// Validate an agent document's frontmatter.
///
/// Requires a leading `---` fenced block containing `name`, `description`,
/// and `model`, and rejects a second frontmatter block immediately after
/// the first (a symptom of double conversion).
///
/// # Errors
///
/// Returns the specific validation failure.
pub fn validate(content: &str) -> Result<AgentFrontmatter> {
    let capture = FRONTMATTER_PATTERN
        .captures(content)
        .ok_or(Error::MissingFrontmatter)?;

    let yaml = &capture[1];
    let frontmatter: AgentFrontmatter = serde_yaml::from_str(yaml).map_err(|_| {
        // Field-level diagnosis reads better than a serde trace.
        if !yaml.contains("name:") {
            Error::MissingField { field: "name" }
        } else if !yaml.contains("description:") {
            Error::MissingField {
                field: "description",
            }
        } else {
            Error::MissingField { field: "model" }
        }
    })?;

    let rest = &content[capture.get(0).map(|m| m.end()).unwrap_or(0)..];
    let window: String = rest.chars().take(DUPLICATE_SCAN_WINDOW).collect();
    if FRONTMATTER_PATTERN.is_match(window.trim_start()) {
        return Err(Error::DuplicateFrontmatter);
    }

    Ok(frontmatter)
}

/// Outcome of a directory conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertReport {
    pub converted: Vec<String>,
    pub skipped: Vec<String>,
    pub failures: Vec<(String, String)>,
}

/// Convert every `*.md` role in `source` into an agent document in `out`.
///
/// Files whose destination already exists are skipped (manual merge
/// required); a failure on one role does not stop the others.
///
/// # Errors
///
/// Returns an error only if the source directory cannot be read or the
/// output directory cannot be created.
pub fn convert_dir(source: &Path, out: &Path) -> Result<ConvertReport> {
    std::fs::create_dir_all(out).map_err(|e| Error::io(out, e))?;

    let mut names: Vec<String> = std::fs::read_dir(source)
        .map_err(|e| Error::io(source, e))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".md"))
        .collect();
    names.sort();

    let mut report = ConvertReport::default();
    for name in names {
        let slug = name.trim_end_matches(".md").to_string();
        let destination = out.join(&name);
        if destination.exists() {
            tracing::debug!(%slug, "destination exists, skipping");
            report.skipped.push(slug);
            continue;
        }

        let result = std::fs::read_to_string(source.join(&name))
            .map_err(|e| Error::io(source.join(&name), e))
            .and_then(|body| convert_role(&slug, &body))
            .and_then(|converted| {
                mirror_fs::io::write_text(&destination, &converted).map_err(Error::from)
            });

        match result {
            Ok(()) => report.converted.push(slug),
            Err(e) => {
                tracing::warn!(%slug, "conversion failed: {}", e);
                report.failures.push((slug, e.to_string()));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const ROLE_BODY: &str = "You are now operating as a **Business Analyst**. Your expertise includes:\n\n- requirements\n";

    #[test]
    fn converted_role_validates() {
        let converted = convert_role("business-analyst", ROLE_BODY).unwrap();

        let frontmatter = validate(&converted).unwrap();
        assert_eq!(frontmatter.name, "business-analyst");
        assert_eq!(frontmatter.model, "sonnet");
        assert_eq!(frontmatter.color.as_deref(), Some("cyan"));
        assert!(converted.ends_with(ROLE_BODY));
    }

    #[test]
    fn description_extracted_from_role_intro() {
        let converted = convert_role("business-analyst", ROLE_BODY).unwrap();
        let frontmatter = validate(&converted).unwrap();
        assert!(frontmatter.description.starts_with("Expert Business Analyst"));
    }

    #[test]
    fn unknown_slug_gets_fallback_assignment() {
        let converted = convert_role("quantum-gardener", "body\n").unwrap();
        let frontmatter = validate(&converted).unwrap();
        assert_eq!(frontmatter.model, "sonnet");
        assert_eq!(frontmatter.color.as_deref(), Some("blue"));
        assert!(frontmatter.description.contains("Quantum Gardener"));
    }

    #[test]
    fn missing_frontmatter_is_rejected() {
        let err = validate("no frontmatter here\n").unwrap_err();
        assert!(matches!(err, Error::MissingFrontmatter));
    }

    #[test]
    fn missing_model_is_rejected() {
        let err = validate("---\nname: x\ndescription: y\n---\nbody\n").unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "model" }));
    }

    #[test]
    fn duplicate_frontmatter_is_rejected() {
        let doubled = "---\nname: x\ndescription: y\nmodel: sonnet\n---\n---\nname: x\ndescription: y\nmodel: sonnet\n---\nbody\n";
        let err = validate(doubled).unwrap_err();
        assert!(matches!(err, Error::DuplicateFrontmatter));
    }

    #[test]
    fn convert_dir_skips_existing_destinations() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("roles");
        let out = dir.path().join("agents");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(source.join("analyst.md"), ROLE_BODY).unwrap();
        std::fs::write(source.join("existing.md"), ROLE_BODY).unwrap();
        std::fs::write(out.join("existing.md"), "already here").unwrap();

        let report = convert_dir(&source, &out).unwrap();

        assert_eq!(report.converted, vec!["analyst".to_string()]);
        assert_eq!(report.skipped, vec!["existing".to_string()]);
        assert!(report.failures.is_empty());
        assert_eq!(
            std::fs::read_to_string(out.join("existing.md")).unwrap(),
            "already here"
        );
        assert!(validate(&std::fs::read_to_string(out.join("analyst.md")).unwrap()).is_ok());
    }

    #[test]
    fn non_markdown_files_are_ignored() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("roles");
        let out = dir.path().join("agents");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("notes.txt"), "not a role").unwrap();

        let report = convert_dir(&source, &out).unwrap();
        assert!(report.converted.is_empty());
    }
}
