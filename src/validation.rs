//! Catalog Validation - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Policy: any error rejects the catalog, warnings are reported and kept.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::accessories::{known_names, Accessory, AccessoryKind};
use crate::catalog::StickerSpec;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub slug: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub remediation: Vec<String>,
}

impl ValidationViolation {
    pub fn is_error(&self) -> bool {
        self.severity == ViolationSeverity::Error
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub stickers: usize,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.violations.iter().any(|v| !v.is_error())
    }

    /// Error messages joined for a single-line error.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .filter(|v| v.is_error())
            .map(|v| format!("{} [{}]: {}", v.rule, v.slug, v.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validation rule trait - produces violations for one spec in its catalog.
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, spec: &StickerSpec, catalog: &[StickerSpec]) -> Vec<ValidationViolation>;
}

// --- Concrete Rules ---

pub struct UnknownAccessoryRule;

impl ValidationRule for UnknownAccessoryRule {
    fn name(&self) -> &'static str { "unknown_accessory" }

    fn validate(&self, spec: &StickerSpec, _catalog: &[StickerSpec]) -> Vec<ValidationViolation> {
        spec.accessories
            .iter()
            .filter(|name| Accessory::from_name(name).is_none())
            .map(|name| ValidationViolation {
                rule: self.name().to_string(),
                slug: spec.slug.clone(),
                severity: ViolationSeverity::Error,
                message: format!("Accessory '{}' is not in the catalog", name),
                expected: Some(known_names().join(", ")),
                actual: Some(name.clone()),
                remediation: vec!["Use one of the catalog accessory names".to_string()],
            })
            .collect()
    }
}

/// Overlays are switched on by their flag; listing one as an accessory draws nothing.
pub struct OverlayAsAccessoryRule;

impl ValidationRule for OverlayAsAccessoryRule {
    fn name(&self) -> &'static str { "overlay_as_accessory" }

    fn validate(&self, spec: &StickerSpec, _catalog: &[StickerSpec]) -> Vec<ValidationViolation> {
        spec.accessories
            .iter()
            .filter_map(|name| Accessory::from_name(name))
            .filter(|a| a.kind() == AccessoryKind::SceneOverlay)
            .map(|a| ValidationViolation {
                rule: self.name().to_string(),
                slug: spec.slug.clone(),
                severity: ViolationSeverity::Warning,
                message: format!("'{}' is a scene overlay and is ignored in the accessory list", a.name()),
                expected: Some(format!("{} flag", a.name())),
                actual: Some("accessory entry".to_string()),
                remediation: vec![format!("Set the '{}' flag instead", a.name())],
            })
            .collect()
    }
}

pub struct DuplicateSlugRule;

impl ValidationRule for DuplicateSlugRule {
    fn name(&self) -> &'static str { "duplicate_slug" }

    fn validate(&self, spec: &StickerSpec, catalog: &[StickerSpec]) -> Vec<ValidationViolation> {
        let first = catalog.iter().position(|s| s.slug == spec.slug);
        let this = catalog.iter().position(|s| std::ptr::eq(s, spec));

        // Report on the later occurrences only.
        match (first, this) {
            (Some(f), Some(t)) if f != t => vec![ValidationViolation {
                rule: self.name().to_string(),
                slug: spec.slug.clone(),
                severity: ViolationSeverity::Error,
                message: "Slug already used by an earlier sticker".to_string(),
                expected: Some("unique slug".to_string()),
                actual: Some(format!("entries {} and {}", f, t)),
                remediation: vec!["Rename one of the stickers".to_string()],
            }],
            _ => vec![],
        }
    }
}

pub struct SlugFormatRule;

impl SlugFormatRule {
    fn is_file_safe(slug: &str) -> bool {
        !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

impl ValidationRule for SlugFormatRule {
    fn name(&self) -> &'static str { "slug_format" }

    fn validate(&self, spec: &StickerSpec, _catalog: &[StickerSpec]) -> Vec<ValidationViolation> {
        if Self::is_file_safe(&spec.slug) {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            slug: spec.slug.clone(),
            severity: ViolationSeverity::Error,
            message: "Slug must be non-empty and file-name safe".to_string(),
            expected: Some("[A-Za-z0-9_-]+".to_string()),
            actual: Some(format!("{:?}", spec.slug)),
            remediation: vec!["Use letters, digits, '_' or '-'".to_string()],
        }]
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(SlugFormatRule),
                Box::new(DuplicateSlugRule),
                Box::new(UnknownAccessoryRule),
                Box::new(OverlayAsAccessoryRule),
            ],
        }
    }

    pub fn validate(&self, specs: &[StickerSpec]) -> ValidationResult {
        let mut all_violations = vec![];

        for spec in specs {
            for rule in &self.rules {
                all_violations.extend(rule.validate(spec, specs));
            }
        }

        ValidationResult {
            valid: !all_violations.iter().any(|v| v.is_error()),
            stickers: specs.len(),
            violations: all_violations,
        }
    }

    /// Violation counts per rule name.
    pub fn tally(result: &ValidationResult) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for v in &result.violations {
            *counts.entry(v.rule.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
