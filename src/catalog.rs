//! Sticker Catalog - Fixed, Ordered, Validated
//!
//! A catalog is only constructed through validation: unknown accessory names
//! and clashing slugs are rejected up front instead of silently dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::accessories::Accessory;
use crate::character::Pose;
use crate::validation::{ValidationResult, Validator};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerSpec {
    pub slug: String,
    /// Caption text; may be empty.
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub accessories: BTreeSet<String>,
    #[serde(default)]
    pub tongue_out: bool,
    #[serde(default)]
    pub asleep: bool,
    #[serde(default)]
    pub wink: bool,
    #[serde(default)]
    pub head_tilt: i32,
    #[serde(default)]
    pub snow: bool,
    #[serde(default)]
    pub rope: bool,
    #[serde(default)]
    pub car_window: bool,
}

impl StickerSpec {
    pub fn new(slug: &str, label: &str, accessories: &[&str]) -> Self {
        Self {
            slug: slug.to_string(),
            label: label.to_string(),
            accessories: accessories.iter().map(|a| a.to_string()).collect(),
            tongue_out: false,
            asleep: false,
            wink: false,
            head_tilt: 0,
            snow: false,
            rope: false,
            car_window: false,
        }
    }

    pub fn with_tilt(mut self, degrees: i32) -> Self {
        self.head_tilt = degrees;
        self
    }

    pub fn with_tongue(mut self) -> Self {
        self.tongue_out = true;
        self
    }

    pub fn asleep(mut self) -> Self {
        self.asleep = true;
        self
    }

    pub fn winking(mut self) -> Self {
        self.wink = true;
        self
    }

    pub fn with_snow(mut self) -> Self {
        self.snow = true;
        self
    }

    pub fn with_rope(mut self) -> Self {
        self.rope = true;
        self
    }

    pub fn in_car_window(mut self) -> Self {
        self.car_window = true;
        self
    }

    /// Membership test against the accessory set.
    pub fn wears(&self, accessory: Accessory) -> bool {
        self.accessories.contains(accessory.name())
    }

    pub fn pose(&self) -> Pose {
        Pose {
            head_tilt: self.head_tilt,
            tongue_out: self.tongue_out,
            asleep: self.asleep,
            wink: self.wink,
            ..Pose::default()
        }
    }
}

/// Ordered, validated set of sticker specs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    specs: Vec<StickerSpec>,
}

impl Catalog {
    /// Validate and build. Warnings are logged; errors reject the catalog.
    pub fn new(specs: Vec<StickerSpec>) -> Result<Self, CatalogError> {
        let result = Validator::new().validate(&specs);
        for v in result.violations.iter().filter(|v| !v.is_error()) {
            warn!(rule = %v.rule, slug = %v.slug, "{}", v.message);
        }
        if !result.valid {
            return Err(CatalogError::Invalid(result.summary()));
        }
        Ok(Self { specs })
    }

    /// The twelve-sticker pack.
    pub fn builtin() -> Self {
        Self { specs: builtin_specs() }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let specs: Vec<StickerSpec> = serde_json::from_str(content)?;
        Self::new(specs)
    }

    /// Run validation without building, for reporting.
    pub fn check(specs: &[StickerSpec]) -> ValidationResult {
        Validator::new().validate(specs)
    }

    pub fn specs(&self) -> &[StickerSpec] {
        &self.specs
    }

    pub fn first(&self) -> Option<&StickerSpec> {
        self.specs.first()
    }

    pub fn get(&self, slug: &str) -> Option<&StickerSpec> {
        self.specs.iter().find(|s| s.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_specs() -> Vec<StickerSpec> {
    vec![
        StickerSpec::new("01_hi", "гав-привет", &["party_hat"]).with_tilt(10),
        StickerSpec::new("02_stop", "Остань, кожаная", &["paw_stop"]),
        StickerSpec::new("03_hug", "Хочу обнимашки", &["paws_up"]).with_tilt(-8),
        StickerSpec::new("04_food", "Сыпь корм и уходи", &["bowl"]),
        StickerSpec::new("05_sleep", "Работа идёт, работник спит", &["helmet"]).asleep(),
        StickerSpec::new("06_reflect", "Сияю как зарплата", &["reflective_jacket"]).with_tongue(),
        StickerSpec::new("07_snow", "Зима — норм", &[]).with_snow().with_tongue(),
        StickerSpec::new("08_rope", "За канат — до конца!", &[]).with_rope(),
        StickerSpec::new("09_taxi", "Уже подъезжаю", &[]).in_car_window(),
        StickerSpec::new("10_kiss", "Чмок-чмок!", &["hearts"]).with_tongue(),
        StickerSpec::new("11_yawn", "Трудно быть лапочкой", &[]).winking(),
        StickerSpec::new("12_business", "Связи решают", &["bowtie", "mustache_heart"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_passes_validation() {
        let builtin = Catalog::builtin();
        assert_eq!(builtin.len(), 12);
        assert!(Catalog::check(builtin.specs()).valid);
        assert!(Catalog::new(builtin.specs().to_vec()).is_ok());
    }

    #[test]
    fn test_unknown_accessory_fails_fast() {
        let err = Catalog::new(vec![StickerSpec::new("x", "", &["monocle"])]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("monocle"));
        assert!(msg.contains("x"));
    }

    #[test]
    fn test_json_defaults_flags() {
        let catalog = Catalog::from_json(
            r#"[{"slug": "a", "label": "A", "accessories": ["bowl"], "headTilt": 5, "carWindow": true}]"#,
        )
        .unwrap();
        let spec = &catalog.specs()[0];
        assert_eq!(spec.head_tilt, 5);
        assert!(spec.car_window);
        assert!(!spec.asleep);
        assert!(spec.wears(Accessory::Bowl));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_pose_uses_neutral_scale() {
        let spec = StickerSpec::new("a", "", &[]).with_tilt(-8).asleep();
        let pose = spec.pose();
        assert_eq!(pose.scale, 1.0);
        assert_eq!(pose.head_tilt, -8);
        assert!(pose.asleep);
    }
}
