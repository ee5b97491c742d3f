//! Scene Assembler
//!
//! `assemble` is a pure function of (spec, caption mode): character first,
//! then accessory triggers in a fixed order, then the optional caption.

use serde::{Deserialize, Serialize};

use crate::accessories::Accessory;
use crate::catalog::StickerSpec;
use crate::character;
use crate::primitives::{caption, Fragment};
use crate::{CANVAS_SIZE, PADDING};

/// Scene centre; accessory anchors are offsets from here.
pub const SCENE_CENTER: (f64, f64) = (CANVAS_SIZE as f64 / 2.0, CANVAS_SIZE as f64 / 2.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionMode {
    Captioned,
    Plain,
}

impl CaptionMode {
    /// Captioned first, as the pack is built.
    pub const ALL: [CaptionMode; 2] = [CaptionMode::Captioned, CaptionMode::Plain];

    /// File name suffix for this variant.
    pub fn suffix(self) -> &'static str {
        match self {
            CaptionMode::Captioned => "",
            CaptionMode::Plain => "_nt",
        }
    }
}

/// One accessory trigger: draw `accessory` at the offset anchor when `applies` holds.
#[derive(Clone, Copy)]
pub struct Trigger {
    pub accessory: Accessory,
    pub applies: fn(&StickerSpec) -> bool,
    pub anchor_offset: (f64, f64),
}

impl Trigger {
    const fn worn(accessory: Accessory, applies: fn(&StickerSpec) -> bool) -> Self {
        Self { accessory, applies, anchor_offset: (0.0, 0.0) }
    }

    pub fn anchor(&self) -> (f64, f64) {
        (SCENE_CENTER.0 + self.anchor_offset.0, SCENE_CENTER.1 + self.anchor_offset.1)
    }

    pub fn fire(&self, spec: &StickerSpec) -> Option<Fragment> {
        if !(self.applies)(spec) {
            return None;
        }
        let (x, y) = self.anchor();
        Some(self.accessory.draw(x, y))
    }
}

/// Stacking order: later entries are drawn on top.
pub const TRIGGERS: [Trigger; 12] = [
    Trigger {
        accessory: Accessory::PartyHat,
        applies: |s| s.wears(Accessory::PartyHat),
        anchor_offset: (0.0, -20.0),
    },
    Trigger::worn(Accessory::PawStop, |s| s.wears(Accessory::PawStop)),
    Trigger::worn(Accessory::PawsUp, |s| s.wears(Accessory::PawsUp)),
    Trigger::worn(Accessory::Bowl, |s| s.wears(Accessory::Bowl)),
    Trigger::worn(Accessory::Helmet, |s| s.wears(Accessory::Helmet)),
    Trigger::worn(Accessory::ReflectiveJacket, |s| s.wears(Accessory::ReflectiveJacket)),
    Trigger::worn(Accessory::Snow, |s| s.snow),
    Trigger::worn(Accessory::Rope, |s| s.rope),
    Trigger::worn(Accessory::CarWindow, |s| s.car_window),
    Trigger::worn(Accessory::Hearts, |s| s.wears(Accessory::Hearts)),
    Trigger::worn(Accessory::Bowtie, |s| s.wears(Accessory::Bowtie)),
    Trigger::worn(Accessory::MustacheHeart, |s| s.wears(Accessory::MustacheHeart)),
];

/// What produced a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Character,
    Accessory(Accessory),
    Caption,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub kind: LayerKind,
    pub fragment: Fragment,
}

/// One complete vector scene: envelope around an ordered list of layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub layers: Vec<Layer>,
}

impl Document {
    pub fn header() -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\">\n",
            CANVAS_SIZE
        )
    }

    pub fn footer() -> &'static str {
        "</svg>\n"
    }

    pub fn layers_of(&self, kind: LayerKind) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(move |l| l.kind == kind)
    }

    pub fn has_caption(&self) -> bool {
        self.layers_of(LayerKind::Caption).next().is_some()
    }

    pub fn to_svg(&self) -> String {
        let mut out = Self::header();
        for layer in &self.layers {
            out.push_str(layer.fragment.as_str());
        }
        out.push_str(Self::footer());
        out
    }
}

pub fn assemble(spec: &StickerSpec, mode: CaptionMode) -> Document {
    let mut layers = vec![Layer {
        kind: LayerKind::Character,
        fragment: character::compose(&spec.pose()),
    }];

    for trigger in &TRIGGERS {
        if let Some(fragment) = trigger.fire(spec) {
            layers.push(Layer {
                kind: LayerKind::Accessory(trigger.accessory),
                fragment,
            });
        }
    }

    if mode == CaptionMode::Captioned && !spec.label.is_empty() {
        layers.push(Layer {
            kind: LayerKind::Caption,
            fragment: caption(SCENE_CENTER.0, f64::from(CANVAS_SIZE - PADDING), &spec.label),
        });
    }

    Document { layers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_triggers_cover_every_accessory_once() {
        let mut seen: Vec<_> = TRIGGERS.iter().map(|t| t.accessory).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), Accessory::ALL.len());
    }

    #[test]
    fn test_trigger_order_matches_catalog_order() {
        let order: Vec<_> = TRIGGERS.iter().map(|t| t.accessory).collect();
        assert_eq!(order, Accessory::ALL.to_vec());
    }

    #[test]
    fn test_each_trigger_fires_alone() {
        for trigger in &TRIGGERS {
            let mut spec = StickerSpec::new("t", "", &[]);
            match trigger.accessory {
                Accessory::Snow => spec.snow = true,
                Accessory::Rope => spec.rope = true,
                Accessory::CarWindow => spec.car_window = true,
                other => {
                    spec.accessories.insert(other.name().to_string());
                }
            }
            let doc = assemble(&spec, CaptionMode::Plain);
            let accessories: Vec<_> = doc
                .layers
                .iter()
                .filter_map(|l| match l.kind {
                    LayerKind::Accessory(a) => Some(a),
                    _ => None,
                })
                .collect();
            assert_eq!(accessories, vec![trigger.accessory]);
        }
    }

    #[test]
    fn test_overlay_name_in_set_does_not_fire() {
        let spec = StickerSpec::new("t", "", &["snow"]);
        let doc = assemble(&spec, CaptionMode::Plain);
        assert_eq!(doc.layers.len(), 1);
    }

    #[test]
    fn test_party_hat_anchored_above_centre() {
        assert_eq!(TRIGGERS[0].anchor(), (256.0, 236.0));
        assert_eq!(TRIGGERS[1].anchor(), (256.0, 256.0));
    }

    #[test]
    fn test_caption_near_bottom_inside_padding() {
        let spec = Catalog::builtin().specs()[0].clone();
        let doc = assemble(&spec, CaptionMode::Captioned);
        let caption = doc.layers.last().unwrap();
        assert_eq!(caption.kind, LayerKind::Caption);
        assert!(caption.fragment.as_str().contains(r#"x="256" y="482""#));
    }

    #[test]
    fn test_empty_label_gets_no_caption() {
        let spec = StickerSpec::new("t", "", &[]);
        assert!(!assemble(&spec, CaptionMode::Captioned).has_caption());
    }

    #[test]
    fn test_envelope_wraps_layers() {
        let svg = assemble(&StickerSpec::new("t", "", &[]), CaptionMode::Plain).to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"512\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(CaptionMode::Captioned.suffix(), "");
        assert_eq!(CaptionMode::Plain.suffix(), "_nt");
    }
}
