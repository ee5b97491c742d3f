//! Accessory Catalog
//!
//! Every accessory draws in outer-scene coordinates relative to an anchor,
//! so none of them follow the head tilt.

use serde::{Deserialize, Serialize};

use crate::primitives::{
    circle, ellipse, glyph, group, path, rect, Fragment, Style, ACCENT_BLUE, ACCENT_LIME,
    ACCENT_YELLOW, COLOR_BEIGE, COLOR_HEART, COLOR_OUTLINE, COLOR_WHITE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessory {
    PartyHat,
    PawStop,
    PawsUp,
    Bowl,
    Helmet,
    ReflectiveJacket,
    Snow,
    Rope,
    CarWindow,
    Hearts,
    Bowtie,
    MustacheHeart,
}

/// How an accessory is switched on for a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryKind {
    /// Listed by name in the sticker's accessory set.
    Wearable,
    /// Scene-wide effect driven by an overlay flag.
    SceneOverlay,
}

pub type Drawer = fn(f64, f64) -> Fragment;

impl Accessory {
    pub const ALL: [Accessory; 12] = [
        Accessory::PartyHat,
        Accessory::PawStop,
        Accessory::PawsUp,
        Accessory::Bowl,
        Accessory::Helmet,
        Accessory::ReflectiveJacket,
        Accessory::Snow,
        Accessory::Rope,
        Accessory::CarWindow,
        Accessory::Hearts,
        Accessory::Bowtie,
        Accessory::MustacheHeart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Accessory::PartyHat => "party_hat",
            Accessory::PawStop => "paw_stop",
            Accessory::PawsUp => "paws_up",
            Accessory::Bowl => "bowl",
            Accessory::Helmet => "helmet",
            Accessory::ReflectiveJacket => "reflective_jacket",
            Accessory::Snow => "snow",
            Accessory::Rope => "rope",
            Accessory::CarWindow => "car_window",
            Accessory::Hearts => "hearts",
            Accessory::Bowtie => "bowtie",
            Accessory::MustacheHeart => "mustache_heart",
        }
    }

    /// Catalog lookup by symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn kind(self) -> AccessoryKind {
        match self {
            Accessory::Snow | Accessory::Rope | Accessory::CarWindow => AccessoryKind::SceneOverlay,
            _ => AccessoryKind::Wearable,
        }
    }

    pub fn drawer(self) -> Drawer {
        match self {
            Accessory::PartyHat => party_hat,
            Accessory::PawStop => stop_paw,
            Accessory::PawsUp => paws_up,
            Accessory::Bowl => bowl,
            Accessory::Helmet => helmet,
            Accessory::ReflectiveJacket => reflective_jacket,
            Accessory::Snow => snow,
            Accessory::Rope => rope,
            Accessory::CarWindow => car_window,
            Accessory::Hearts => hearts,
            Accessory::Bowtie => bowtie,
            Accessory::MustacheHeart => mustache_heart,
        }
    }

    pub fn draw(self, x: f64, y: f64) -> Fragment {
        (self.drawer())(x, y)
    }
}

/// Known accessory names, for error messages.
pub fn known_names() -> Vec<&'static str> {
    Accessory::ALL.iter().map(|a| a.name()).collect()
}

fn party_hat(cx: f64, cy: f64) -> Fragment {
    Fragment::concat([
        path(
            &format!(
                "M {},{} L {},{} L {},{} Z",
                cx - 30.0,
                cy - 210.0,
                cx,
                cy - 300.0,
                cx + 30.0,
                cy - 210.0
            ),
            Style::Heavy(ACCENT_BLUE),
        ),
        // butterfly
        circle(cx, cy - 250.0, 6.0, Style::Fill(ACCENT_YELLOW)),
        rect(
            cx - 12.0,
            cy - 240.0,
            24.0,
            10.0,
            Style::Fill(ACCENT_LIME),
            &format!(r#"transform="rotate(-20 {} {})""#, cx, cy - 235.0),
        ),
    ])
}

fn stop_paw(cx: f64, cy: f64) -> Fragment {
    group(
        None,
        "",
        Fragment::concat([
            ellipse(cx + 160.0, cy + 90.0, 30.0, 22.0, Style::Heavy(COLOR_BEIGE)),
            glyph(cx + 160.0, cy + 98.0, "\u{270B}"),
        ]),
    )
}

fn paws_up(cx: f64, cy: f64) -> Fragment {
    Fragment::concat([
        ellipse(cx - 120.0, cy + 60.0, 28.0, 20.0, Style::Heavy(COLOR_BEIGE)),
        ellipse(cx + 120.0, cy + 60.0, 28.0, 20.0, Style::Heavy(COLOR_BEIGE)),
    ])
}

fn bowl(cx: f64, cy: f64) -> Fragment {
    group(
        None,
        "",
        Fragment::concat([
            ellipse(cx, cy + 180.0, 80.0, 26.0, Style::Heavy(ACCENT_YELLOW)),
            glyph(cx, cy + 188.0, "\u{1F356}"),
        ]),
    )
}

fn helmet(cx: f64, cy: f64) -> Fragment {
    path(
        &format!("M {},{} q 70,-50 140,0 l 0,20 l -140,0 z", cx - 70.0, cy - 130.0),
        Style::Heavy(ACCENT_YELLOW),
    )
}

fn reflective_jacket(cx: f64, cy: f64) -> Fragment {
    let stripe = "stroke:#888;stroke-width:2;stroke-linecap:round;stroke-linejoin:round;fill:none;";
    Fragment::concat([
        path(
            &format!("M {},{} q 150,-40 300,0 l 0,120 l -300,0 z", cx - 150.0, cy + 40.0),
            Style::Heavy("#F0F0F0"),
        ),
        path(
            &format!("M {},{} L {},{}", cx - 140.0, cy + 70.0, cx + 140.0, cy + 70.0),
            Style::Raw(stripe),
        ),
        path(
            &format!("M {},{} L {},{}", cx - 120.0, cy + 100.0, cx + 120.0, cy + 100.0),
            Style::Raw(stripe),
        ),
    ])
}

fn snow(cx: f64, cy: f64) -> Fragment {
    group(
        None,
        "",
        Fragment::concat([
            Fragment::new(format!(
                r#"<ellipse cx="{cx}" cy="{}" rx="220" ry="40" fill="{COLOR_WHITE}" opacity="0.9"/>"#,
                cy + 210.0
            )),
            circle(cx - 100.0, cy + 120.0, 6.0, Style::Fill(COLOR_WHITE)),
            circle(cx + 80.0, cy + 110.0, 6.0, Style::Fill(COLOR_WHITE)),
        ]),
    )
}

fn rope(cx: f64, cy: f64) -> Fragment {
    path(
        &format!(
            "M {},{} C {},{} {},{} {},{}",
            cx - 140.0,
            cy + 20.0,
            cx - 60.0,
            cy + 10.0,
            cx + 60.0,
            cy + 10.0,
            cx + 140.0,
            cy + 20.0
        ),
        Style::Raw("stroke:#A87C4F;stroke-width:10;fill:none;stroke-linecap:round;stroke-dasharray:6 6"),
    )
}

fn car_window(cx: f64, cy: f64) -> Fragment {
    group(
        None,
        "",
        rect(
            cx - 200.0,
            cy - 40.0,
            400.0,
            120.0,
            Style::Fill("#B7C7D3"),
            r##"rx="16" ry="16" opacity="0.45" stroke="#6A7B86" stroke-width="4""##,
        ),
    )
}

fn heart_path(x: f64, y: f64) -> String {
    format!(
        r#"<path d="M {x},{y} c -12,-16 8,-36 24,-20 c 16,-16 36,4 24,20 c -10,12 -24,18 -24,18 c 0,0 -14,-6 -24,-18 z"/>"#
    )
}

fn hearts(cx: f64, cy: f64) -> Fragment {
    group(
        None,
        &format!(r#"fill="{COLOR_HEART}" stroke="{COLOR_OUTLINE}" stroke-width="2""#),
        Fragment::new(heart_path(cx - 140.0, cy - 40.0) + &heart_path(cx + 140.0, cy - 40.0)),
    )
}

fn bowtie(cx: f64, cy: f64) -> Fragment {
    group(
        None,
        "",
        Fragment::concat([
            path(&format!("M {},{} l -40,20 l 40,20 z", cx - 30.0, cy + 40.0), Style::Heavy(ACCENT_BLUE)),
            rect(cx - 10.0, cy + 45.0, 20.0, 30.0, Style::Heavy(ACCENT_YELLOW), ""),
            path(&format!("M {},{} l 40,20 l -40,20 z", cx + 30.0, cy + 40.0), Style::Heavy(ACCENT_BLUE)),
        ]),
    )
}

fn mustache_heart(cx: f64, cy: f64) -> Fragment {
    group(
        None,
        &format!(r#"stroke="{COLOR_OUTLINE}" stroke-width="4" fill="none""#),
        Fragment::new(format!(
            r#"<path d="M {},{} q 30,30 50,0"/><path d="M {},{} q -30,30 -50,0"/><circle cx="{cx}" cy="{}" r="5" fill="{COLOR_HEART}" stroke="none"/>"#,
            cx - 50.0,
            cy + 30.0,
            cx + 50.0,
            cy + 30.0,
            cy + 28.0
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_lookup() {
        for accessory in Accessory::ALL {
            assert_eq!(Accessory::from_name(accessory.name()), Some(accessory));
        }
    }

    #[test]
    fn test_unknown_name_is_absent() {
        assert_eq!(Accessory::from_name("monocle"), None);
    }

    #[test]
    fn test_overlays_are_scene_wide() {
        let overlays: Vec<_> = Accessory::ALL
            .into_iter()
            .filter(|a| a.kind() == AccessoryKind::SceneOverlay)
            .collect();
        assert_eq!(overlays, vec![Accessory::Snow, Accessory::Rope, Accessory::CarWindow]);
    }

    #[test]
    fn test_drawers_follow_anchor() {
        let a = Accessory::Helmet.draw(256.0, 256.0);
        let b = Accessory::Helmet.draw(100.0, 100.0);
        assert!(a.as_str().contains("M 186,126"));
        assert!(b.as_str().contains("M 30,-30"));
    }

    #[test]
    fn test_every_drawer_emits_markup() {
        for accessory in Accessory::ALL {
            let fragment = accessory.draw(256.0, 256.0);
            assert!(fragment.as_str().starts_with('<'), "{:?}", accessory);
        }
    }

    #[test]
    fn test_serde_uses_catalog_names() {
        let json = serde_json::to_string(&Accessory::ReflectiveJacket).unwrap();
        assert_eq!(json, r#""reflective_jacket""#);
    }
}
