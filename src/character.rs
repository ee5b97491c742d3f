//! Character Composer
//!
//! Builds Frank from body, saddle, tail, head and paws. The head is drawn in
//! its own local frame (origin at the head centre) and placed by a
//! translate-then-rotate transform, so head tilt never touches the body.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::primitives::{
    circle, ellipse, group, path, Fragment, Style, COLOR_BEIGE, COLOR_EYE, COLOR_MASK,
    COLOR_NOSE, COLOR_SADDLE, COLOR_TONGUE, COLOR_TONGUE_HIGHLIGHT, COLOR_WHITE,
};
use crate::CANVAS_SIZE;

/// Character centre on the canvas. Sits a little below the scene centre.
pub const CHARACTER_CENTER: (f64, f64) = (CANVAS_SIZE as f64 / 2.0, CANVAS_SIZE as f64 / 2.0 + 20.0);

/// Head centre offset from the character centre.
const HEAD_OFFSET_Y: f64 = -60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Degrees, applied to the head subgroup only.
    #[serde(default)]
    pub head_tilt: i32,
    #[serde(default)]
    pub tongue_out: bool,
    /// Closed eyes; suppresses tongue and wink.
    #[serde(default)]
    pub asleep: bool,
    #[serde(default)]
    pub wink: bool,
}

fn default_scale() -> f64 { 1.0 }

impl Default for Pose {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            head_tilt: 0,
            tongue_out: false,
            asleep: false,
            wink: false,
        }
    }
}

/// Placement of the head subgroup: translation first, then rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadTransform {
    pub translate: (f64, f64),
    pub rotation: f64,
}

impl HeadTransform {
    pub fn for_pose(pose: &Pose) -> Self {
        let (cx, cy) = CHARACTER_CENTER;
        Self {
            translate: (cx, cy + HEAD_OFFSET_Y),
            rotation: f64::from(pose.head_tilt),
        }
    }

    pub fn is_pure_translation(&self) -> bool {
        self.rotation == 0.0
    }
}

impl fmt::Display for HeadTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({},{}) rotate({})",
            self.translate.0, self.translate.1, self.rotation
        )
    }
}

/// Compose the full character, back to front.
pub fn compose(pose: &Pose) -> Fragment {
    Fragment::concat([body(pose.scale), tail(pose.scale), head(pose), front_paws()])
}

/// Body silhouette plus the saddle marking across the back.
fn body(scale: f64) -> Fragment {
    let (cx, cy) = CHARACTER_CENTER;
    Fragment::concat([
        ellipse(cx, cy + 70.0, 160.0 * scale, 120.0 * scale, Style::Heavy(COLOR_BEIGE)),
        path(
            &format!(
                "M {},{} Q {},{} {},{}",
                cx - 140.0 * scale,
                cy + 20.0,
                cx,
                cy - 20.0,
                cx + 140.0 * scale,
                cy + 20.0
            ),
            Style::Heavy(COLOR_SADDLE),
        ),
    ])
}

fn tail(scale: f64) -> Fragment {
    let (cx, cy) = CHARACTER_CENTER;
    path(
        &format!(
            "M {},{} q 40,-20 20,-60 q -30,-40 -70,-5",
            cx + 160.0 * scale,
            cy + 40.0
        ),
        Style::Line,
    )
}

fn head(pose: &Pose) -> Fragment {
    let mut parts = vec![
        ellipse(0.0, 0.0, 130.0, 110.0, Style::Heavy(COLOR_BEIGE)),
        path("M -85,0 q 85,-70 170,0 q -35,80 -135,80 q -35,-25 -50,-80 z", Style::Heavy(COLOR_MASK)),
        // wrinkles
        path("M -70,-40 q 70,-30 140,0", Style::Line),
        path("M -60,-20 q 60,-20 120,0", Style::Line),
        // ears
        path("M -90,-60 q -40,40 0,70 q 20,5 40,-10 q -15,-20 -10,-60 z", Style::Heavy(COLOR_MASK)),
        path("M 90,-60 q 40,40 0,70 q -20,5 -40,-10 q 15,-20 10,-60 z", Style::Heavy(COLOR_MASK)),
    ];

    parts.extend(eyes(pose));

    parts.push(ellipse(0.0, 20.0, 26.0, 20.0, Style::Light(COLOR_NOSE)));
    parts.push(path("M 0,40 q -15,10 -30,0", Style::Line));
    parts.push(path("M 0,40 q 15,10 30,0", Style::Line));

    if pose.tongue_out && !pose.asleep {
        parts.push(tongue());
    }

    let transform = HeadTransform::for_pose(pose).to_string();
    group(Some(&transform), "", Fragment::concat(parts))
}

fn eyes(pose: &Pose) -> Vec<Fragment> {
    if pose.asleep {
        return vec![
            path("M -40,-5 q 20,15 40,0", Style::Line),
            path("M 40,-5 q -20,15 -40,0", Style::Line),
        ];
    }

    let mut eyes = open_eye(-35.0);
    if pose.wink {
        eyes.push(path("M 15,-5 q 20,8 40,0", Style::Line));
    } else {
        eyes.extend(open_eye(35.0));
    }
    eyes
}

fn open_eye(x: f64) -> Vec<Fragment> {
    let glint_x = if x < 0.0 { x + 5.0 } else { x - 5.0 };
    vec![
        circle(x, -5.0, 18.0, Style::Light(COLOR_EYE)),
        circle(glint_x, -10.0, 6.0, Style::Fill(COLOR_WHITE)),
    ]
}

fn tongue() -> Fragment {
    Fragment::concat([
        path(
            "M -15,44 q 15,26 30,0 q 5,22 -15,30 q -20,-8 -15,-30 z",
            Style::Light(COLOR_TONGUE),
        ),
        circle(0.0, 64.0, 4.0, Style::Fill(COLOR_TONGUE_HIGHLIGHT)),
    ])
}

fn front_paws() -> Fragment {
    let (cx, cy) = CHARACTER_CENTER;
    Fragment::concat([
        ellipse(cx - 70.0, cy + 150.0, 36.0, 22.0, Style::Heavy(COLOR_BEIGE)),
        ellipse(cx + 70.0, cy + 150.0, 36.0, 22.0, Style::Heavy(COLOR_BEIGE)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_tilt_is_pure_translation() {
        let t = HeadTransform::for_pose(&Pose::default());
        assert!(t.is_pure_translation());
        assert_eq!(t.to_string(), "translate(256,216) rotate(0)");
    }

    #[test]
    fn test_tilt_rotates_head_only() {
        let tilted = compose(&Pose { head_tilt: 10, ..Pose::default() });
        let markup = tilted.as_str();
        assert_eq!(markup.matches("rotate(").count(), 1);
        assert!(markup.contains(r#"<g transform="translate(256,216) rotate(10)">"#));
    }

    #[test]
    fn test_asleep_suppresses_tongue_and_open_eyes() {
        let pose = Pose { asleep: true, tongue_out: true, wink: true, ..Pose::default() };
        let markup = compose(&pose).into_string();
        assert!(!markup.contains(COLOR_TONGUE));
        assert!(!markup.contains(COLOR_EYE));
        assert!(!markup.contains("M 15,-5 q 20,8 40,0"));
        assert!(markup.contains("M -40,-5 q 20,15 40,0"));
    }

    #[test]
    fn test_wink_replaces_right_eye() {
        let markup = compose(&Pose { wink: true, ..Pose::default() }).into_string();
        assert_eq!(markup.matches(r#"r="18""#).count(), 1);
        assert!(markup.contains("M 15,-5 q 20,8 40,0"));
    }

    #[test]
    fn test_paws_drawn_after_head() {
        let markup = compose(&Pose::default()).into_string();
        let head_end = markup.find("</g>").unwrap();
        let paw = markup.find(r#"cy="426""#).unwrap();
        assert!(paw > head_end);
    }

    #[test]
    fn test_parts_drawn_back_to_front() {
        let markup = compose(&Pose::default()).into_string();
        let body = markup.find(r#"cy="346""#).unwrap();
        let saddle = markup.find(COLOR_SADDLE).unwrap();
        let tail = markup.find("q 40,-20 20,-60").unwrap();
        let head = markup.find("<g transform=").unwrap();
        let paws = markup.find(r#"cy="426""#).unwrap();

        let offsets = [body, saddle, tail, head, paws];
        assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{:?}", offsets);
    }
}
