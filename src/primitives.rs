//! Primitive Drawing Library
//!
//! Pure functions that emit self-contained SVG fragments. No shared style
//! state: every fragment carries its own inline style string.

use std::fmt;

pub const COLOR_BEIGE: &str = "#E7D3B5";
pub const COLOR_SADDLE: &str = "#B99B72";
pub const COLOR_MASK: &str = "#3A2E2A";
pub const COLOR_NOSE: &str = "#1E1A19";
pub const COLOR_EYE: &str = "#2B201D";
pub const COLOR_OUTLINE: &str = "#1B1716";
pub const COLOR_TONGUE: &str = "#E67C73";
pub const COLOR_TONGUE_HIGHLIGHT: &str = "#F6B1A9";
pub const COLOR_WHITE: &str = "#FFFFFF";
pub const COLOR_HEART: &str = "#FF6B6B";
pub const ACCENT_YELLOW: &str = "#FFC857";
pub const ACCENT_BLUE: &str = "#7EC8E3";
pub const ACCENT_LIME: &str = "#A7E07E";

const HEAVY_WIDTH: u32 = 6;
const LIGHT_WIDTH: u32 = 3;

/// A piece of vector markup with no external references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenate fragments in drawing order.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Fragment>,
    {
        Self(parts.into_iter().map(|f| f.0).collect())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fragment {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

/// Style presets. Callers pick a preset; stroke colour, width and joins are
/// fixed by the preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style<'a> {
    /// Thick outline with a fill, for body and head shapes.
    Heavy(&'a str),
    /// Thick outline, no fill, for curves and line work.
    Line,
    /// Thin outline with a fill, for eyes, nose and tongue.
    Light(&'a str),
    /// Fill only.
    Fill(&'a str),
    /// Inline style for scene effects that need their own stroke.
    Raw(&'a str),
}

impl Style<'_> {
    pub fn to_attr(self) -> String {
        match self {
            Style::Heavy(fill) => format!(r#"style="{}""#, outlined(fill, HEAVY_WIDTH)),
            Style::Line => format!(
                r#"style="stroke:{COLOR_OUTLINE};stroke-width:{HEAVY_WIDTH};stroke-linecap:round;stroke-linejoin:round;fill:none;""#
            ),
            Style::Light(fill) => format!(r#"style="{}""#, outlined(fill, LIGHT_WIDTH)),
            Style::Fill(fill) => format!(r#"fill="{fill}""#),
            Style::Raw(style) => format!(r#"style="{style}""#),
        }
    }
}

fn outlined(fill: &str, width: u32) -> String {
    format!(
        "fill:{fill};stroke:{COLOR_OUTLINE};stroke-width:{width};stroke-linecap:round;stroke-linejoin:round;"
    )
}

pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, style: Style<'_>) -> Fragment {
    Fragment(format!(
        r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" {}/>"#,
        style.to_attr()
    ))
}

pub fn circle(cx: f64, cy: f64, r: f64, style: Style<'_>) -> Fragment {
    Fragment(format!(
        r#"<circle cx="{cx}" cy="{cy}" r="{r}" {}/>"#,
        style.to_attr()
    ))
}

/// `d` is path data using move/line/cubic/quadratic commands.
pub fn path(d: &str, style: Style<'_>) -> Fragment {
    Fragment(format!(r#"<path d="{d}" {}/>"#, style.to_attr()))
}

/// `extra` is appended verbatim to the element (e.g. `rx`, `transform`).
pub fn rect(x: f64, y: f64, width: f64, height: f64, style: Style<'_>, extra: &str) -> Fragment {
    let extra = if extra.is_empty() {
        String::new()
    } else {
        format!(" {extra}")
    };
    Fragment(format!(
        r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" {}{extra}/>"#,
        style.to_attr()
    ))
}

/// Group with an optional transform and presentation attributes.
pub fn group(transform: Option<&str>, attrs: &str, content: Fragment) -> Fragment {
    let mut open = String::from("<g");
    if let Some(t) = transform {
        open.push_str(&format!(r#" transform="{t}""#));
    }
    if !attrs.is_empty() {
        open.push(' ');
        open.push_str(attrs);
    }
    Fragment(format!("{open}>{}</g>", content.0))
}

/// Caption text: bold, centred on `x`.
pub fn caption(x: f64, y: f64, content: &str) -> Fragment {
    Fragment(format!(
        r#"<text x="{x}" y="{y}" font-family="DejaVu Sans, Arial, sans-serif" font-size="36" font-weight="700" text-anchor="middle" fill="{COLOR_OUTLINE}" stroke="white" stroke-width="0">{}</text>"#,
        escape_markup(content)
    ))
}

/// Small glyph label (emoji badges on accessories).
pub fn glyph(x: f64, y: f64, content: &str) -> Fragment {
    Fragment(format!(
        r#"<text x="{x}" y="{y}" font-family="DejaVu Sans" font-size="18" text-anchor="middle">{}</text>"#,
        escape_markup(content)
    ))
}

/// Escape text for use inside SVG/HTML element content or attribute values.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heavy_and_light_presets_differ_in_width() {
        let heavy = ellipse(0.0, 0.0, 10.0, 10.0, Style::Heavy(COLOR_BEIGE));
        let light = ellipse(0.0, 0.0, 10.0, 10.0, Style::Light(COLOR_BEIGE));
        assert!(heavy.as_str().contains("stroke-width:6"));
        assert!(light.as_str().contains("stroke-width:3"));
    }

    #[test]
    fn test_whole_numbers_render_without_decimals() {
        let c = circle(256.0, 236.0, 6.0, Style::Fill(ACCENT_YELLOW));
        assert_eq!(c.as_str(), r##"<circle cx="256" cy="236" r="6" fill="#FFC857"/>"##);
    }

    #[test]
    fn test_group_transform_wraps_content() {
        let g = group(Some("translate(1,2)"), "", Fragment::new("<x/>"));
        assert_eq!(g.as_str(), r#"<g transform="translate(1,2)"><x/></g>"#);
    }

    #[test]
    fn test_caption_is_escaped() {
        let t = caption(10.0, 20.0, "a < b & c");
        assert!(t.as_str().contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_concat_preserves_order() {
        let f = Fragment::concat([Fragment::new("a"), Fragment::new("b")]);
        assert_eq!(f.as_str(), "ab");
    }
}
