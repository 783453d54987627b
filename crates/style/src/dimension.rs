//! Page geometry as it appears in engine configuration.
//!
//! Both types accept a compact JSON form: margins as a number, a CSS-like shorthand
//! string (`"36"`, `"1cm 2cm"`, `"10pt 20pt 10pt 20pt"`) or an object; page sizes as a
//! paper name or `{ "width", "height" }` in points.
use serde::{de, Deserialize, Deserializer, Serialize};

/// Points per unit for the lengths accepted in margin shorthand.
const UNITS: [(&str, f32); 4] = [("pt", 1.0), ("mm", 72.0 / 25.4), ("cm", 72.0 / 2.54), ("in", 72.0)];

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins::all(36.0)
    }
}

fn length_pt(token: &str) -> Result<f32, String> {
    let (number, scale) = UNITS
        .iter()
        .find_map(|(unit, scale)| token.strip_suffix(unit).map(|n| (n, *scale)))
        .unwrap_or((token, 1.0));
    number
        .trim()
        .parse::<f32>()
        .map(|n| n * scale)
        .map_err(|_| format!("'{}' is not a length", token))
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self::symmetric(value, value)
    }

    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    fn from_shorthand(input: &str) -> Result<Self, String> {
        let lengths = input
            .split_whitespace()
            .map(length_pt)
            .collect::<Result<Vec<_>, _>>()?;
        match lengths[..] {
            [all] => Ok(Margins::all(all)),
            [vertical, horizontal] => Ok(Margins::symmetric(vertical, horizontal)),
            [top, right, bottom, left] => Ok(Margins { top, right, bottom, left }),
            _ => Err(format!(
                "margin shorthand takes 1, 2 or 4 lengths, got {}",
                lengths.len()
            )),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MarginsRepr {
    Uniform(f32),
    Shorthand(String),
    Sides {
        #[serde(default)]
        top: f32,
        #[serde(default)]
        right: f32,
        #[serde(default)]
        bottom: f32,
        #[serde(default)]
        left: f32,
    },
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MarginsRepr::deserialize(deserializer)? {
            MarginsRepr::Uniform(value) => Ok(Margins::all(value)),
            MarginsRepr::Shorthand(text) => Margins::from_shorthand(&text).map_err(de::Error::custom),
            MarginsRepr::Sides { top, right, bottom, left } => Ok(Margins { top, right, bottom, left }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PageSizeRepr {
    Named(String),
    Points { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }

    fn named(name: &str) -> Option<Self> {
        [PageSize::A4, PageSize::Letter, PageSize::Legal]
            .into_iter()
            .find(|size| size.name().is_some_and(|n| n.eq_ignore_ascii_case(name.trim())))
    }

    fn name(&self) -> Option<&'static str> {
        match self {
            PageSize::A4 => Some("A4"),
            PageSize::Letter => Some("Letter"),
            PageSize::Legal => Some("Legal"),
            PageSize::Custom { .. } => None,
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match (self.name(), self) {
            (Some(name), _) => PageSizeRepr::Named(name.to_string()),
            (None, PageSize::Custom { width, height }) => PageSizeRepr::Points { width: *width, height: *height },
            (None, _) => PageSizeRepr::Named("A4".to_string()),
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PageSizeRepr::deserialize(deserializer)? {
            PageSizeRepr::Named(name) => PageSize::named(&name)
                .ok_or_else(|| de::Error::custom(format!("unknown page size '{}'", name))),
            PageSizeRepr::Points { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}
