use plotters::style::RGBColor;
use std::hash::{Hash, Hasher};

/// Handle for the color just handed out, passed back to [`Palette::color_for`] so the
/// next series avoids it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorToken(usize);

/// Deterministic per-label series colors.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<RGBColor>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                RGBColor(78, 121, 167),
                RGBColor(242, 142, 43),
                RGBColor(225, 87, 89),
                RGBColor(118, 183, 178),
                RGBColor(89, 161, 79),
                RGBColor(237, 201, 72),
                RGBColor(176, 122, 161),
                RGBColor(255, 157, 167),
                RGBColor(156, 117, 95),
                RGBColor(186, 176, 172),
            ],
        }
    }
}

impl Palette {
    /// Build a palette from `colors`; an empty list falls back to the default palette.
    pub fn new(colors: Vec<RGBColor>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Pick the color for `label`.
    ///
    /// The same label always hashes to the same slot. If that slot is the one in
    /// `previous`, the next slot is used instead.
    pub fn color_for(&self, label: &str, previous: Option<ColorToken>) -> (RGBColor, ColorToken) {
        let len = self.colors.len();
        let mut slot = (fnv1a(label.as_bytes()) % len as u64) as usize;
        if previous == Some(ColorToken(slot)) && len > 1 {
            slot = (slot + 1) % len;
        }
        (self.colors[slot], ColorToken(slot))
    }

    /// Colors for a sequence of series, each avoiding its predecessor's color.
    pub fn assign(&self, labels: &[String]) -> Vec<RGBColor> {
        let mut previous = None;
        labels
            .iter()
            .map(|label| {
                let (color, token) = self.color_for(label, previous);
                previous = Some(token);
                color
            })
            .collect()
    }

    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        for color in &self.colors {
            (color.0, color.1, color.2).hash(state);
        }
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
    })
}
