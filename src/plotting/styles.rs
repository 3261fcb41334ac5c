use plotters::style::RGBAColor;
use std::hash::{Hash, Hasher};

/// Chart theme configuration
#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(0, 0, 0, 0.94),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
        }
    }
}

impl ChartTheme {
    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        for color in [
            &self.background_color,
            &self.text_color,
            &self.grid_color,
            &self.axis_color,
        ] {
            (color.0, color.1, color.2, color.3.to_bits()).hash(state);
        }
    }
}

/// Chart style configuration
#[derive(Clone, Debug, Hash)]
pub struct ChartStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 1,
            font_size: 15,
            margin: 10,
            label_area_size: 50,
        }
    }
}
