mod chart;
mod palette;
mod styles;
mod tooltip;


pub use chart::{
    clear_render_cache, draw_chart, format_axis_value, render_chart, render_png_async,
    RenderOptions,
};
pub use palette::{ColorToken, Palette};
pub use styles::{ChartStyle, ChartTheme};
pub use tooltip::{
    export_json, export_json_in, format_date_in, format_tooltip, format_tooltip_in, format_value,
};
