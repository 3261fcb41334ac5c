mod percentage;
mod pipeline;
mod pivot;
mod window;

#[cfg(test)]
mod tests;

pub use percentage::to_percentage;
pub use pipeline::{prepare_chart, prepare_chart_in};
pub use pivot::{distinct_versions, pivot};
pub use window::{
    aggregate_window, rank_versions, select_top_versions, select_top_versions_in,
    WindowAggregate,
};
