pub mod chart_view_model;
pub mod sliders_view_model;
pub mod variables_view_model;

pub use chart_view_model::{ChartViewModel, PlotViewModel};
pub use sliders_view_model::SlidersViewModel;
pub use variables_view_model::VariablesViewModel;
