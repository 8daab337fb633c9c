pub mod model_reducer;
pub mod ui_reducer;
