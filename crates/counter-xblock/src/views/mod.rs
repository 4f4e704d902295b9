use crate::view_models::app_view_model::AppViewModel;
use ratatui::{layout::Rect, Frame};

pub mod app_view;

/// Render the entire application UI
pub fn render(vm: &AppViewModel, area: Rect, f: &mut Frame) {
    app_view::render(vm, area, f);
}
