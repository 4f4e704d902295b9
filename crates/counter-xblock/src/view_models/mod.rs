pub mod app_view_model;
