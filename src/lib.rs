pub mod config;
pub mod form;
pub mod http_client;
pub mod predict_client;
pub mod result_view;
pub mod selection;
pub mod slideshow;
pub mod state;
pub mod submit;
pub mod time_field;
