pub mod header;
pub mod notifications;
pub mod output_panel;
pub mod progress_bar;
pub mod symbolize_form;
pub mod upload_area;
