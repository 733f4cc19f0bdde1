//! Native desktop front end built on egui/eframe.

mod app;
mod state;


pub use app::run;
