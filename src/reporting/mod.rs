//! Presentation of validation results

pub mod console;
pub mod report_writer;
pub mod summary;

pub use console::{print_results, render_results, render_summary};
pub use report_writer::{write_json, write_report, JsonReport};
pub use summary::{format_size, Summary};
