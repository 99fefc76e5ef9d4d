//! Reading and writing templates on disk.

mod csv;
mod json;

pub use csv::{to_csv_string, write_csv};
pub use json::{read_template, write_template};
