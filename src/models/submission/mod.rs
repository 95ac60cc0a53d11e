pub mod decode;
pub mod layout;
pub mod queries;
pub mod types;

pub use decode::{average, decode_row, format_average, section_average};
pub use types::*;
