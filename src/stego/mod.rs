//! LSB embedding and capacity accounting.

pub mod capacity;
pub mod lsb;

pub use capacity::{capacity_bits, capacity_bytes, fits, frame_len, max_message_bytes};
pub use lsb::{embed, extract, extract_range};
