//! Frame and bitstream encoding.
//!
//! A sealed message becomes a self-describing frame of bytes, and the frame
//! becomes an MSB-first bitstream ready for embedding.

mod bits;
mod frame;

pub use bits::{from_bits, to_bits};
pub use frame::{decode_frame, encode_frame, FrameHeader};
