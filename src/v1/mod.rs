//! The Protocol 1.0 (AX/MX "Dynamixel") transport.
//!
//! Wire format: a two-byte `0xFF 0xFF` header, an 8 bit packet ID, an 8 bit
//! length, an instruction (or error) byte, parameters, and a one-byte
//! checksum. There is no byte-stuffing and no CRC; the checksum is the
//! bitwise complement of the sum of every byte from the packet ID through
//! the last parameter.

mod bus;
mod client;
mod codec;
pub mod instructions;
mod packet;

pub use bus::{message_transfer_time, Bus};
pub use client::Client;
pub use packet::StatusPacket;
