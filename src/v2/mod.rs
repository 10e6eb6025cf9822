//! Dynamixel Protocol 2.0: CRC-16 checked, byte-stuffed, little-endian.

mod bitstuff;
mod bus;
mod crc;
mod endian;
mod packet;

pub mod instructions;

mod client;

pub use bus::{message_transfer_time, Bus};
pub use client::Client;
pub use packet::StatusPacket;
