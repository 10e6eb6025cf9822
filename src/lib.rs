//! Host-side driver for the Dynamixel Protocol 1.0 and Protocol 2.0 serial bus.
//!
//! Protocol 1 and Protocol 2 are incompatible wire formats spoken by
//! different Dynamixel actuator generations. Each lives in its own module
//! ([`v1`], [`v2`]) with its own packet codec, bus engine, and operation
//! surface; both share the [`SerialPort`] transport contract, the
//! [`Response`]/[`GatherResult`] outcome types, and the logging/error
//! infrastructure at the crate root.

#[macro_use]
mod log;

mod error;
mod response;
mod serial_port;

pub mod v1;
pub mod v2;

pub use error::{BufferTooSmallError, HardwareAlert, InvalidChecksum, InvalidHeaderPrefix, InvalidInstruction, InvalidMessage, InvalidPacketId, InvalidParameterCount, ReadError, TransferError, WriteError};
pub use response::{GatherResult, Response};
pub use serial_port::SerialPort;
