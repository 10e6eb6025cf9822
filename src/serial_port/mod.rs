//! The [`SerialPort`] trait abstracts over the half-duplex serial transport shared by both protocols.

#[cfg(feature = "serial2")]
pub mod serial2;

use std::time::Duration;

/// A half-duplex serial transport.
///
/// Both Protocol 1 and Protocol 2 use 8 data bits, 1 stop bit, no parity;
/// framing at that level is the implementation's responsibility, not this
/// trait's. A `Bus` owns one `SerialPort` for its entire lifetime and never
/// shares it, so implementations do not need to be `Send`/`Sync` or support
/// concurrent access.
pub trait SerialPort {
	/// The error type returned by the port for I/O and configuration failures.
	type Error: core::fmt::Debug + core::fmt::Display;

	/// Get the current baud rate of the port.
	fn baud_rate(&self) -> Result<u32, Self::Error>;

	/// Set the baud rate of the port.
	fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error>;

	/// Discard any bytes currently sitting in the input buffer.
	///
	/// Called before every write so that a device's reply to a *previous*
	/// instruction cannot be mistaken for the reply to the next one.
	fn discard_input_buffer(&mut self) -> Result<(), Self::Error>;

	/// Read at least one byte into `buffer`, blocking up to `timeout`.
	///
	/// Returns the number of bytes read. A return of `0` means the timeout
	/// elapsed with nothing available; that is not itself an error.
	fn read(&mut self, buffer: &mut [u8], timeout: Duration) -> Result<usize, Self::Error>;

	/// Write the entire buffer to the port.
	fn write_all(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;

	/// True if `error` represents a timeout rather than a genuine I/O failure.
	fn is_timeout_error(error: &Self::Error) -> bool;
}
