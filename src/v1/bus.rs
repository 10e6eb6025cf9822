//! The core Protocol 1 engine: framing, checksum, and the receive state machine.
//!
//! Structurally mirrors [`crate::v2::Bus`]; the two aren't shared because
//! their wire formats disagree on checksum width, endianness, and the
//! presence of byte-stuffing.

use std::time::{Duration, Instant};

use super::codec;
use super::packet::{StatusPacket, HEADER_PREFIX, INSTRUCTION_HEADER_SIZE, STATUS_HEADER_SIZE};
use crate::error::{BufferTooSmallError, InvalidChecksum};
use crate::{ReadError, SerialPort, WriteError};

/// Default read/write buffer size.
pub const DEFAULT_BUFFER_SIZE: usize = 256;

/// Low-level Protocol 1 bus engine.
pub struct Bus<T> {
	pub(crate) serial_port: T,
	pub(crate) baud_rate: u32,
	read_buffer: Vec<u8>,
	read_len: usize,
	used_bytes: usize,
	write_buffer: Vec<u8>,
}

impl<T: SerialPort> Bus<T> {
	/// Wrap an already-configured serial port with the default buffer size.
	pub fn new(serial_port: T) -> Result<Self, T::Error> {
		Self::with_buffer_size(serial_port, DEFAULT_BUFFER_SIZE)
	}

	/// Wrap an already-configured serial port with a custom buffer size.
	pub fn with_buffer_size(serial_port: T, buffer_size: usize) -> Result<Self, T::Error> {
		let baud_rate = serial_port.baud_rate()?;
		Ok(Self::with_buffer_size_and_baud_rate(serial_port, buffer_size, baud_rate))
	}

	/// Wrap an already-configured serial port, supplying the baud rate instead of querying it.
	pub fn with_buffer_size_and_baud_rate(serial_port: T, buffer_size: usize, baud_rate: u32) -> Self {
		let mut write_buffer = vec![0u8; buffer_size];
		write_buffer[..2].copy_from_slice(&HEADER_PREFIX);
		Self {
			serial_port,
			baud_rate,
			read_buffer: vec![0u8; buffer_size],
			read_len: 0,
			used_bytes: 0,
			write_buffer,
		}
	}

	/// Borrow the underlying serial port.
	pub fn serial_port(&self) -> &T {
		&self.serial_port
	}

	/// Consume the bus and return the underlying serial port.
	pub fn into_serial_port(self) -> T {
		self.serial_port
	}

	/// The baud rate last set or observed on the underlying port.
	pub fn baud_rate(&self) -> u32 {
		self.baud_rate
	}

	/// Change the baud rate of the underlying port.
	pub fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), T::Error> {
		self.serial_port.set_baud_rate(baud_rate)?;
		self.baud_rate = baud_rate;
		Ok(())
	}

	/// Write a status message (device-to-client direction; used only by tests/mocks).
	pub fn write_status<F>(&mut self, packet_id: u8, error: u8, parameter_count: usize, encode_parameters: F) -> Result<(), WriteError<T::Error>>
	where
		F: FnOnce(&mut [u8]),
	{
		BufferTooSmallError::check(STATUS_HEADER_SIZE + parameter_count + 1, self.write_buffer.len())?;
		self.write_instruction(packet_id, error, parameter_count, encode_parameters)
	}

	/// Encode and send an instruction message.
	pub fn write_instruction<F>(&mut self, packet_id: u8, instruction_id: u8, parameter_count: usize, encode_parameters: F) -> Result<(), WriteError<T::Error>>
	where
		F: FnOnce(&mut [u8]),
	{
		let buffer = &mut self.write_buffer;
		BufferTooSmallError::check(INSTRUCTION_HEADER_SIZE + parameter_count + 1, buffer.len())?;

		buffer[2] = packet_id;
		buffer[3] = (parameter_count + 2) as u8;
		buffer[4] = instruction_id;
		encode_parameters(&mut buffer[INSTRUCTION_HEADER_SIZE..][..parameter_count]);

		let checksum_index = INSTRUCTION_HEADER_SIZE + parameter_count;
		buffer[checksum_index] = codec::checksum(&buffer[2..checksum_index]);

		self.read_len = 0;
		self.used_bytes = 0;
		self.serial_port.discard_input_buffer().map_err(WriteError::DiscardBuffer)?;

		let message = &buffer[..checksum_index + 1];
		trace!("sending instruction: {:02X?}", message);
		self.serial_port.write_all(message).map_err(WriteError::Io)?;
		Ok(())
	}

	/// Read one status message, waiting up to `timeout` for it to fully arrive.
	pub fn read_status_response_timeout(&mut self, timeout: Duration) -> Result<StatusPacket<'_>, ReadError<T::Error>> {
		BufferTooSmallError::check(STATUS_HEADER_SIZE, self.read_buffer.len())?;

		let deadline = Instant::now() + timeout;

		let message_len = loop {
			self.remove_garbage();

			if self.read_len > STATUS_HEADER_SIZE {
				let len_value = self.read_buffer[3] as usize;
				let body_len = len_value.saturating_sub(1);
				BufferTooSmallError::check(STATUS_HEADER_SIZE + body_len, self.read_buffer.len())?;
				if self.read_len >= STATUS_HEADER_SIZE + body_len {
					break STATUS_HEADER_SIZE + body_len;
				}
			}

			let remaining = match deadline.checked_duration_since(Instant::now()) {
				Some(remaining) if !remaining.is_zero() => remaining,
				_ => return Err(ReadError::Timeout),
			};

			let new_data = self.serial_port.read(&mut self.read_buffer[self.read_len..], remaining).map_err(ReadError::Io)?;
			self.read_len += new_data;
		};

		let parameters_end = message_len - 1;
		let checksum_message = self.read_buffer[parameters_end];
		let checksum_computed = codec::checksum(&self.read_buffer[2..parameters_end]);
		if checksum_message != checksum_computed {
			self.consume_read_bytes(message_len);
			return Err(InvalidChecksum {
				message: checksum_message.into(),
				computed: checksum_computed.into(),
			}
			.into());
		}

		self.used_bytes += message_len;

		Ok(StatusPacket {
			data: &self.read_buffer[..parameters_end],
		})
	}

	fn remove_garbage(&mut self) {
		let garbage_len = find_header(&self.read_buffer[..self.read_len][self.used_bytes..]);
		if garbage_len > 0 {
			debug!("skipping {} bytes of leading garbage.", garbage_len);
		}
		self.consume_read_bytes(self.used_bytes + garbage_len);
		debug_assert_eq!(self.used_bytes, 0);
	}

	fn consume_read_bytes(&mut self, len: usize) {
		debug_assert!(len <= self.read_len);
		self.read_buffer.copy_within(len..self.read_len, 0);
		self.used_bytes = self.used_bytes.saturating_sub(len);
		self.read_len -= len;
	}
}

fn find_header(buffer: &[u8]) -> usize {
	for i in 0..buffer.len() {
		let possible_prefix = HEADER_PREFIX.len().min(buffer.len() - i);
		if buffer[i..].starts_with(&HEADER_PREFIX[..possible_prefix]) {
			return i;
		}
	}
	buffer.len()
}

/// The time required to transfer `message_size` bytes at `baud_rate`, assuming 8N1 framing.
pub fn message_transfer_time(message_size: u32, baud_rate: u32) -> Duration {
	let baud_rate = u64::from(baud_rate);
	let bits = u64::from(message_size) * 10;
	let secs = bits / baud_rate;
	let subsec_bits = bits % baud_rate;
	let nanos = (subsec_bits * 1_000_000_000).div_ceil(baud_rate);
	Duration::new(secs, nanos as u32)
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::assert;

	#[test]
	fn test_find_header() {
		assert!(find_header(&[0xFF]) == 0);
		assert!(find_header(&[0xFF, 0xFF, 0x01, 9]) == 0);
		assert!(find_header(&[0, 1, 2, 3, 4, 0xFF]) == 5);
	}
}
