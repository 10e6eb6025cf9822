//! The core Protocol 2 engine: framing, checksum, and the receive state machine.

use std::time::{Duration, Instant};

use super::bitstuff;
use super::crc;
use super::endian::{read_u16_le, write_u16_le};
use super::packet::{HEADER_PREFIX, INSTRUCTION_HEADER_SIZE, STATUS_HEADER_SIZE};
use super::packet::StatusPacket;
use crate::error::{BufferTooSmallError, InvalidChecksum};
use crate::{ReadError, SerialPort, WriteError};

/// Default read/write buffer size: enough for the largest bulk transaction
/// this crate supports (253 devices worth of sync-read parameters) without
/// reallocating.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Low-level Protocol 2 bus engine.
///
/// Owns exactly one [`SerialPort`] for its lifetime. Framing, checksumming,
/// and header-resynchronization live here; the public operation surface is
/// built on top in [`crate::v2::Client`].
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
		write_buffer[..4].copy_from_slice(&HEADER_PREFIX);
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
	pub fn write_status<F>(&mut self, packet_id: u8, instruction_id: u8, error: u8, parameter_count: usize, encode_parameters: F) -> Result<(), WriteError<T::Error>>
	where
		F: FnOnce(&mut [u8]),
	{
		BufferTooSmallError::check(STATUS_HEADER_SIZE + parameter_count + 2, self.write_buffer.len())?;
		self.write_instruction(packet_id, instruction_id, parameter_count + 1, |buffer| {
			buffer[0] = error;
			encode_parameters(&mut buffer[1..]);
		})
	}

	/// Encode and send an instruction message.
	pub fn write_instruction<F>(&mut self, packet_id: u8, instruction_id: u8, parameter_count: usize, encode_parameters: F) -> Result<(), WriteError<T::Error>>
	where
		F: FnOnce(&mut [u8]),
	{
		let buffer = &mut self.write_buffer;
		BufferTooSmallError::check(INSTRUCTION_HEADER_SIZE + parameter_count + 2, buffer.len())?;

		buffer[4] = packet_id;
		buffer[5] = 0;
		buffer[6] = 0;
		buffer[7] = instruction_id;
		encode_parameters(&mut buffer[INSTRUCTION_HEADER_SIZE..][..parameter_count]);

		let stuffed_body_len = bitstuff::stuff_inplace(&mut buffer[INSTRUCTION_HEADER_SIZE..], parameter_count)
			.map_err(|()| BufferTooSmallError {
				required: INSTRUCTION_HEADER_SIZE + parameter_count + bitstuff::stuffing_required(&buffer[INSTRUCTION_HEADER_SIZE..][..parameter_count]) + 2,
				available: buffer.len(),
			})?;

		write_u16_le(&mut buffer[5..], stuffed_body_len as u16 + 3);

		let checksum_index = INSTRUCTION_HEADER_SIZE + stuffed_body_len;
		let checksum = crc::checksum(&buffer[..checksum_index]);
		write_u16_le(&mut buffer[checksum_index..], checksum);

		// Discard stale replies before sending; a new instruction invalidates
		// any reply still sitting unread from a previous one.
		self.read_len = 0;
		self.used_bytes = 0;
		self.serial_port.discard_input_buffer().map_err(WriteError::DiscardBuffer)?;

		let message = &buffer[..checksum_index + 2];
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
				let body_len = self.read_buffer[5] as usize + self.read_buffer[6] as usize * 256;
				let body_len = body_len - 2; // length field includes the error byte and the CRC, already part of the header/footer accounting below
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

		let parameters_end = message_len - 2;
		trace!("read packet: {:02X?}", &self.read_buffer[..parameters_end]);

		let checksum_message = read_u16_le(&self.read_buffer[parameters_end..]);
		let checksum_computed = crc::checksum(&self.read_buffer[..parameters_end]);
		if checksum_message != checksum_computed {
			self.consume_read_bytes(message_len);
			return Err(InvalidChecksum {
				message: checksum_message,
				computed: checksum_computed,
			}
			.into());
		}

		self.used_bytes += message_len;

		let parameter_count = bitstuff::unstuff_inplace(&mut self.read_buffer[STATUS_HEADER_SIZE..parameters_end]);
		Ok(StatusPacket {
			data: &self.read_buffer[..STATUS_HEADER_SIZE + parameter_count],
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

/// Find the earliest position in `buffer` that could be the start of a header.
///
/// If the buffer ends with a partial prefix match, that partial match's start
/// is returned so the next read can complete it.
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
	fn test_message_transfer_time() {
		assert!(message_transfer_time(100, 1_000) == Duration::from_secs(1));
		assert!(message_transfer_time(1_000, 1_000_000) == Duration::from_millis(10));
		assert!(message_transfer_time(43, 1) == Duration::from_secs(430));
		let lots = u32::MAX - 1;
		assert!(message_transfer_time(lots, 1) == Duration::from_secs(u64::from(lots) * 10));
		assert!(message_transfer_time(lots, lots) == Duration::from_secs(10));
	}

	#[test]
	fn test_find_header() {
		assert!(find_header(&[0xFF]) == 0);
		assert!(find_header(&[0xFF, 0xFF, 0xFD, 0x00, 9]) == 0);
		assert!(find_header(&[0, 1, 2, 3, 4, 0xFF]) == 5);
		assert!(find_header(&[0xFF, 1]) == 2);
	}
}
