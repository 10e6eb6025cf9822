//! The public Protocol 1 operation surface.

use std::time::Duration;

use super::bus::{message_transfer_time, Bus};
use super::packet::StatusPacket;
use crate::{ReadError, Response, SerialPort, TransferError, WriteError};

/// Extra latency budgeted on top of the wire transfer time itself, to cover
/// a device's internal processing delay.
pub const RESPONSE_LATENCY_MARGIN: Duration = Duration::from_millis(34);

/// The broadcast packet ID: every device on the bus acts, but (for
/// instructions that would normally reply) none of them answer.
pub const BROADCAST_ID: u8 = 0xFE;

/// A Protocol 1.0 client.
pub struct Client<T> {
	pub(crate) bus: Bus<T>,
}

impl<T: SerialPort> Client<T> {
	/// Wrap an already-configured serial port.
	pub fn new(serial_port: T) -> Result<Self, T::Error> {
		Ok(Self { bus: Bus::new(serial_port)? })
	}

	/// Wrap an already-configured serial port with a custom buffer size.
	pub fn with_buffer_size(serial_port: T, buffer_size: usize) -> Result<Self, T::Error> {
		Ok(Self {
			bus: Bus::with_buffer_size(serial_port, buffer_size)?,
		})
	}

	/// Borrow the underlying serial port.
	pub fn serial_port(&self) -> &T {
		self.bus.serial_port()
	}

	/// Consume the client and return the underlying serial port.
	pub fn into_serial_port(self) -> T {
		self.bus.into_serial_port()
	}

	/// The baud rate of the underlying serial port.
	pub fn baud_rate(&self) -> u32 {
		self.bus.baud_rate()
	}

	/// Change the baud rate of the underlying serial port.
	pub fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), T::Error> {
		self.bus.set_baud_rate(baud_rate)
	}

	pub(crate) fn response_timeout(&self, request_len: usize, response_len: usize) -> Duration {
		message_transfer_time(request_len as u32, self.bus.baud_rate())
			+ message_transfer_time(response_len as u32, self.bus.baud_rate())
			+ RESPONSE_LATENCY_MARGIN
	}

	/// Send an instruction and wait for exactly one status reply from `packet_id`.
	pub fn transfer_single<R>(
		&mut self,
		packet_id: u8,
		instruction_id: u8,
		parameter_count: usize,
		encode_request_len: usize,
		response_param_len: usize,
		encode_parameters: impl FnOnce(&mut [u8]),
		decode_parameters: impl FnOnce(&[u8], u8) -> Option<R>,
	) -> Result<Response<R>, TransferError<T::Error>> {
		self.bus
			.write_instruction(packet_id, instruction_id, parameter_count, encode_parameters)
			.map_err(TransferError::Write)?;

		let response_message_len = super::packet::STATUS_HEADER_SIZE + response_param_len + 1;
		let timeout = self.response_timeout(encode_request_len, response_message_len);

		match self.bus.read_status_response_timeout(timeout) {
			Ok(packet) => Ok(classify(Some(packet_id), packet, decode_parameters)),
			Err(ReadError::Timeout) => Ok(Response::Timeout),
			Err(ReadError::InvalidMessage(_)) => Ok(Response::Corrupted),
			Err(ReadError::HardwareAlert(alert)) => Ok(Response::HardwareAlert { id: alert.id }),
			Err(e @ (ReadError::Io(_) | ReadError::BufferTooSmall(_))) => Err(TransferError::Read(e)),
		}
	}

	/// Send a fire-and-forget instruction; no reply is expected from the bus.
	pub fn write_only(&mut self, packet_id: u8, instruction_id: u8, parameter_count: usize, encode_parameters: impl FnOnce(&mut [u8])) -> Result<(), WriteError<T::Error>> {
		self.bus.write_instruction(packet_id, instruction_id, parameter_count, encode_parameters)
	}

	/// Read one more status reply as part of an ongoing broadcast-gather transaction.
	pub(crate) fn read_gather_reply<R>(&mut self, timeout: Duration, decode_parameters: impl FnOnce(&[u8], u8) -> Option<R>) -> Result<Response<R>, ReadError<T::Error>> {
		match self.bus.read_status_response_timeout(timeout) {
			Ok(packet) => Ok(classify(None, packet, decode_parameters)),
			Err(ReadError::Timeout) => Ok(Response::Timeout),
			Err(ReadError::InvalidMessage(_)) => Ok(Response::Corrupted),
			Err(ReadError::HardwareAlert(alert)) => Ok(Response::HardwareAlert { id: alert.id }),
			Err(e @ (ReadError::Io(_) | ReadError::BufferTooSmall(_))) => Err(e),
		}
	}
}

/// Turn a raw status packet into a [`Response`], checking the packet ID and
/// branching on the error byte. Protocol 1 has no separate hardware-alert
/// bit, so [`Response::HardwareAlert`] is never produced here.
///
/// `expected_id` is `None` for broadcast-gather reads, where any device may answer.
///
/// `decode_parameters` receives the error byte alongside the raw parameters
/// so a decoder can relax its own shape checks on the error path: a device
/// reporting an error does not owe the reply the same parameter count as a
/// clean success, and the error code must still surface even when the
/// parameters don't decode into whatever a success would have looked like.
fn classify<R>(expected_id: Option<u8>, packet: StatusPacket<'_>, decode_parameters: impl FnOnce(&[u8], u8) -> Option<R>) -> Response<R> {
	if let Some(expected_id) = expected_id {
		if packet.packet_id() != expected_id {
			return Response::Corrupted;
		}
	}

	let id = packet.packet_id();
	let error = packet.error();
	match decode_parameters(packet.parameters(), error) {
		None => Response::Corrupted,
		Some(data) if error == 0 => Response::Ok { id, data },
		Some(data) => Response::DeviceError { id, error, raw: data },
	}
}
