use super::instruction_id;
use crate::v2::client::{Client, BROADCAST_ID};
use crate::v2::endian::{write_u16_le, write_u32_le};
use crate::{Response, SerialPort, TransferError};

impl<T: SerialPort> Client<T> {
	/// Write arbitrary bytes to one device's control table.
	///
	/// Passing the broadcast ID writes to every device; no device replies to
	/// a broadcast write, so this always returns `Response::Ok` without
	/// waiting on the bus.
	pub fn write_bytes(&mut self, motor_id: u8, address: u16, data: &[u8]) -> Result<Response<()>, TransferError<T::Error>> {
		let request_len = 8 + 2 + data.len() + 2;
		if motor_id == BROADCAST_ID {
			self.write_only(motor_id, instruction_id::WRITE, 2 + data.len(), |buffer| {
				write_u16_le(&mut buffer[0..2], address);
				buffer[2..].copy_from_slice(data);
			})?;
			return Ok(Response::Ok { id: motor_id, data: () });
		}
		self.transfer_single(
			motor_id,
			instruction_id::WRITE,
			2 + data.len(),
			request_len,
			0,
			|buffer| {
				write_u16_le(&mut buffer[0..2], address);
				buffer[2..].copy_from_slice(data);
			},
			|parameters, _error| if parameters.is_empty() { Some(()) } else { None },
		)
	}

	/// Write an 8 bit value to one device.
	pub fn write_u8(&mut self, motor_id: u8, address: u16, value: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.write_bytes(motor_id, address, &[value])
	}

	/// Write a 16 bit value to one device.
	pub fn write_u16(&mut self, motor_id: u8, address: u16, value: u16) -> Result<Response<()>, TransferError<T::Error>> {
		let mut buffer = [0u8; 2];
		write_u16_le(&mut buffer, value);
		self.write_bytes(motor_id, address, &buffer)
	}

	/// Write a 32 bit value to one device.
	pub fn write_u32(&mut self, motor_id: u8, address: u16, value: u32) -> Result<Response<()>, TransferError<T::Error>> {
		let mut buffer = [0u8; 4];
		write_u32_le(&mut buffer, value);
		self.write_bytes(motor_id, address, &buffer)
	}
}
