use super::instruction_id;
use crate::v1::client::{Client, BROADCAST_ID};
use crate::{Response, SerialPort, TransferError};

impl<T: SerialPort> Client<T> {
	/// Stage a write to one device's control table, to be applied on the next [`Client::action`].
	pub fn reg_write_bytes(&mut self, motor_id: u8, address: u8, data: &[u8]) -> Result<Response<()>, TransferError<T::Error>> {
		let request_len = 6 + 1 + data.len();
		if motor_id == BROADCAST_ID {
			self.write_only(motor_id, instruction_id::REG_WRITE, 1 + data.len(), |buffer| {
				buffer[0] = address;
				buffer[1..].copy_from_slice(data);
			})?;
			return Ok(Response::Ok { id: motor_id, data: () });
		}
		self.transfer_single(
			motor_id,
			instruction_id::REG_WRITE,
			1 + data.len(),
			request_len,
			0,
			|buffer| {
				buffer[0] = address;
				buffer[1..].copy_from_slice(data);
			},
			|parameters, _error| if parameters.is_empty() { Some(()) } else { None },
		)
	}

	/// Stage an 8 bit value write.
	pub fn reg_write_u8(&mut self, motor_id: u8, address: u8, value: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.reg_write_bytes(motor_id, address, &[value])
	}

	/// Stage a 16 bit value write, split little-endian.
	pub fn reg_write_u16(&mut self, motor_id: u8, address: u8, value: u16) -> Result<Response<()>, TransferError<T::Error>> {
		let mut buffer = [0u8; 2];
		crate::v1::codec::write_u16_le(&mut buffer, value);
		self.reg_write_bytes(motor_id, address, &buffer)
	}
}
