use super::instruction_id;
use crate::v2::client::Client;
use crate::v2::endian::{read_u16_le, read_u32_le, write_u16_le};
use crate::{Response, SerialPort, TransferError};

impl<T: SerialPort> Client<T> {
	/// Read an arbitrary number of bytes from one device's control table.
	///
	/// Do not pass the broadcast ID; use [`Client::sync_read`] to read from several devices at once.
	pub fn read(&mut self, motor_id: u8, address: u16, count: u16) -> Result<Response<Vec<u8>>, TransferError<T::Error>> {
		let request_len = 8 + 4 + 2;
		self.transfer_single(
			motor_id,
			instruction_id::READ,
			4,
			request_len,
			count as usize,
			|buffer| {
				write_u16_le(&mut buffer[0..2], address);
				write_u16_le(&mut buffer[2..4], count);
			},
			move |parameters, error| {
				if error == 0 {
					return if parameters.len() != count as usize { None } else { Some(parameters.to_vec()) };
				}
				// A device reporting an error may reply with fewer bytes than requested;
				// pad out to `count` so read_u8/u16/u32's indexing stays in bounds.
				let mut raw = parameters.to_vec();
				raw.resize(count as usize, 0);
				Some(raw)
			},
		)
	}

	/// Read an 8 bit register from one device.
	pub fn read_u8(&mut self, motor_id: u8, address: u16) -> Result<Response<u8>, TransferError<T::Error>> {
		Ok(self.read(motor_id, address, 1)?.map(|data| data[0]))
	}

	/// Read a 16 bit register from one device.
	pub fn read_u16(&mut self, motor_id: u8, address: u16) -> Result<Response<u16>, TransferError<T::Error>> {
		Ok(self.read(motor_id, address, 2)?.map(|data| read_u16_le(&data)))
	}

	/// Read a 32 bit register from one device.
	pub fn read_u32(&mut self, motor_id: u8, address: u16) -> Result<Response<u32>, TransferError<T::Error>> {
		Ok(self.read(motor_id, address, 4)?.map(|data| read_u32_le(&data)))
	}
}
