use super::instruction_id;
use crate::v1::client::Client;
use crate::v1::codec::{merge_u16_be, merge_u32_be};
use crate::{Response, SerialPort, TransferError};

impl<T: SerialPort> Client<T> {
	/// Read an arbitrary number of bytes from one device's control table.
	pub fn read(&mut self, motor_id: u8, address: u8, count: u8) -> Result<Response<Vec<u8>>, TransferError<T::Error>> {
		let request_len = 6 + 2;
		self.transfer_single(
			motor_id,
			instruction_id::READ,
			2,
			request_len,
			count as usize,
			|buffer| {
				buffer[0] = address;
				buffer[1] = count;
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
	pub fn read_u8(&mut self, motor_id: u8, address: u8) -> Result<Response<u8>, TransferError<T::Error>> {
		Ok(self.read(motor_id, address, 1)?.map(|data| data[0]))
	}

	/// Read a 16 bit register from one device.
	///
	/// The reference implementation merges a multi-byte read's bytes
	/// big-endian, unlike a write's little-endian split.
	pub fn read_u16(&mut self, motor_id: u8, address: u8) -> Result<Response<u16>, TransferError<T::Error>> {
		Ok(self.read(motor_id, address, 2)?.map(|data| merge_u16_be(&data)))
	}

	/// Read a 32 bit register from one device.
	pub fn read_u32(&mut self, motor_id: u8, address: u8) -> Result<Response<u32>, TransferError<T::Error>> {
		Ok(self.read(motor_id, address, 4)?.map(|data| merge_u32_be(&data)))
	}
}
