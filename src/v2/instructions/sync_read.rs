use super::instruction_id;
use crate::v2::bus::message_transfer_time;
use crate::v2::client::{Client, BROADCAST_ID, RESPONSE_LATENCY_MARGIN};
use crate::v2::endian::write_u16_le;
use crate::{GatherResult, Response, SerialPort, WriteError};

impl<T: SerialPort> Client<T> {
	/// Read the same address range from several devices with a single instruction.
	///
	/// Devices answer one at a time, in the order `motor_ids` lists them.
	pub fn sync_read(&mut self, motor_ids: &[u8], address: u16, count: u16) -> Result<GatherResult<Vec<u8>>, WriteError<T::Error>> {
		let request_len = 8 + 4 + motor_ids.len() + 2;
		self.write_only(BROADCAST_ID, instruction_id::SYNC_READ, 4 + motor_ids.len(), |buffer| {
			write_u16_le(&mut buffer[0..2], address);
			write_u16_le(&mut buffer[2..4], count);
			buffer[4..].copy_from_slice(motor_ids);
		})?;

		let response_message_len = 9 + count as usize + 2;
		let timeout = message_transfer_time(request_len as u32, self.baud_rate()) + message_transfer_time(response_message_len as u32, self.baud_rate()) + RESPONSE_LATENCY_MARGIN;

		let mut responses = Vec::with_capacity(motor_ids.len());
		let mut terminal = Response::Ok { id: 0, data: () };
		for _ in 0..motor_ids.len() {
			match self.read_gather_reply(timeout, |parameters, error| if error == 0 && parameters.len() != count as usize { None } else { Some(parameters.to_vec()) }) {
				Ok(response @ (Response::Ok { .. } | Response::DeviceError { .. })) => responses.push(response),
				Ok(other) => {
					terminal = other;
					break;
				}
				Err(_) => {
					terminal = Response::Corrupted;
					break;
				}
			}
		}

		Ok(GatherResult { responses, terminal })
	}
}
