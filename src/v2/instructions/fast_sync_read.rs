use super::fast::parse_nested;
use super::instruction_id;
use crate::v2::bus::message_transfer_time;
use crate::v2::client::{Client, BROADCAST_ID, RESPONSE_LATENCY_MARGIN};
use crate::v2::endian::write_u16_le;
use crate::{GatherResult, Response, SerialPort, WriteError};

impl<T: SerialPort> Client<T> {
	/// Like [`Client::sync_read`], but every device's answer is packed into a single status
	/// message instead of one per device, trading per-device timeout isolation for fewer
	/// round trips.
	pub fn fast_sync_read(&mut self, motor_ids: &[u8], address: u16, count: u16) -> Result<GatherResult<Vec<u8>>, WriteError<T::Error>> {
		let parameter_count = 4 + motor_ids.len();
		let request_len = 8 + parameter_count + 2;

		self.write_only(BROADCAST_ID, instruction_id::FAST_SYNC_READ, parameter_count, |buffer| {
			write_u16_le(&mut buffer[0..2], address);
			write_u16_le(&mut buffer[2..4], count);
			buffer[4..].copy_from_slice(motor_ids);
		})?;

		let response_param_len = 1 + motor_ids.len().saturating_sub(1) * 4 + motor_ids.len() * count as usize;
		let response_message_len = 9 + response_param_len + 2;
		let timeout = message_transfer_time(request_len as u32, self.baud_rate()) + message_transfer_time(response_message_len as u32, self.baud_rate()) + RESPONSE_LATENCY_MARGIN;

		let lengths = vec![count as usize; motor_ids.len()];
		match self.read_gather_reply(timeout, move |parameters, _error| Some(parse_nested(parameters, &lengths))) {
			Ok(Response::Ok { data: (responses, terminal), .. }) => Ok(GatherResult { responses, terminal }),
			Ok(Response::Timeout) => Ok(GatherResult {
				responses: Vec::new(),
				terminal: Response::Timeout,
			}),
			Ok(Response::HardwareAlert { id }) => Ok(GatherResult {
				responses: Vec::new(),
				terminal: Response::HardwareAlert { id },
			}),
			Ok(_) => Ok(GatherResult {
				responses: Vec::new(),
				terminal: Response::Corrupted,
			}),
			Err(_) => Ok(GatherResult {
				responses: Vec::new(),
				terminal: Response::Corrupted,
			}),
		}
	}
}
