use super::fast::parse_nested;
use super::instruction_id;
use super::BulkReadEntry;
use crate::v2::bus::message_transfer_time;
use crate::v2::client::{Client, BROADCAST_ID, RESPONSE_LATENCY_MARGIN};
use crate::v2::endian::write_u16_le;
use crate::{GatherResult, Response, SerialPort, WriteError};

impl<T: SerialPort> Client<T> {
	/// Like [`Client::bulk_read`], but every device's answer is packed into a single status
	/// message instead of one per device.
	pub fn fast_bulk_read(&mut self, entries: &[BulkReadEntry]) -> Result<GatherResult<Vec<u8>>, WriteError<T::Error>> {
		let parameter_count = entries.len() * 5;
		let request_len = 8 + parameter_count + 2;

		self.write_only(BROADCAST_ID, instruction_id::FAST_BULK_READ, parameter_count, |buffer| {
			for (i, entry) in entries.iter().enumerate() {
				let slot = &mut buffer[i * 5..][..5];
				slot[0] = entry.motor_id;
				write_u16_le(&mut slot[1..3], entry.address);
				write_u16_le(&mut slot[3..5], entry.count);
			}
		})?;

		let response_param_len: usize = entries.iter().enumerate().map(|(i, e)| if i == 0 { 1 + e.count as usize } else { 4 + e.count as usize }).sum();
		let response_message_len = 9 + response_param_len + 2;
		let timeout = message_transfer_time(request_len as u32, self.baud_rate()) + message_transfer_time(response_message_len as u32, self.baud_rate()) + RESPONSE_LATENCY_MARGIN;

		let lengths: Vec<usize> = entries.iter().map(|e| e.count as usize).collect();
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
