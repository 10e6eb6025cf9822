use super::instruction_id;
use crate::v2::bus::message_transfer_time;
use crate::v2::client::{Client, BROADCAST_ID, RESPONSE_LATENCY_MARGIN};
use crate::v2::endian::write_u16_le;
use crate::{GatherResult, Response, SerialPort, WriteError};

/// One device's share of a [`Client::bulk_read`] request: its ID, the control-table
/// address to read from, and how many bytes to read.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BulkReadEntry {
	/// The device to read from.
	pub motor_id: u8,
	/// The starting control-table address.
	pub address: u16,
	/// The number of bytes to read.
	pub count: u16,
}

impl<T: SerialPort> Client<T> {
	/// Read a different address range from each of several devices with a single instruction.
	///
	/// Devices answer one at a time, in the order `entries` lists them.
	pub fn bulk_read(&mut self, entries: &[BulkReadEntry]) -> Result<GatherResult<Vec<u8>>, WriteError<T::Error>> {
		let parameter_count = entries.len() * 5;
		let request_len = 8 + parameter_count + 2;

		self.write_only(BROADCAST_ID, instruction_id::BULK_READ, parameter_count, |buffer| {
			for (i, entry) in entries.iter().enumerate() {
				let slot = &mut buffer[i * 5..][..5];
				slot[0] = entry.motor_id;
				write_u16_le(&mut slot[1..3], entry.address);
				write_u16_le(&mut slot[3..5], entry.count);
			}
		})?;

		let total_response_len: usize = entries.iter().map(|e| 9 + e.count as usize + 2).sum();
		let timeout = message_transfer_time(request_len as u32, self.baud_rate()) + message_transfer_time(total_response_len as u32, self.baud_rate()) + RESPONSE_LATENCY_MARGIN;

		let mut responses = Vec::with_capacity(entries.len());
		let mut terminal = Response::Ok { id: 0, data: () };
		for entry in entries {
			let count = entry.count as usize;
			match self.read_gather_reply(timeout, move |parameters, error| if error == 0 && parameters.len() != count { None } else { Some(parameters.to_vec()) }) {
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
