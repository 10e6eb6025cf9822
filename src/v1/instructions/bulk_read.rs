use super::instruction_id;
use crate::v1::bus::message_transfer_time;
use crate::v1::client::{Client, BROADCAST_ID, RESPONSE_LATENCY_MARGIN};
use crate::{GatherResult, Response, SerialPort, WriteError};

/// One device's share of a [`Client::bulk_read`] request: its ID, the control-table
/// address to read from, and how many bytes to read.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BulkReadEntry {
	/// The device to read from.
	pub motor_id: u8,
	/// The starting control-table address.
	pub address: u8,
	/// The number of bytes to read.
	pub count: u8,
}

impl<T: SerialPort> Client<T> {
	/// Read a different address range from each of several devices with a single instruction.
	///
	/// Devices answer one at a time, in the order `entries` lists them. The
	/// parameter layout is `[0x00, length_0, id_0, address_0, length_1, id_1,
	/// address_1, ...]`; note the argument order within each triplet is
	/// reversed from Protocol 2's bulk read.
	pub fn bulk_read(&mut self, entries: &[BulkReadEntry]) -> Result<GatherResult<Vec<u8>>, WriteError<T::Error>> {
		let parameter_count = 1 + entries.len() * 3;
		let request_len = 6 + parameter_count;

		self.write_only(BROADCAST_ID, instruction_id::BULK_READ, parameter_count, |buffer| {
			buffer[0] = 0x00;
			for (i, entry) in entries.iter().enumerate() {
				let slot = &mut buffer[1 + i * 3..][..3];
				slot[0] = entry.count;
				slot[1] = entry.motor_id;
				slot[2] = entry.address;
			}
		})?;

		let total_response_len: usize = entries.iter().map(|e| 6 + e.count as usize).sum();
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
