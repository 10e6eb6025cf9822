use std::time::Duration;

use super::instruction_id;
use crate::v2::bus::message_transfer_time;
use crate::v2::client::{Client, BROADCAST_ID, RESPONSE_LATENCY_MARGIN};
use crate::v2::endian::read_u16_le;
use crate::{GatherResult, Response, SerialPort, TransferError, WriteError};

/// The payload of a successful PING reply.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Ping {
	/// The device's model number.
	pub model: u16,
	/// The device's firmware version.
	pub firmware: u8,
}

fn decode_ping(parameters: &[u8], _error: u8) -> Option<Ping> {
	if parameters.len() != 3 {
		return None;
	}
	Some(Ping {
		model: read_u16_le(&parameters[0..2]),
		firmware: parameters[2],
	})
}

impl<T: SerialPort> Client<T> {
	/// Ping a single device by ID.
	///
	/// Do not pass the broadcast ID here; use [`Client::broadcast_ping`] to scan the whole bus.
	pub fn ping(&mut self, motor_id: u8) -> Result<Response<Ping>, TransferError<T::Error>> {
		self.transfer_single(motor_id, instruction_id::PING, 0, 8 + 2, 3, |_| {}, decode_ping)
	}

	/// Ping every device on the bus.
	///
	/// Up to 253 devices may answer; the gather ends once that many replies
	/// arrived, a full inter-reply timeout elapses with no further reply, or
	/// a reply is corrupted.
	pub fn broadcast_ping(&mut self) -> Result<GatherResult<Ping>, WriteError<T::Error>> {
		self.write_only(BROADCAST_ID, instruction_id::PING, 0, |_| {})?;

		let response_time = message_transfer_time(14, self.baud_rate());
		let timeout = response_time * 253 + RESPONSE_LATENCY_MARGIN;

		let mut responses = Vec::new();
		let terminal = loop {
			match self.read_gather_reply(timeout, decode_ping) {
				// Running out of fresh replies is how a discovery scan is
				// expected to end; it is not a failure.
				Ok(Response::Timeout) => break Response::Ok { id: BROADCAST_ID, data: () },
				Ok(response @ (Response::Ok { .. } | Response::DeviceError { .. })) => {
					responses.push(response);
					if responses.len() >= 253 {
						break Response::Ok { id: BROADCAST_ID, data: () };
					}
				}
				Ok(other) => break other.map(|_| ()),
				Err(_) => break Response::Corrupted,
			}
		};

		Ok(GatherResult { responses, terminal })
	}
}
