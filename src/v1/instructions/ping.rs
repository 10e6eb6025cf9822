use super::instruction_id;
use crate::v1::client::Client;
use crate::{Response, SerialPort, TransferError};

impl<T: SerialPort> Client<T> {
	/// Ping a single device by ID.
	///
	/// A Protocol 1 PING reply carries no parameters; use [`Client::read_u16`]
	/// against the model-number register to identify the device.
	pub fn ping(&mut self, motor_id: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.transfer_single(motor_id, instruction_id::PING, 0, 6, 0, |_| {}, |parameters, _error| if parameters.is_empty() { Some(()) } else { None })
	}
}
