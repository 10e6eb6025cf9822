use super::instruction_id;
use crate::v2::client::Client;
use crate::{Response, SerialPort, TransferError};

impl<T: SerialPort> Client<T> {
	/// Apply the control-table writes staged by [`Client::reg_write_bytes`] on one device.
	pub fn action(&mut self, motor_id: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.transfer_single(motor_id, instruction_id::ACTION, 0, 8 + 2, 0, |_| {}, |parameters, _error| if parameters.is_empty() { Some(()) } else { None })
	}

	/// Apply staged control-table writes on every device.
	///
	/// No device replies to a broadcast action.
	pub fn broadcast_action(&mut self) -> Result<(), crate::WriteError<T::Error>> {
		self.write_only(crate::v2::client::BROADCAST_ID, instruction_id::ACTION, 0, |_| {})
	}
}
