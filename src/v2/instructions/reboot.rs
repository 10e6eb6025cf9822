use super::instruction_id;
use crate::v2::client::{Client, BROADCAST_ID};
use crate::{Response, SerialPort, TransferError};

impl<T: SerialPort> Client<T> {
	/// Reboot one device.
	pub fn reboot(&mut self, motor_id: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.transfer_single(motor_id, instruction_id::REBOOT, 0, 8 + 2, 0, |_| {}, |parameters, _error| if parameters.is_empty() { Some(()) } else { None })
	}

	/// Reboot every device on the bus.
	///
	/// No device replies to a broadcast reboot.
	pub fn broadcast_reboot(&mut self) -> Result<(), crate::WriteError<T::Error>> {
		self.write_only(BROADCAST_ID, instruction_id::REBOOT, 0, |_| {})
	}
}
