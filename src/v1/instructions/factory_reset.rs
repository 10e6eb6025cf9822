use super::instruction_id;
use crate::v1::client::{Client, BROADCAST_ID};
use crate::{Response, SerialPort, TransferError};

impl<T: SerialPort> Client<T> {
	/// Reset one device's control table to factory defaults.
	///
	/// Protocol 1 has no partial-reset modes: the broadcast ID is the only
	/// argument the original firmware rejects for this instruction.
	pub fn factory_reset(&mut self, motor_id: u8) -> Result<Response<()>, TransferError<T::Error>> {
		debug_assert!(motor_id != BROADCAST_ID, "factory_reset must target a single device; use broadcast_factory_reset");
		self.transfer_single(motor_id, instruction_id::FACTORY_RESET, 0, 6, 0, |_| {}, |parameters, _error| if parameters.is_empty() { Some(()) } else { None })
	}

	/// Reset every device on the bus to factory defaults.
	///
	/// No device replies to a broadcast factory reset.
	pub fn broadcast_factory_reset(&mut self) -> Result<(), crate::WriteError<T::Error>> {
		self.write_only(BROADCAST_ID, instruction_id::FACTORY_RESET, 0, |_| {})
	}
}
