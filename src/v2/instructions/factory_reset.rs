use super::instruction_id;
use crate::v2::client::{Client, BROADCAST_ID};
use crate::{Response, SerialPort, TransferError};

/// What a [`Client::factory_reset`] should leave untouched.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FactoryResetKind {
	/// Reset everything, including the device ID and baud rate.
	ResetAll,
	/// Reset everything except the device ID.
	KeepId,
	/// Reset everything except the device ID and baud rate.
	KeepIdAndBaudRate,
}

impl FactoryResetKind {
	fn param(self) -> u8 {
		match self {
			Self::ResetAll => 0xFF,
			Self::KeepId => 0x01,
			Self::KeepIdAndBaudRate => 0x02,
		}
	}
}

impl<T: SerialPort> Client<T> {
	/// Reset one device's control table to factory defaults.
	pub fn factory_reset(&mut self, motor_id: u8, kind: FactoryResetKind) -> Result<Response<()>, TransferError<T::Error>> {
		self.transfer_single(
			motor_id,
			instruction_id::FACTORY_RESET,
			1,
			8 + 1 + 2,
			0,
			|buffer| buffer[0] = kind.param(),
			|parameters, _error| if parameters.is_empty() { Some(()) } else { None },
		)
	}

	/// Reset every device on the bus to factory defaults.
	///
	/// No device replies to a broadcast factory reset.
	pub fn broadcast_factory_reset(&mut self, kind: FactoryResetKind) -> Result<(), crate::WriteError<T::Error>> {
		self.write_only(BROADCAST_ID, instruction_id::FACTORY_RESET, 1, |buffer| buffer[0] = kind.param())
	}
}
