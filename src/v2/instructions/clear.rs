use super::instruction_id;
use crate::v2::client::Client;
use crate::{Response, SerialPort, TransferError};

/// Parameters for `CLEAR`'s "reset the multi-turn counter" mode, as fixed by the protocol.
const CLEAR_MULTI_TURN_COUNTER_PARAMS: [u8; 5] = [0x01, 0x44, 0x58, 0x4C, 0x22];

/// Parameters for `CLEAR`'s "clear the error status" mode, as fixed by the protocol.
const CLEAR_ERROR_STATUS_PARAMS: [u8; 5] = [0x02, 0x45, 0x52, 0x43, 0x4C];

impl<T: SerialPort> Client<T> {
	/// Reset one device's multi-turn revolution counter to zero.
	pub fn clear_multi_turn_counter(&mut self, motor_id: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.transfer_single(
			motor_id,
			instruction_id::CLEAR,
			CLEAR_MULTI_TURN_COUNTER_PARAMS.len(),
			8 + CLEAR_MULTI_TURN_COUNTER_PARAMS.len() + 2,
			0,
			|buffer| buffer.copy_from_slice(&CLEAR_MULTI_TURN_COUNTER_PARAMS),
			|parameters, _error| if parameters.is_empty() { Some(()) } else { None },
		)
	}

	/// Clear one device's error status register.
	pub fn clear_error_status(&mut self, motor_id: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.transfer_single(
			motor_id,
			instruction_id::CLEAR,
			CLEAR_ERROR_STATUS_PARAMS.len(),
			8 + CLEAR_ERROR_STATUS_PARAMS.len() + 2,
			0,
			|buffer| buffer.copy_from_slice(&CLEAR_ERROR_STATUS_PARAMS),
			|parameters, _error| if parameters.is_empty() { Some(()) } else { None },
		)
	}
}
