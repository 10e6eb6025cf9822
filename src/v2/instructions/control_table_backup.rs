use super::instruction_id;
use crate::v2::client::Client;
use crate::{Response, SerialPort, TransferError};

/// Parameters for `CONTROL_TABLE_BACKUP`'s "store" mode, as fixed by the protocol.
const BACKUP_STORE_PARAMS: [u8; 5] = [0x01, 0x43, 0x54, 0x52, 0x4C];

/// Parameters for `CONTROL_TABLE_BACKUP`'s "restore" mode, as fixed by the protocol.
const BACKUP_RESTORE_PARAMS: [u8; 5] = [0x02, 0x43, 0x54, 0x52, 0x4C];

impl<T: SerialPort> Client<T> {
	/// Back up one device's entire control table into its backup area.
	///
	/// The device reboots as part of this operation and will not reply;
	/// callers should wait before issuing further instructions.
	pub fn control_table_backup(&mut self, motor_id: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.transfer_single(
			motor_id,
			instruction_id::CONTROL_TABLE_BACKUP,
			BACKUP_STORE_PARAMS.len(),
			8 + BACKUP_STORE_PARAMS.len() + 2,
			0,
			|buffer| buffer.copy_from_slice(&BACKUP_STORE_PARAMS),
			|parameters, _error| if parameters.is_empty() { Some(()) } else { None },
		)
	}

	/// Restore one device's control table from its backup area.
	///
	/// The device reboots as part of this operation and will not reply.
	pub fn control_table_restore(&mut self, motor_id: u8) -> Result<Response<()>, TransferError<T::Error>> {
		self.transfer_single(
			motor_id,
			instruction_id::CONTROL_TABLE_BACKUP,
			BACKUP_RESTORE_PARAMS.len(),
			8 + BACKUP_RESTORE_PARAMS.len() + 2,
			0,
			|buffer| buffer.copy_from_slice(&BACKUP_RESTORE_PARAMS),
			|parameters, _error| if parameters.is_empty() { Some(()) } else { None },
		)
	}
}
