use super::instruction_id;
use crate::v1::client::{Client, BROADCAST_ID};
use crate::{SerialPort, WriteError};

impl<T: SerialPort> Client<T> {
	/// Write the same address range on several devices with a single instruction.
	///
	/// `data` pairs each device ID with the bytes to write at `address`; every
	/// entry must be the same length. No device replies to a sync write.
	pub fn sync_write(&mut self, address: u8, data: &[(u8, &[u8])]) -> Result<(), WriteError<T::Error>> {
		let Some((_, first)) = data.first() else {
			return Ok(());
		};
		let value_len = first.len();
		let entry_len = 1 + value_len;
		let parameter_count = 2 + data.len() * entry_len;

		self.write_only(BROADCAST_ID, instruction_id::SYNC_WRITE, parameter_count, |buffer| {
			buffer[0] = address;
			buffer[1] = value_len as u8;
			for (i, (id, value)) in data.iter().enumerate() {
				debug_assert_eq!(value.len(), value_len, "all sync_write entries must carry the same number of bytes");
				let entry = &mut buffer[2 + i * entry_len..][..entry_len];
				entry[0] = *id;
				entry[1..].copy_from_slice(value);
			}
		})
	}
}
