use super::instruction_id;
use crate::v2::client::{Client, BROADCAST_ID};
use crate::v2::endian::write_u16_le;
use crate::{SerialPort, WriteError};

/// One device's share of a [`Client::bulk_write`] request: its ID, the control-table
/// address to write to, and the bytes to write there.
pub struct BulkWriteEntry<'a> {
	/// The device to write to.
	pub motor_id: u8,
	/// The starting control-table address.
	pub address: u16,
	/// The bytes to write, starting at `address`.
	pub data: &'a [u8],
}

impl<T: SerialPort> Client<T> {
	/// Write a different address range to each of several devices with a single instruction.
	///
	/// Unlike `sync_write`, each device's payload may be a different length.
	/// No device replies to a bulk write.
	pub fn bulk_write(&mut self, entries: &[BulkWriteEntry<'_>]) -> Result<(), WriteError<T::Error>> {
		let parameter_count: usize = entries.iter().map(|e| 5 + e.data.len()).sum();

		self.write_only(BROADCAST_ID, instruction_id::BULK_WRITE, parameter_count, |buffer| {
			let mut offset = 0;
			for entry in entries {
				let entry_len = 5 + entry.data.len();
				let slot = &mut buffer[offset..][..entry_len];
				slot[0] = entry.motor_id;
				write_u16_le(&mut slot[1..3], entry.address);
				write_u16_le(&mut slot[3..5], entry.data.len() as u16);
				slot[5..].copy_from_slice(entry.data);
				offset += entry_len;
			}
		})
	}
}
