//! Protocol 2 message framing constants and the status-packet view.

/// The four-byte sequence that starts every Protocol 2 message.
pub const HEADER_PREFIX: [u8; 4] = [0xFF, 0xFF, 0xFD, 0x00];

/// Bytes from the start of the message up to and including the instruction ID.
pub const INSTRUCTION_HEADER_SIZE: usize = 8;

/// Bytes from the start of the message up to and including the error byte.
pub const STATUS_HEADER_SIZE: usize = 9;

/// A borrowed view of an unstuffed status message.
///
/// `data` spans the header prefix through the parameters; the trailing CRC is
/// not included; stuffing has already been removed by the time a
/// `StatusPacket` is constructed.
#[derive(Debug, Copy, Clone)]
pub struct StatusPacket<'a> {
	pub(crate) data: &'a [u8],
}

impl<'a> StatusPacket<'a> {
	/// The ID of the device that sent this status message.
	pub fn packet_id(&self) -> u8 {
		self.data[4]
	}

	/// The instruction ID; always [`crate::v2::instructions::instruction_id::STATUS`] for a valid message.
	pub fn instruction_id(&self) -> u8 {
		self.data[7]
	}

	/// The raw error byte.
	pub fn error(&self) -> u8 {
		self.data[8]
	}

	/// The lower seven bits of the error byte.
	pub fn error_number(&self) -> u8 {
		self.error() & !0x80
	}

	/// The hardware-alert bit (bit 7) of the error byte.
	pub fn alert(&self) -> bool {
		self.error() & 0x80 != 0
	}

	/// The parameters carried by this status message.
	pub fn parameters(&self) -> &'a [u8] {
		&self.data[STATUS_HEADER_SIZE..]
	}
}
