//! Error types shared by the Protocol 1 and Protocol 2 drivers.

use core::fmt;

/// The header prefix of a received message did not match the expected bytes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidHeaderPrefix {
	/// The bytes that were actually received.
	pub actual: Vec<u8>,
	/// The bytes that were expected.
	pub expected: Vec<u8>,
}

/// A received message failed checksum (Protocol 1) or CRC (Protocol 2) validation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidChecksum {
	/// The checksum or CRC as transmitted in the message.
	pub message: u16,
	/// The checksum or CRC computed over the received bytes.
	pub computed: u16,
}

/// A status response carried an unexpected packet ID.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidPacketId {
	/// The packet ID that was actually received.
	pub actual: u8,
	/// The packet ID that was expected.
	pub expected: u8,
}

/// A status response carried an unexpected instruction ID.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidInstruction {
	/// The instruction ID that was actually received.
	pub actual: u8,
	/// The instruction ID that was expected.
	pub expected: u8,
}

/// A message carried a different number of parameters than expected.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidParameterCount {
	/// The number of parameters that were actually present.
	pub actual: usize,
	/// The number of parameters that were expected.
	pub expected: usize,
}

/// A buffer was too small to hold the requested message.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BufferTooSmallError {
	/// The number of bytes required.
	pub required: usize,
	/// The number of bytes available in the buffer.
	pub available: usize,
}

impl InvalidHeaderPrefix {
	pub(crate) fn check(actual: &[u8], expected: &[u8]) -> Result<(), Self> {
		if actual == expected {
			Ok(())
		} else {
			Err(Self {
				actual: actual.to_vec(),
				expected: expected.to_vec(),
			})
		}
	}
}

impl InvalidChecksum {
	pub(crate) fn check(message: u16, computed: u16) -> Result<(), Self> {
		if message == computed {
			Ok(())
		} else {
			Err(Self { message, computed })
		}
	}
}

impl InvalidPacketId {
	pub(crate) fn check(actual: u8, expected: u8) -> Result<(), Self> {
		if actual == expected {
			Ok(())
		} else {
			Err(Self { actual, expected })
		}
	}
}

impl InvalidInstruction {
	pub(crate) fn check(actual: u8, expected: u8) -> Result<(), Self> {
		if actual == expected {
			Ok(())
		} else {
			Err(Self { actual, expected })
		}
	}
}

impl InvalidParameterCount {
	pub(crate) fn check(actual: usize, expected: usize) -> Result<(), Self> {
		if actual == expected {
			Ok(())
		} else {
			Err(Self { actual, expected })
		}
	}

	pub(crate) fn check_min(actual: usize, minimum: usize) -> Result<(), Self> {
		if actual >= minimum {
			Ok(())
		} else {
			Err(Self { actual, expected: minimum })
		}
	}
}

impl BufferTooSmallError {
	pub(crate) fn check(required: usize, available: usize) -> Result<(), Self> {
		if required <= available {
			Ok(())
		} else {
			Err(Self { required, available })
		}
	}
}

/// A low-level framing or validation failure while decoding a status message.
///
/// These are the reasons a received packet is rejected *after* a full frame
/// was read from the wire. They do not cover the case where too few bytes
/// arrived before the deadline; that is a timeout, not an `InvalidMessage`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InvalidMessage {
	/// See [`InvalidHeaderPrefix`].
	InvalidHeaderPrefix(InvalidHeaderPrefix),
	/// See [`InvalidChecksum`].
	InvalidChecksum(InvalidChecksum),
	/// See [`InvalidPacketId`].
	InvalidPacketId(InvalidPacketId),
	/// See [`InvalidInstruction`].
	InvalidInstruction(InvalidInstruction),
	/// See [`InvalidParameterCount`].
	InvalidParameterCount(InvalidParameterCount),
}

/// The error reported when a device sets the hardware-alert bit of its error byte.
///
/// Fatal for the current transaction, but leaves the bus usable for the next one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HardwareAlert {
	/// The ID of the device that raised the alert.
	pub id: u8,
}

/// An error that occurred while reading a status message from the bus.
#[derive(Debug)]
pub enum ReadError<E> {
	/// An I/O error occurred on the underlying serial port.
	Io(E),
	/// No valid message arrived before the deadline.
	Timeout,
	/// The received message failed validation.
	InvalidMessage(InvalidMessage),
	/// A device reported a hardware alert (Protocol 2 only).
	HardwareAlert(HardwareAlert),
	/// The configured read buffer was too small for the incoming message.
	BufferTooSmall(BufferTooSmallError),
}

/// An error that occurred while writing an instruction message to the bus.
#[derive(Debug)]
pub enum WriteError<E> {
	/// An I/O error occurred on the underlying serial port.
	Io(E),
	/// An error occurred discarding the stale contents of the read buffer.
	DiscardBuffer(E),
	/// The configured write buffer was too small for the message.
	BufferTooSmall(BufferTooSmallError),
}

/// An error that occurred during a full write-then-read transaction.
#[derive(Debug)]
pub enum TransferError<E> {
	/// See [`WriteError`].
	Write(WriteError<E>),
	/// See [`ReadError`].
	Read(ReadError<E>),
}

impl<E> From<BufferTooSmallError> for WriteError<E> {
	fn from(other: BufferTooSmallError) -> Self {
		Self::BufferTooSmall(other)
	}
}

impl<E> From<BufferTooSmallError> for ReadError<E> {
	fn from(other: BufferTooSmallError) -> Self {
		Self::BufferTooSmall(other)
	}
}

impl<E> From<InvalidMessage> for ReadError<E> {
	fn from(other: InvalidMessage) -> Self {
		Self::InvalidMessage(other)
	}
}

impl<E> From<HardwareAlert> for ReadError<E> {
	fn from(other: HardwareAlert) -> Self {
		Self::HardwareAlert(other)
	}
}

macro_rules! impl_invalid_message_from {
	($variant:ident, $inner:ty) => {
		impl From<$inner> for InvalidMessage {
			fn from(other: $inner) -> Self {
				Self::$variant(other)
			}
		}

		impl<E> From<$inner> for ReadError<E> {
			fn from(other: $inner) -> Self {
				Self::InvalidMessage(other.into())
			}
		}
	};
}

impl_invalid_message_from!(InvalidHeaderPrefix, InvalidHeaderPrefix);
impl_invalid_message_from!(InvalidChecksum, InvalidChecksum);
impl_invalid_message_from!(InvalidPacketId, InvalidPacketId);
impl_invalid_message_from!(InvalidInstruction, InvalidInstruction);
impl_invalid_message_from!(InvalidParameterCount, InvalidParameterCount);

impl<E> From<WriteError<E>> for TransferError<E> {
	fn from(other: WriteError<E>) -> Self {
		Self::Write(other)
	}
}

impl<E> From<ReadError<E>> for TransferError<E> {
	fn from(other: ReadError<E>) -> Self {
		Self::Read(other)
	}
}

impl fmt::Display for InvalidHeaderPrefix {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "invalid header prefix, expected {:02X?}, got {:02X?}", self.expected, self.actual)
	}
}

impl fmt::Display for InvalidChecksum {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "invalid checksum/CRC, message claims {:#06X}, computed {:#06X}", self.message, self.computed)
	}
}

impl fmt::Display for InvalidPacketId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "invalid packet ID, expected {:#04X}, got {:#04X}", self.expected, self.actual)
	}
}

impl fmt::Display for InvalidInstruction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "invalid instruction ID, expected {:#04X}, got {:#04X}", self.expected, self.actual)
	}
}

impl fmt::Display for InvalidParameterCount {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "invalid parameter count, expected {}, got {}", self.expected, self.actual)
	}
}

impl fmt::Display for BufferTooSmallError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "buffer too small, need {} bytes but only {} are available", self.required, self.available)
	}
}

impl fmt::Display for HardwareAlert {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "device {} raised a hardware alert", self.id)
	}
}

impl fmt::Display for InvalidMessage {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::InvalidHeaderPrefix(e) => write!(f, "{e}"),
			Self::InvalidChecksum(e) => write!(f, "{e}"),
			Self::InvalidPacketId(e) => write!(f, "{e}"),
			Self::InvalidInstruction(e) => write!(f, "{e}"),
			Self::InvalidParameterCount(e) => write!(f, "{e}"),
		}
	}
}

impl<E: fmt::Display> fmt::Display for ReadError<E> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io(e) => write!(f, "{e}"),
			Self::Timeout => write!(f, "timed out waiting for a response"),
			Self::InvalidMessage(e) => write!(f, "{e}"),
			Self::HardwareAlert(e) => write!(f, "{e}"),
			Self::BufferTooSmall(e) => write!(f, "{e}"),
		}
	}
}

impl<E: fmt::Display> fmt::Display for WriteError<E> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io(e) => write!(f, "{e}"),
			Self::DiscardBuffer(e) => write!(f, "failed to discard input buffer: {e}"),
			Self::BufferTooSmall(e) => write!(f, "{e}"),
		}
	}
}

impl<E: fmt::Display> fmt::Display for TransferError<E> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Write(e) => write!(f, "{e}"),
			Self::Read(e) => write!(f, "{e}"),
		}
	}
}

impl std::error::Error for InvalidHeaderPrefix {}
impl std::error::Error for InvalidChecksum {}
impl std::error::Error for InvalidPacketId {}
impl std::error::Error for InvalidInstruction {}
impl std::error::Error for InvalidParameterCount {}
impl std::error::Error for BufferTooSmallError {}
impl std::error::Error for HardwareAlert {}
impl std::error::Error for InvalidMessage {}
impl<E: fmt::Debug + fmt::Display> std::error::Error for ReadError<E> {}
impl<E: fmt::Debug + fmt::Display> std::error::Error for WriteError<E> {}
impl<E: fmt::Debug + fmt::Display> std::error::Error for TransferError<E> {}
