//! The outcome type shared by every operation, for both protocol versions.

/// The outcome of a single-device transaction.
///
/// Unlike a plain `Result`, a bus transaction has more than one failure mode
/// worth distinguishing to a caller: the device answered but reported an
/// error, the answer arrived but failed framing/checksum validation, no
/// answer arrived in time, or (Protocol 2 only) the device raised a hardware
/// alert alongside an otherwise-valid answer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Response<T> {
	/// The device answered and the answer validated cleanly.
	Ok {
		/// The ID of the device that answered.
		id: u8,
		/// The decoded payload.
		data: T,
	},
	/// The device answered, validated cleanly, but reported a non-zero error code.
	DeviceError {
		/// The ID of the device that answered.
		id: u8,
		/// The error code the device reported.
		error: u8,
		/// The payload decoded from the response anyway, where one is defined.
		raw: T,
	},
	/// A message arrived but failed header, checksum, or parameter-count validation.
	Corrupted,
	/// No valid message arrived before the deadline.
	Timeout,
	/// The device answered with the hardware-alert bit set (Protocol 2 only).
	HardwareAlert {
		/// The ID of the device that raised the alert.
		id: u8,
	},
}

impl<T> Response<T> {
	/// True if this response carries a clean, error-free answer.
	pub fn is_ok(&self) -> bool {
		matches!(self, Self::Ok { .. })
	}

	/// The decoded data, if this response is [`Response::Ok`].
	pub fn ok(self) -> Option<T> {
		match self {
			Self::Ok { data, .. } => Some(data),
			_ => None,
		}
	}

	/// The ID of the device this response concerns, if known.
	///
	/// [`Response::Corrupted`] and [`Response::Timeout`] carry no device ID:
	/// a corrupted or absent message cannot be attributed to a sender.
	pub fn id(&self) -> Option<u8> {
		match self {
			Self::Ok { id, .. } => Some(*id),
			Self::DeviceError { id, .. } => Some(*id),
			Self::Corrupted => None,
			Self::Timeout => None,
			Self::HardwareAlert { id } => Some(*id),
		}
	}

	/// Apply `f` to the payload of an [`Response::Ok`] or [`Response::DeviceError`] response.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
		match self {
			Self::Ok { id, data } => Response::Ok { id, data: f(data) },
			Self::DeviceError { id, error, raw } => Response::DeviceError { id, error, raw: f(raw) },
			Self::Corrupted => Response::Corrupted,
			Self::Timeout => Response::Timeout,
			Self::HardwareAlert { id } => Response::HardwareAlert { id },
		}
	}
}

/// The result of a broadcast or gather transaction involving more than one device.
///
/// Devices answer a broadcast instruction one at a time; any of them can time
/// out, arrive corrupted, or raise an alert without invalidating the answers
/// already collected from the others. `responses` holds one entry per device
/// that answered (in arrival order); `terminal` records why the gather ended.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GatherResult<T> {
	/// The individual per-device responses collected so far, in arrival order.
	pub responses: Vec<Response<T>>,
	/// Why the gather stopped: `Ok(())` once every expected device answered,
	/// otherwise the `Timeout`/`Corrupted`/`HardwareAlert` that ended it early.
	pub terminal: Response<()>,
}

impl<T> GatherResult<T> {
	/// True if every expected device answered and none reported an error or alert.
	pub fn is_complete(&self) -> bool {
		matches!(self.terminal, Response::Ok { .. }) && self.responses.iter().all(Response::is_ok)
	}
}
