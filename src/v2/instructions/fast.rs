//! Shared inner-framing parser for `FAST_SYNC_READ` and `FAST_BULK_READ`.
//!
//! Both instructions pack every device's answer into the parameters of a
//! single status message instead of one status message per device. The
//! first device's entry is bare `id || value`; every later entry is
//! prefixed with a four-byte footer, `crc_lo crc_hi error id`, carried over
//! from the previous entry before its own `value`. The CRC bytes duplicate
//! information already covered by the enclosing message's own CRC-16 and
//! are not independently verified here.

use crate::Response;

/// Parse the concatenated per-device entries out of a fast-read reply.
///
/// `lengths[i]` is the number of value bytes expected from the `i`-th
/// device in request order. Returns the responses successfully decoded (in
/// request order) together with a terminal `Response<()>` explaining why
/// decoding stopped.
pub(super) fn parse_nested(parameters: &[u8], lengths: &[usize]) -> (Vec<Response<Vec<u8>>>, Response<()>) {
	let mut responses = Vec::with_capacity(lengths.len());
	let mut pos = 0;

	for (i, &len) in lengths.iter().enumerate() {
		let error;
		let id;

		if i == 0 {
			if pos + 1 > parameters.len() {
				return (responses, Response::Corrupted);
			}
			id = parameters[pos];
			error = 0u8;
			pos += 1;
		} else {
			if pos + 4 > parameters.len() {
				return (responses, Response::Corrupted);
			}
			error = parameters[pos + 2];
			id = parameters[pos + 3];
			pos += 4;
		}

		if pos + len > parameters.len() {
			return (responses, Response::Corrupted);
		}
		let value = parameters[pos..pos + len].to_vec();
		pos += len;

		if error & 0x80 != 0 {
			return (responses, Response::HardwareAlert { id });
		}
		if error & 0x07 != 0 {
			responses.push(Response::DeviceError { id, error, raw: value });
			return (responses, Response::DeviceError { id, error, raw: () });
		}

		responses.push(Response::Ok { id, data: value });
	}

	(responses, Response::Ok { id: 0, data: () })
}
