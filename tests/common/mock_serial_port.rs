use std::collections::VecDeque;
use std::time::Duration;

use dynamixel_bus::SerialPort;

/// One expected event in a [`ScriptedSerialPort`]'s script.
#[derive(Debug)]
pub enum Step {
	/// The next `write_all` call must be given exactly these bytes.
	Write(Vec<u8>),
	/// The next `read` calls return these bytes, as if a device had sent them.
	Read(Vec<u8>),
}

/// A fake half-duplex port driven by a fixed script of expected writes and
/// canned reads, instead of a real device on the other end of the wire.
///
/// `discard_input_buffer` only clears bytes already staged for the next
/// `read`; it never consumes upcoming `Step::Read` entries, since those model
/// bytes that have not "arrived" yet at the time of the call.
pub struct ScriptedSerialPort {
	steps: VecDeque<Step>,
	staged: VecDeque<u8>,
	baud_rate: u32,
}

impl ScriptedSerialPort {
	pub fn new(baud_rate: u32, steps: Vec<Step>) -> Self {
		Self {
			steps: steps.into(),
			staged: VecDeque::new(),
			baud_rate,
		}
	}

	/// True once every scripted step has been consumed.
	pub fn is_done(&self) -> bool {
		self.steps.is_empty()
	}
}

impl SerialPort for ScriptedSerialPort {
	type Error = std::io::Error;

	fn baud_rate(&self) -> Result<u32, Self::Error> {
		Ok(self.baud_rate)
	}

	fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
		self.baud_rate = baud_rate;
		Ok(())
	}

	fn discard_input_buffer(&mut self) -> Result<(), Self::Error> {
		self.staged.clear();
		Ok(())
	}

	fn read(&mut self, buffer: &mut [u8], _timeout: Duration) -> Result<usize, Self::Error> {
		if self.staged.is_empty() {
			if matches!(self.steps.front(), Some(Step::Read(_))) {
				let Some(Step::Read(bytes)) = self.steps.pop_front() else { unreachable!() };
				self.staged.extend(bytes);
			} else {
				return Ok(0);
			}
		}
		let n = buffer.len().min(self.staged.len());
		for slot in buffer[..n].iter_mut() {
			*slot = self.staged.pop_front().unwrap();
		}
		Ok(n)
	}

	fn write_all(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
		match self.steps.pop_front() {
			Some(Step::Write(expected)) => {
				assert_eq!(buffer, expected.as_slice(), "unexpected bytes written to the port");
				Ok(())
			},
			other => panic!("expected no more writes, got {:?} with buffer {:02X?}", other, buffer),
		}
	}

	fn is_timeout_error(error: &Self::Error) -> bool {
		error.kind() == std::io::ErrorKind::TimedOut
	}
}

/// A port that only records what is written to it; used to build well-formed
/// status messages for test fixtures without hand-computing a checksum or CRC.
#[derive(Default)]
pub struct RecorderPort {
	pub sent: Vec<u8>,
	baud_rate: u32,
}

impl RecorderPort {
	pub fn new(baud_rate: u32) -> Self {
		Self { sent: Vec::new(), baud_rate }
	}
}

impl SerialPort for RecorderPort {
	type Error = std::io::Error;

	fn baud_rate(&self) -> Result<u32, Self::Error> {
		Ok(self.baud_rate)
	}

	fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
		self.baud_rate = baud_rate;
		Ok(())
	}

	fn discard_input_buffer(&mut self) -> Result<(), Self::Error> {
		Ok(())
	}

	fn read(&mut self, _buffer: &mut [u8], _timeout: Duration) -> Result<usize, Self::Error> {
		Ok(0)
	}

	fn write_all(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
		self.sent.extend_from_slice(buffer);
		Ok(())
	}

	fn is_timeout_error(error: &Self::Error) -> bool {
		error.kind() == std::io::ErrorKind::TimedOut
	}
}
