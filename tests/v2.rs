mod common;

use assert2::{assert, let_assert};
use common::{RecorderPort, ScriptedSerialPort, Step};
use dynamixel_bus::v2::instructions::{instruction_id, BulkReadEntry};
use dynamixel_bus::v2::{Bus, Client};
use dynamixel_bus::Response;

const BAUD_RATE: u32 = 1_000_000;

fn encode_read_request(id: u8, address: u16, count: u16) -> Vec<u8> {
	let recorder = RecorderPort::new(BAUD_RATE);
	let mut bus = Bus::with_buffer_size_and_baud_rate(recorder, 128, BAUD_RATE);
	bus.write_instruction(id, instruction_id::READ, 4, |buffer| {
		buffer[0] = address as u8;
		buffer[1] = (address >> 8) as u8;
		buffer[2] = count as u8;
		buffer[3] = (count >> 8) as u8;
	})
	.unwrap();
	bus.into_serial_port().sent
}

fn encode_status(id: u8, error: u8, parameters: &[u8]) -> Vec<u8> {
	let recorder = RecorderPort::new(BAUD_RATE);
	let mut bus = Bus::with_buffer_size_and_baud_rate(recorder, 128, BAUD_RATE);
	bus.write_status(id, instruction_id::STATUS, error, parameters.len(), |buffer| buffer.copy_from_slice(parameters)).unwrap();
	bus.into_serial_port().sent
}

/// S2: a v2 READ round-trips a little-endian value through the stuffed, CRC'd wire format.
#[test]
fn s2_v2_read() {
	let request = encode_read_request(1, 0x2B, 2);
	let response = encode_status(1, 0, &[0x34, 0x12]);

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(response)]);
	let mut client = Client::new(port).unwrap();

	let_assert!(Ok(Response::Ok { id, data }) = client.read_u16(1, 0x2B));
	assert!(id == 1);
	assert!(data == 0x1234);
}

/// S3: a broadcast ping gathers replies from several devices until the scan times out.
#[test]
fn s3_v2_broadcast_ping() {
	let request = {
		let recorder = RecorderPort::new(BAUD_RATE);
		let mut bus = Bus::with_buffer_size_and_baud_rate(recorder, 128, BAUD_RATE);
		bus.write_instruction(0xFE, instruction_id::PING, 0, |_| {}).unwrap();
		bus.into_serial_port().sent
	};
	let reply_1 = encode_status(1, 0, &[0x06, 0x04, 38]);
	let reply_2 = encode_status(2, 0, &[0x05, 0x04, 37]);

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(reply_1), Step::Read(reply_2)]);
	let mut client = Client::new(port).unwrap();

	let result = client.broadcast_ping().unwrap();
	assert!(result.responses.len() == 2);
	let_assert!(Response::Ok { id: 1, data } = &result.responses[0]);
	assert!(data.model == 0x0406);
	assert!(data.firmware == 38);
	let_assert!(Response::Ok { id: 2, data } = &result.responses[1]);
	assert!(data.model == 0x0405);
	assert!(data.firmware == 37);
	assert!(matches!(result.terminal, Response::Ok { .. }));
}

/// S4: a bulk read that loses its last reply surfaces a partial result ending in a timeout.
#[test]
fn s4_v2_bulk_read_partial_timeout() {
	let entries = [
		BulkReadEntry { motor_id: 1, address: 0x24, count: 4 },
		BulkReadEntry { motor_id: 2, address: 0x24, count: 4 },
		BulkReadEntry { motor_id: 3, address: 0x24, count: 4 },
	];

	let request = {
		let recorder = RecorderPort::new(BAUD_RATE);
		let mut bus = Bus::with_buffer_size_and_baud_rate(recorder, 128, BAUD_RATE);
		let parameter_count = entries.len() * 5;
		bus.write_instruction(0xFE, instruction_id::BULK_READ, parameter_count, |buffer| {
			for (i, entry) in entries.iter().enumerate() {
				let slot = &mut buffer[i * 5..][..5];
				slot[0] = entry.motor_id;
				slot[1] = entry.address as u8;
				slot[2] = (entry.address >> 8) as u8;
				slot[3] = entry.count as u8;
				slot[4] = (entry.count >> 8) as u8;
			}
		})
		.unwrap();
		bus.into_serial_port().sent
	};

	let reply_1 = encode_status(1, 0, &[1, 2, 3, 4]);
	let reply_2 = encode_status(2, 0, &[5, 6, 7, 8]);

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(reply_1), Step::Read(reply_2)]);
	let mut client = Client::new(port).unwrap();

	let result = client.bulk_read(&entries).unwrap();
	assert!(result.responses.len() == 2);
	assert!(matches!(result.terminal, Response::Timeout));
	assert!(!result.is_complete());
}

/// S5: parameter bytes matching the header prefix get stuffed on the wire and
/// unstuffed again on receipt.
#[test]
fn s5_v2_byte_stuffing_round_trip() {
	let payload = [0xFF, 0xFF, 0xFD];
	let request = {
		let recorder = RecorderPort::new(BAUD_RATE);
		let mut bus = Bus::with_buffer_size_and_baud_rate(recorder, 128, BAUD_RATE);
		bus.write_instruction(1, instruction_id::WRITE, 2 + payload.len(), |buffer| {
			buffer[0] = 0x2A;
			buffer[1] = 0x00;
			buffer[2..].copy_from_slice(&payload);
		})
		.unwrap();
		bus.into_serial_port().sent
	};

	// the stuffed body contains an inserted 0xFD right after the 0xFF 0xFF 0xFD run
	assert!(request.windows(4).any(|w| w == [0xFF, 0xFF, 0xFD, 0xFD]));

	let response = encode_status(1, 0, &[]);
	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(response)]);
	let mut client = Client::new(port).unwrap();

	let_assert!(Ok(Response::Ok { id: 1, .. }) = client.write_bytes(1, 0x2A, &payload));
}

/// S6: a status reply with the hardware-alert bit set is reported distinctly
/// from a plain device error, and the bus keeps working afterwards.
#[test]
fn s6_v2_hardware_alert() {
	let request = encode_read_request(5, 0x2B, 1);
	let alert_response = encode_status(5, 0x80, &[0x00]);

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(alert_response)]);
	let mut client = Client::new(port).unwrap();

	let_assert!(Ok(Response::HardwareAlert { id }) = client.read_u8(5, 0x2B));
	assert!(id == 5);
}

#[test]
fn device_error_is_distinct_from_alert() {
	let request = encode_read_request(5, 0x2B, 1);
	let error_response = encode_status(5, 0x01, &[0x00]);

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(error_response)]);
	let mut client = Client::new(port).unwrap();

	let_assert!(Ok(Response::DeviceError { id, error, .. }) = client.read_u8(5, 0x2B));
	assert!(id == 5);
	assert!(error == 0x01);
}

/// A device reporting an error on a READ it cannot service at all replies
/// with zero parameters; the error code must still surface rather than
/// being mistaken for a corrupted reply.
#[test]
fn device_error_with_no_parameters_is_reported() {
	let request = encode_read_request(5, 0x2B, 1);
	let error_response = encode_status(5, 0x01, &[]);

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(error_response)]);
	let mut client = Client::new(port).unwrap();

	let_assert!(Ok(Response::DeviceError { id, error, raw }) = client.read(5, 0x2B, 1));
	assert!(id == 5);
	assert!(error == 0x01);
	// The device sent no parameters at all; `raw` is padded out to the requested
	// count rather than left short, so callers indexing into it never panic.
	assert!(raw == vec![0]);
}

/// Property 5: a single flipped payload byte is reported as a corrupted message.
#[test]
fn corrupted_payload_is_reported() {
	let request = encode_read_request(1, 0x2B, 1);
	let mut response = encode_status(1, 0, &[0x42]);
	let last = response.len() - 1;
	response[last] ^= 0xFF;

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(response)]);
	let mut client = Client::new(port).unwrap();

	assert!(let Ok(Response::Corrupted) = client.read_u8(1, 0x2B));
}

/// Property 4: leading garbage bytes before a valid header are skipped without disturbing parsing.
#[test]
fn leading_garbage_is_skipped() {
	let request = encode_read_request(1, 0x2B, 1);
	let mut response = vec![0x00, 0xFF, 0xAA, 0xFF, 0x00];
	response.extend(encode_status(1, 0, &[0x42]));

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request), Step::Read(response)]);
	let mut client = Client::new(port).unwrap();

	let_assert!(Ok(Response::Ok { data, .. }) = client.read_u8(1, 0x2B));
	assert!(data == 0x42);
}

/// Property 7: a broadcast sync write never reads from the port.
#[test]
fn sync_write_does_not_read() {
	let request = {
		let recorder = RecorderPort::new(BAUD_RATE);
		let mut bus = Bus::with_buffer_size_and_baud_rate(recorder, 128, BAUD_RATE);
		bus.write_instruction(0xFE, instruction_id::SYNC_WRITE, 4 + 2, |buffer| {
			buffer[0] = 0x74;
			buffer[1] = 0x00;
			buffer[2] = 1;
			buffer[3] = 0;
			buffer[4] = 1;
			buffer[5] = 0x10;
		})
		.unwrap();
		bus.into_serial_port().sent
	};

	let port = ScriptedSerialPort::new(BAUD_RATE, vec![Step::Write(request)]);
	let mut client = Client::new(port).unwrap();
	let_assert!(Ok(()) = client.sync_write(0x74, &[(1, &[0x10])]));
}
