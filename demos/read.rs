//! Reads a motor's present position once and prints it.

use dynamixel_bus::v2::Client;
use dynamixel_bus::Response;

const PRESENT_POSITION: u16 = 132;

fn main() {
	let serial_port = serial2::SerialPort::open("/dev/ttyUSB0", 57600)
		.map_err(|e| eprintln!("failed to open serial port: {e}"))
		.unwrap();
	let mut client = Client::new(serial_port).unwrap();

	match client.read_u32(37, PRESENT_POSITION).unwrap() {
		Response::Ok { data, .. } => println!("present position: {data}"),
		Response::DeviceError { error, raw, .. } => println!("motor reported error {error:#04X}, raw value {raw}"),
		other => println!("no clean reply: {other:?}"),
	}
}
