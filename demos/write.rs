//! Writes an arbitrary byte string to a motor's control table.
//!
//! Usage: write TTY BAUD-RATE MOTOR-ID ADDRESS DATA...

use dynamixel_bus::v2::Client;

fn main() {
	if do_main().is_err() {
		std::process::exit(1);
	}
}

fn print_usage() {
	eprintln!("usage: write TTY BAUD-RATE MOTOR-ID ADDRESS DATA...");
}

fn do_main() -> Result<(), ()> {
	let mut args = std::env::args();
	let _ = args.next().unwrap();

	#[cfg(feature = "log")]
	env_logger::from_env("RUST_LOG").filter_level(log::LevelFilter::Trace).init();

	let tty = args.next().ok_or_else(print_usage)?;
	let baud_rate = args.next().ok_or_else(print_usage)?;
	let motor_id = args.next().ok_or_else(print_usage)?;
	let address = args.next().ok_or_else(print_usage)?;
	let data: Vec<_> = args.collect();

	let baud_rate: u32 = baud_rate.parse().map_err(|_| eprintln!("invalid baud rate: {baud_rate}"))?;
	let motor_id: u8 = motor_id.parse().map_err(|_| eprintln!("invalid motor ID: {motor_id}"))?;
	let address: u16 = address.parse().map_err(|_| eprintln!("invalid register address: {address}"))?;
	let data: Vec<u8> = data.into_iter().map(|x| x.parse().map_err(|_| eprintln!("invalid data value: {x}"))).collect::<Result<_, _>>()?;

	let serial_port = serial2::SerialPort::open(&tty, baud_rate).map_err(|e| eprintln!("failed to open serial port at {tty}: {e}"))?;
	let mut client = Client::new(serial_port).map_err(|e| eprintln!("failed to set up bus: {e}"))?;

	client.write_bytes(motor_id, address, &data).map_err(|e| eprintln!("{e}"))?;
	Ok(())
}
