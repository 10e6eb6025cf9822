use std::path::Path;

use clap::Parser;
use dynamixel_bus::{v1, v2};

mod logging;
mod options;

use options::{Command, MotorId, Options, Protocol};

fn main() {
	let options = Options::parse();
	logging::init(env!("CARGO_CRATE_NAME"), options.verbose);
	if let Err(()) = do_main(options) {
		std::process::exit(1);
	}
}

fn do_main(options: Options) -> Result<(), ()> {
	if let Command::ShellCompletion { shell, output } = &options.command {
		return write_shell_completion(*shell, output.as_deref());
	}

	let serial_port = open_serial_port(&options)?;
	match options.protocol {
		Protocol::V1 => run_v1(v1::Client::new(serial_port).map_err(|e| log::error!("Failed to set up bus: {e}"))?, &options.command),
		Protocol::V2 => run_v2(v2::Client::new(serial_port).map_err(|e| log::error!("Failed to set up bus: {e}"))?, &options.command),
	}
}

fn open_serial_port(options: &Options) -> Result<serial2::SerialPort, ()> {
	let port = serial2::SerialPort::open(&options.serial_port, options.baud_rate)
		.map_err(|e| log::error!("Failed to open serial port: {}: {}", options.serial_port.display(), e))?;
	log::debug!("Using serial port {} with baud rate {}", options.serial_port.display(), options.baud_rate);
	Ok(port)
}

fn run_v1(mut client: v1::Client<serial2::SerialPort>, command: &Command) -> Result<(), ()> {
	match command {
		Command::Ping { motor_id } => {
			let motor_id = motor_id.assume_unicast().map_err(|()| log::error!("Protocol 1 has no broadcast-ping scan; pass a specific motor ID."))?;
			let response = client.ping(motor_id).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("Motor {motor_id}: {response:?}");
		},
		Command::Reboot { motor_id } => match motor_id {
			MotorId::Id(id) => {
				client.reboot(*id).map_err(|e| log::error!("Command failed: {e}"))?;
				log::info!("Ok");
			},
			MotorId::Broadcast => {
				client.broadcast_reboot().map_err(|e| log::error!("Command failed: {e}"))?;
				log::info!("Ok");
			},
		},
		Command::FactoryReset { motor_id } => match motor_id {
			MotorId::Id(id) => {
				client.factory_reset(*id).map_err(|e| log::error!("Command failed: {e}"))?;
				log::info!("Ok");
			},
			MotorId::Broadcast => {
				client.broadcast_factory_reset().map_err(|e| log::error!("Command failed: {e}"))?;
				log::info!("Ok");
			},
		},
		Command::Read8 { motor_id, address } => {
			let response = client.read_u8(motor_id.assume_unicast()?, *address as u8).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("{response:?}");
		},
		Command::Read16 { motor_id, address } => {
			let response = client.read_u16(motor_id.assume_unicast()?, *address as u8).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("{response:?}");
		},
		Command::Read32 { motor_id, address } => {
			let response = client.read_u32(motor_id.assume_unicast()?, *address as u8).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("{response:?}");
		},
		Command::Write8 { motor_id, address, value } => {
			client.write_u8(motor_id.raw(), *address as u8, *value).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("Ok");
		},
		Command::Write16 { motor_id, address, value } => {
			client.write_u16(motor_id.raw(), *address as u8, *value).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("Ok");
		},
		Command::Write32 { motor_id, address, value } => {
			client.write_u32(motor_id.raw(), *address as u8, *value).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("Ok");
		},
		Command::ShellCompletion { .. } => unreachable!("handled in do_main"),
	}
	Ok(())
}

fn run_v2(mut client: v2::Client<serial2::SerialPort>, command: &Command) -> Result<(), ()> {
	match command {
		Command::Ping { motor_id } => match motor_id {
			MotorId::Id(id) => {
				let response = client.ping(*id).map_err(|e| log::error!("Command failed: {e}"))?;
				log::info!("Motor {id}: {response:?}");
			},
			MotorId::Broadcast => {
				log::debug!("Scanning bus for connected motors");
				let result = client.broadcast_ping().map_err(|e| log::error!("Command failed: {e}"))?;
				for response in &result.responses {
					log::info!("{response:?}");
				}
			},
		},
		Command::Reboot { motor_id } => match motor_id {
			MotorId::Id(id) => {
				client.reboot(*id).map_err(|e| log::error!("Command failed: {e}"))?;
				log::info!("Ok");
			},
			MotorId::Broadcast => {
				client.broadcast_reboot().map_err(|e| log::error!("Command failed: {e}"))?;
				log::info!("Ok");
			},
		},
		Command::FactoryReset { motor_id } => {
			use v2::instructions::FactoryResetKind;
			match motor_id {
				MotorId::Id(id) => {
					client.factory_reset(*id, FactoryResetKind::ResetAll).map_err(|e| log::error!("Command failed: {e}"))?;
					log::info!("Ok");
				},
				MotorId::Broadcast => {
					client.broadcast_factory_reset(FactoryResetKind::ResetAll).map_err(|e| log::error!("Command failed: {e}"))?;
					log::info!("Ok");
				},
			}
		},
		Command::Read8 { motor_id, address } => {
			let response = client.read_u8(motor_id.assume_unicast()?, *address).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("{response:?}");
		},
		Command::Read16 { motor_id, address } => {
			let response = client.read_u16(motor_id.assume_unicast()?, *address).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("{response:?}");
		},
		Command::Read32 { motor_id, address } => {
			let response = client.read_u32(motor_id.assume_unicast()?, *address).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("{response:?}");
		},
		Command::Write8 { motor_id, address, value } => {
			client.write_u8(motor_id.raw(), *address, *value).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("Ok");
		},
		Command::Write16 { motor_id, address, value } => {
			client.write_u16(motor_id.raw(), *address, *value).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("Ok");
		},
		Command::Write32 { motor_id, address, value } => {
			client.write_u32(motor_id.raw(), *address, *value).map_err(|e| log::error!("Command failed: {e}"))?;
			log::info!("Ok");
		},
		Command::ShellCompletion { .. } => unreachable!("handled in do_main"),
	}
	Ok(())
}

fn write_shell_completion(shell: clap_complete::Shell, path: Option<&Path>) -> Result<(), ()> {
	use std::io::Write;
	let mut buffer = Vec::with_capacity(4 * 1024);

	let mut command = <Options as clap::CommandFactory>::command();
	let name = command.get_name().to_string();
	clap_complete::generate(shell, &mut command, name, &mut buffer);
	if !buffer.ends_with(b"\n") {
		buffer.push(b'\n');
	}

	let path = path.unwrap_or_else(|| Path::new("-"));
	if path == Path::new("-") {
		log::debug!("Writing shell completion for {shell} to stdout");
		let stdout = std::io::stdout();
		stdout.lock().write_all(&buffer).map_err(|e| log::error!("Failed to write to stdout: {e}"))?;
	} else {
		log::debug!("Writing shell completion for {shell} to {}", path.display());
		let mut output = std::fs::File::create(path).map_err(|e| log::error!("Failed to create {}: {e}", path.display()))?;
		output.write_all(&buffer).map_err(|e| log::error!("Failed to write to {}: {e}", path.display()))?;
	}

	Ok(())
}
