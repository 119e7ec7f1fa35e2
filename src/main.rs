mod candidates;
mod cli;
mod compositor;
mod data_loaders;
mod error;
mod formats;
mod layout;
mod logging;
mod menu;
#[cfg(windows)]
mod native_screens;
mod paths;
mod persistence;
mod stitcher;

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

use crate::{
	cli::Cli,
	data_loaders::{config::StitcherConfig, screens::load_screens},
	error::{Result, StitchError},
	menu::Prompter,
	paths::{find_config, APP_NAME},
	stitcher::{Outcome, Stitcher},
};

fn load_config(cli: &Cli) -> Result<(StitcherConfig, Option<PathBuf>)> {
	let source_dir = cli.dir.clone().unwrap_or_else(|| PathBuf::from("."));
	let config_path = cli.config.clone().or_else(|| find_config(&source_dir));

	let mut config = match &config_path {
		Some(path) => StitcherConfig::load(path)?,
		None => StitcherConfig::default(),
	};
	config.apply_cli(cli)?;

	Ok((config, config_path))
}

fn stitch(config: &StitcherConfig) -> Result<Outcome> {
	let source = config.screen_source()?;
	let screens = load_screens(&source)?;
	info!("[{}] {} monitor(s) from {}", APP_NAME, screens.len(), source);

	let mut prompter = Prompter::stdio();
	Stitcher::new(config, &mut prompter).run(&screens)
}

fn report(err: &StitchError) {
	error!("[{}] {}", APP_NAME, err);
	eprintln!("ERROR: {err}");

	if let StitchError::NoImages(_) = err {
		eprintln!("Please specify another folder with parameter -d");
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	let (config, config_path) = match load_config(&cli) {
		Ok(loaded) => loaded,
		Err(e) => {
			report(&e);
			return ExitCode::FAILURE;
		}
	};

	logging::init(config.logging.debug, &config.logging.level, &config.log_path());

	let default_hook = std::panic::take_hook();
	std::panic::set_hook(Box::new(move |panic_info| {
		error!("[{}] Panic: {}", APP_NAME, panic_info);
		logging::flush();
		default_hook(panic_info);
	}));

	info!("!---------- [{}] Starting ----------!", APP_NAME);
	match &config_path {
		Some(path) => info!("[{}] Config loaded from {}", APP_NAME, path.display()),
		None => info!("[{}] No config file, using defaults", APP_NAME),
	}

	let code = match stitch(&config) {
		Ok(Outcome::Saved(path)) => {
			info!("[{}] Done: {}", APP_NAME, path.display());
			ExitCode::SUCCESS
		}
		Ok(Outcome::Cancelled) => ExitCode::SUCCESS,
		Err(e) => {
			report(&e);
			ExitCode::FAILURE
		}
	};

	logging::flush();
	code
}
