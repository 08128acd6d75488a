mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use sdfhost_engine::compute::WasmComputeModule;
use sdfhost_engine::logging::init_logging;
use sdfhost_engine::pipeline::ShaderSources;
use sdfhost_engine::window::Runtime;
use sdfhost_engine::HostContext;

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.logging_config());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    let config = cli.host_config();

    // Shaders first: they are cheap to check and need no module instance.
    let shaders = ShaderSources::load_with(|pass| cli.shader_path(pass))
        .context("failed to load shaders")?;

    let module = WasmComputeModule::from_file(&cli.module, config.memory_pages)?;
    log::info!("compute module {} instantiated", cli.module.display());

    let host = HostContext::bootstrap(Box::new(module), &config)?;

    Runtime::run(config, host, shaders)
}
