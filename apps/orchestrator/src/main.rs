// [apps/orchestrator/src/main.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR MAIN ENTRY POINT (V1.0)
 * CLASIFICACION: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: BOOTSTRAP DE ENTORNO E IGNICION DEL KERNEL
 * =================================================================
 */

use adctf_heimdall::init_tracing;
use adctf_orchestrator::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "orchestrator", about = "Attack & Defense CTF game orchestrator")]
struct Cli {
    #[arg(long, env = "CONFIG_FILE", default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("adctf_orchestrator");

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(async {
        info!("🛰️ [BOOT]: loading configuration from [{:?}]", cli.config);
        let config = Config::load(&cli.config);

        let kernel = OrchestratorKernel::ignite(config).await;
        kernel.launch().await;
    });

    Ok(())
}
