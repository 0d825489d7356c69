#![cfg_attr(test, allow(unused_crate_dependencies))]

use clap::crate_version;
use mimalloc::MiMalloc;
use pack_server::ServerConfig;
use tokio::runtime;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod args;
mod telemetry;

const THREAD_NAME: &str = "pack-sizer";

fn main() -> anyhow::Result<()> {
    let args = self::args::parse();
    let config = args.config()?;

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()?;

    runtime.block_on(async move {
        telemetry::init(&args)?;

        let crate_version = crate_version!();
        tracing::info!("Pack Sizer {crate_version}");

        let config = ServerConfig {
            listen_addr: args.listen_address,
            config,
        };

        pack_server::serve(config).await?;

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
