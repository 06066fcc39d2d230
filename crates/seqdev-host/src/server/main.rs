use clap::Parser;
use futures::{Stream, StreamExt};
use seqdev::{device::CounterDevice, generator::AtomicSequenceGenerator, registry::LocalRegistry};
use seqdev_host::server::{
    config::{CliArgs, ServerConfig},
    service::handler::DeviceService,
    telemetry::init_telemetry,
};
use std::{io, sync::Arc};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpListener,
    signal,
};
use tokio_stream::wrappers::TcpListenerStream;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_telemetry()?;

    let registry = Arc::new(LocalRegistry::new());
    let mut device = CounterDevice::with_name(config.device_name.clone(), Arc::clone(&registry));
    device.init()?;

    let service = DeviceService::new(config.clone(), registry);

    let res = if config.uds {
        #[cfg(unix)]
        {
            use tokio::net::UnixListener;
            use tokio_stream::wrappers::UnixListenerStream;
            let uds_path = config.server_addr.clone();
            let uds = UnixListener::bind(&uds_path)?;
            let incoming = UnixListenerStream::new(uds);
            log_startup_info(&uds_path, &config);
            let res = run_server_with_incoming(service, incoming).await;
            // A panic can still leave the socket file behind.
            let _ = std::fs::remove_file(&uds_path);
            res
        }
        #[cfg(not(unix))]
        {
            anyhow::bail!("Unix domain sockets are not supported on this platform");
        }
    } else {
        let tcp_path = config.server_addr.clone();
        let tcp = TcpListener::bind(&tcp_path).await?;
        let incoming = TcpListenerStream::new(tcp);
        log_startup_info(&tcp_path, &config);
        run_server_with_incoming(service, incoming).await
    };

    device.teardown();
    res
}

async fn run_server_with_incoming<I, IO>(service: DeviceService, incoming: I) -> anyhow::Result<()>
where
    I: Stream<Item = io::Result<IO>>,
    IO: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let connection_ids = AtomicSequenceGenerator::new();
    let shutdown = shutdown_signal();
    tokio::pin!(incoming, shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            conn = incoming.next() => {
                let Some(conn) = conn else {
                    break;
                };
                match conn {
                    Ok(io) => {
                        let connection = connection_ids.next();
                        let service = service.clone();
                        tokio::spawn(async move {
                            if let Err(_e) = service.serve(connection, io).await {
                                #[cfg(feature = "tracing")]
                                tracing::warn!(connection, error = %_e, "Session ended with error");
                            }
                        });
                    }
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(error = %_e, "Failed to accept connection");
                    }
                }
            }
        }
    }

    service.shutdown().await;

    #[cfg(feature = "tracing")]
    tracing::info!("Service shut down successfully");
    Ok(())
}

fn log_startup_info(_addr: &str, _config: &ServerConfig) {
    if cfg!(debug_assertions) {
        #[cfg(feature = "tracing")]
        tracing::info!(
            "Serving device `{}` on {} with full config: {:#?}",
            _config.device_name,
            _addr,
            _config
        );
    } else {
        #[cfg(feature = "tracing")]
        tracing::info!("Serving device `{}` on {}", _config.device_name, _addr);
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %_e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(_e) = signal::ctrl_c().await {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %_e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            #[cfg(feature = "tracing")]
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            #[cfg(feature = "tracing")]
            tracing::info!("Received SIGTERM signal");
        },
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Shutdown signal received, terminating gracefully...");
}
