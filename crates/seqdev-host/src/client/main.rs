use clap::Parser;
use seqdev::device::DEFAULT_DEVICE_NAME;
use seqdev_host::client::RemoteSession;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
};

/// Reads values from a running `seqdev-server`, one session per value.
#[derive(Parser, Debug)]
#[command(name = "seqdev-read", version, about = "Reads from a seqdev counter device")]
struct Args {
    /// Server address (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("127.0.0.1:7070"))]
    server_addr: String,

    /// Connect over a Unix socket instead of TCP.
    #[arg(short, long, default_value_t = false)]
    uds: bool,

    /// Device to open.
    ///
    /// Environment variable: `DEVICE_NAME`
    #[arg(long, env = "DEVICE_NAME", default_value_t = String::from(DEFAULT_DEVICE_NAME))]
    device_name: String,

    /// Size of the read buffer. Smaller than the formatted value truncates
    /// it.
    #[arg(short, long, default_value_t = 40)]
    buffer_size: u32,

    /// Number of sequential sessions to open.
    #[arg(short = 'n', long, default_value_t = 1)]
    sessions: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    let mut stdout = tokio::io::stdout();

    for _ in 0..args.sessions {
        let bytes = if args.uds {
            #[cfg(unix)]
            {
                let stream = tokio::net::UnixStream::connect(&args.server_addr).await?;
                read_session(stream, &args).await?
            }
            #[cfg(not(unix))]
            {
                anyhow::bail!("Unix domain sockets are not supported on this platform");
            }
        } else {
            let stream = TcpStream::connect(&args.server_addr).await?;
            read_session(stream, &args).await?
        };
        stdout.write_all(&bytes).await?;
    }

    stdout.flush().await?;
    Ok(())
}

async fn read_session<IO>(io: IO, args: &Args) -> anyhow::Result<Vec<u8>>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    let mut session = RemoteSession::open(io, &args.device_name).await?;
    Ok(session.read_to_end(args.buffer_size).await?)
}
