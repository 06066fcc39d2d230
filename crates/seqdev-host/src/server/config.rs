use anyhow::bail;
use clap::Parser;
use seqdev::device::DEFAULT_DEVICE_NAME;

/// Runtime configuration for the `seqdev-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first), with defaults suitable for local use.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "seqdev-server",
    version,
    about = "Serves a process-shared counter device over TCP or a Unix socket"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix
    /// socket).
    ///
    /// Example: "127.0.0.1:7070" or "/tmp/seqdev.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("127.0.0.1:7070"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a
    /// file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Name the counter device is registered under. Clients open sessions by
    /// this name.
    ///
    /// Environment variable: `DEVICE_NAME`
    #[arg(long, env = "DEVICE_NAME", default_value_t = String::from(DEFAULT_DEVICE_NAME))]
    pub device_name: String,

    /// Largest buffer a single read may request. Larger requests are clamped.
    ///
    /// Environment variable: `MAX_READ_CAPACITY`
    #[arg(long, env = "MAX_READ_CAPACITY", default_value_t = 4096)]
    pub max_read_capacity: usize,

    /// Seconds to wait for open sessions to finish during shutdown.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT`
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 3)]
    pub shutdown_timeout: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub device_name: String,
    pub max_read_capacity: usize,
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_addr: String::from("127.0.0.1:7070"),
            uds: false,
            device_name: String::from(DEFAULT_DEVICE_NAME),
            max_read_capacity: 4096,
            shutdown_timeout: 3,
        }
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.device_name.is_empty() || args.device_name.contains('/') {
            bail!(
                "DEVICE_NAME ({:?}) must be non-empty and contain no '/'",
                args.device_name
            );
        }

        if args.max_read_capacity == 0 {
            bail!("MAX_READ_CAPACITY must be greater than 0");
        }

        if u32::try_from(args.max_read_capacity).is_err() {
            bail!(
                "MAX_READ_CAPACITY ({}) exceeds the protocol limit of {}",
                args.max_read_capacity,
                u32::MAX
            );
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            device_name: args.device_name,
            max_read_capacity: args.max_read_capacity,
            shutdown_timeout: args.shutdown_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ServerConfig> {
        let argv = std::iter::once("seqdev-server").chain(args.iter().copied());
        ServerConfig::try_from(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn explicit_flags() {
        let config = parse(&[
            "--server-addr",
            "/tmp/seqdev.sock",
            "--uds",
            "--device-name",
            "counter1",
            "--max-read-capacity",
            "64",
        ])
        .unwrap();

        assert_eq!(config.server_addr, "/tmp/seqdev.sock");
        assert!(config.uds);
        assert_eq!(config.device_name, "counter1");
        assert_eq!(config.max_read_capacity, 64);
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(parse(&["--max-read-capacity", "0"]).is_err());
    }

    #[test]
    fn rejects_bad_device_name() {
        assert!(parse(&["--device-name", "a/b"]).is_err());
        assert!(parse(&["--device-name", ""]).is_err());
    }
}
