//! Command line / environment configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Serve the upload page and the checkout WASM bundle
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Port override, keeps the host from `--bind`
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory holding index.html and pkg/
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

impl ServerArgs {
    pub fn addr(&self) -> SocketAddr {
        let mut addr = self.bind;
        if let Some(port) = self.port {
            addr.set_port(port);
        }
        addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_override() {
        let args = ServerArgs::parse_from([
            "checkout-dev-server",
            "--bind",
            "127.0.0.1:5000",
            "--port",
            "5003",
        ]);
        assert_eq!(args.addr(), "127.0.0.1:5003".parse().unwrap());
    }

    #[test]
    fn test_bind_without_port() {
        let args = ServerArgs {
            bind: "0.0.0.0:8080".parse().unwrap(),
            port: None,
            static_dir: PathBuf::from("static"),
        };
        assert_eq!(args.addr().port(), 8080);
    }
}
