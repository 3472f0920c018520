use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "file-receiver", version, about = "Receive multipart uploads and write them to disk")]
pub struct ReceiverConfig {
    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0", env = "RECEIVER_LISTEN")]
    pub listen: String,

    /// Bind port
    #[arg(short, long, default_value_t = 8200, env = "RECEIVER_PORT")]
    pub port: u16,

    /// Raise the default log level, repeatable (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ReceiverConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Self::parse()
    }

    /// Default filter handed to env_logger; RUST_LOG still wins.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn log_flags(&self) {
        log::debug!("FLAG: --listen={:?}", self.listen);
        log::debug!("FLAG: --port={:?}", self.port.to_string());
        log::debug!("FLAG: --verbose={:?}", self.verbose.to_string());
    }

    pub fn addr(&self) -> (&str, u16) {
        (self.listen.as_str(), self.port)
    }
}
