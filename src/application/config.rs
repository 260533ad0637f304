use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_LOCAL_PORT: u16 = 8080;
pub const DEFAULT_GUI_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub local_port: u16,
    /// Only reported at startup; the GUI process is never contacted.
    pub gui_port: u16,
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            local_port: DEFAULT_LOCAL_PORT,
            gui_port: DEFAULT_GUI_PORT,
            verbose: false,
        }
    }
}

impl ServerConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            host: matches.get_one::<IpAddr>("host").copied().unwrap_or(defaults.host),
            local_port: matches
                .get_one::<u16>("local-port")
                .copied()
                .unwrap_or(defaults.local_port),
            gui_port: matches
                .get_one::<u16>("gui-port")
                .copied()
                .unwrap_or(defaults.gui_port),
            verbose: matches.get_flag("verbose"),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.local_port)
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

pub fn command() -> Command {
    Command::new("calendar-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("In-memory calendar task store served over HTTP")
        .arg(
            Arg::new("local-port")
                .short('l')
                .long("local-port")
                .value_name("PORT")
                .value_parser(value_parser!(u16))
                .default_value("8080")
                .help("Port the HTTP server listens on"),
        )
        .arg(
            Arg::new("gui-port")
                .short('g')
                .long("gui-port")
                .value_name("PORT")
                .value_parser(value_parser!(u16))
                .default_value("3000")
                .help("Port the GUI server is expected on (informational)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("ADDR")
                .value_parser(value_parser!(IpAddr))
                .default_value("127.0.0.1")
                .help("Address to bind"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every request at debug level"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServerConfig {
        let matches = command()
            .try_get_matches_from(std::iter::once("calendar-server").chain(args.iter().copied()))
            .unwrap();
        ServerConfig::from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen_addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.gui_port, 3000);
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&["-l", "9090", "--gui-port", "4000", "--host", "0.0.0.0", "-v"]);

        assert_eq!(config.listen_addr(), "0.0.0.0:9090".parse().unwrap());
        assert_eq!(config.gui_port, 4000);
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_rejects_invalid_port() {
        let result = command().try_get_matches_from(["calendar-server", "--local-port", "70000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }
}
