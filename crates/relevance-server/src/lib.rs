//! HTTP front door for the relevance pipeline.

pub mod gateway;
pub mod telemetry;

use std::net::IpAddr;

use relevance::config::Config;

/// URL the `--health-check` probe hits for `config`.
///
/// Wildcard binds are probed over loopback.
pub fn health_check_url(config: &Config) -> String {
    let host = match config.bind_addr {
        addr if addr.is_unspecified() => IpAddr::from([127, 0, 0, 1]),
        addr => addr,
    };

    match host {
        IpAddr::V4(v4) => format!("http://{}:{}/healthz", v4, config.port),
        IpAddr::V6(v6) => format!("http://[{}]:{}/healthz", v6, config.port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_url_uses_loopback_for_wildcard() {
        let config = Config {
            bind_addr: "0.0.0.0".parse().unwrap(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(health_check_url(&config), "http://127.0.0.1:9000/healthz");
    }

    #[test]
    fn health_check_url_keeps_specific_address() {
        let config = Config {
            bind_addr: "::1".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(health_check_url(&config), "http://[::1]:8080/healthz");
    }
}
