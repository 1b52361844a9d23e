#[cfg(test)]
#[path = "../tests/net.rs"]
mod tests;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::net::{IpAddr, SocketAddr};

/// Transport a destination is reached over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    Tcp,
    Udp,
    Unix,
}

/// Host part of a destination.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    Ip(IpAddr),
    Domain(String),
}

/// Peer a buffer is bound to or received from.
/// Buffers carry it along without ever looking inside.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Destination {
    pub network: Network,
    pub address: Address,
    pub port: u16,
}

impl Destination {
    #[inline]
    pub fn tcp(address: Address, port: u16) -> Self {
        Self {
            network: Network::Tcp,
            address,
            port,
        }
    }

    #[inline]
    pub fn udp(address: Address, port: u16) -> Self {
        Self {
            network: Network::Udp,
            address,
            port,
        }
    }

    #[inline]
    pub fn from_socket(network: Network, socket: SocketAddr) -> Self {
        Self {
            network,
            address: Address::Ip(socket.ip()),
            port: socket.port(),
        }
    }

    /// Unix sockets are addressed by path, port is always zero.
    #[inline]
    pub fn unix(path: &str) -> Self {
        Self {
            network: Network::Unix,
            address: Address::Domain(path.to_string()),
            port: 0,
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Network::Tcp => f.write_str("tcp"),
            Network::Udp => f.write_str("udp"),
            Network::Unix => f.write_str("unix"),
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Address::Ip(IpAddr::V6(ip)) => write!(f, "[{ip}]"),
            Address::Ip(IpAddr::V4(ip)) => write!(f, "{ip}"),
            Address::Domain(domain) => f.write_str(domain),
        }
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.network {
            Network::Unix => write!(f, "{}:{}", self.network, self.address),
            _ => write!(f, "{}:{}:{}", self.network, self.address, self.port),
        }
    }
}
