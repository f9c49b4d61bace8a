//! Which IP families the host can route, detected without sending packets.

use crate::config::ProbeConfig;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NetworkStack {
    None = 0,
    Ipv4Only = 1,
    Ipv6Only = 2,
    DualStack = 3,
}

impl NetworkStack {
    const IPV4: i32 = 1;
    const IPV6: i32 = 2;

    pub fn bits(self) -> i32 {
        self as i32
    }

    pub fn from_bits(bits: i32) -> Option<Self> {
        match bits {
            0 => Some(NetworkStack::None),
            1 => Some(NetworkStack::Ipv4Only),
            2 => Some(NetworkStack::Ipv6Only),
            3 => Some(NetworkStack::DualStack),
            _ => None,
        }
    }

    pub fn is_valid_bits(bits: i32) -> bool {
        Self::from_bits(bits).is_some()
    }

    pub fn supports_ipv4(self) -> bool {
        self.bits() & Self::IPV4 != 0
    }

    pub fn supports_ipv6(self) -> bool {
        self.bits() & Self::IPV6 != 0
    }

    fn from_support(ipv4: bool, ipv6: bool) -> Self {
        match (ipv4, ipv6) {
            (false, false) => NetworkStack::None,
            (true, false) => NetworkStack::Ipv4Only,
            (false, true) => NetworkStack::Ipv6Only,
            (true, true) => NetworkStack::DualStack,
        }
    }
}

/// A UDP `connect` only asks the kernel for a route; nothing is sent.
fn can_connect(target: SocketAddr) -> bool {
    let bind_addr: SocketAddr = match target {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };

    let result = UdpSocket::bind(bind_addr).and_then(|socket| socket.connect(target));
    if let Err(err) = &result {
        log::debug!("No route to {}: {}", target, err);
    }
    result.is_ok()
}

pub fn probe() -> NetworkStack {
    probe_with(&ProbeConfig::default())
}

pub fn probe_with(config: &ProbeConfig) -> NetworkStack {
    let stack = NetworkStack::from_support(
        can_connect(config.ipv4_target),
        can_connect(config.ipv6_target),
    );
    log::debug!("Network stack probe: {:?}", stack);
    stack
}
