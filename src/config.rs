use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use symmetric_cipher::PaddingMode;

/// OS version from which explicit detaching is skipped.
pub const DEFAULT_DETACH_OS_THRESHOLD: i32 = 26;

/// Port used by the probe targets. Nothing is ever sent to it.
pub const PROBE_PORT: u16 = 0xFFFF;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CryptConfig {
    /// Completion of the final short DES block.
    pub des_padding: PaddingMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// `release_context` is a no-op at or above this OS version.
    pub detach_os_threshold: i32,
    /// Overrides the platform query for the OS version.
    pub os_version: Option<i32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            detach_os_threshold: DEFAULT_DETACH_OS_THRESHOLD,
            os_version: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    pub ipv4_target: SocketAddr,
    pub ipv6_target: SocketAddr,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ipv4_target: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), PROBE_PORT)),
            ipv6_target: SocketAddr::V6(SocketAddrV6::new(
                Ipv6Addr::new(0x2000, 0, 0, 0, 0, 0, 0, 0),
                PROBE_PORT,
                0,
                0,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeConfig {
    pub crypt: CryptConfig,
    pub runtime: RuntimeConfig,
    pub probe: ProbeConfig,
}
