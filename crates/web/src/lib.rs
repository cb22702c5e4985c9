use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use http::HeaderMap;

pub mod response;

#[doc(hidden)]
pub use tracing;

/// Resolves the client address of a request, preferring proxy headers over
/// the peer address of the connection.
#[must_use]
pub fn get_request_ip(headers: &HeaderMap, addr: Option<&SocketAddr>) -> Option<IpAddr> {
    let first_ip = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|s| s.split(',').next().map(str::trim))
            .and_then(|ip| IpAddr::from_str(ip).ok())
    };
    let x_forwarded_for = first_ip("X-Forwarded-For");
    let x_real_ip = first_ip("X-Real-IP");

    tracing::debug!(?x_forwarded_for, ?x_real_ip, peer_address = ?addr.map(SocketAddr::ip));

    x_forwarded_for.or(x_real_ip).or_else(|| addr.map(SocketAddr::ip))
}
