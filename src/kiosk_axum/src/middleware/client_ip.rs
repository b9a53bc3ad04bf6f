use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{extract::ConnectInfo, http::request::Parts};

/// Best guess at the address of the client behind a request.
///
/// With `trust_proxy_headers` the priority is:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. The peer address, when the server was started with connect info
///
/// Without it only the peer address is used, since any client can set the
/// headers. Requests with no usable address share the unspecified address.
pub fn client_ip(parts: &Parts, trust_proxy_headers: bool) -> IpAddr {
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if !trust_proxy_headers {
        return peer.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    let headers = &parts.headers;

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|value| value.trim().parse::<IpAddr>().ok());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<IpAddr>().ok())
    };

    forwarded
        .or_else(real_ip)
        .or(peer)
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
