//! Local host name resolution.
//!
//! The greeting embeds the canonical name of the machine serving it. The
//! lookup is behind a trait so tests can pin the name or force a failure.

use crate::errors::HostResolutionError;
use std::io;
use std::net::{IpAddr, ToSocketAddrs};

/// Resolves the canonical name of the local host.
pub trait HostnameResolver: Send + Sync {
    /// May block; callers on the async runtime should use the blocking pool.
    fn canonical_hostname(&self) -> Result<String, HostResolutionError>;
}

/// Resolver backed by the operating system.
///
/// Resolves the configured host name to its first address, then maps that
/// address back to a name through the system resolver (`/etc/hosts` first,
/// then DNS). The reverse answer is used only if it resolves forward to the
/// same address; otherwise the address itself is the canonical name.
///
/// Only a host name that cannot be read or resolved forward is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostnameResolver;

impl HostnameResolver for SystemHostnameResolver {
    fn canonical_hostname(&self) -> Result<String, HostResolutionError> {
        canonical_name(&SystemNameService)
    }
}

/// Name service primitives used by the canonical name lookup.
trait NameService {
    fn local_host_name(&self) -> io::Result<String>;

    fn forward(&self, name: &str) -> io::Result<Vec<IpAddr>>;

    fn reverse(&self, addr: IpAddr) -> io::Result<String>;
}

struct SystemNameService;

impl NameService for SystemNameService {
    fn local_host_name(&self) -> io::Result<String> {
        hostname::get()?.into_string().map_err(|raw| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("host name is not valid UTF-8: {:?}", raw),
            )
        })
    }

    fn forward(&self, name: &str) -> io::Result<Vec<IpAddr>> {
        Ok((name, 0).to_socket_addrs()?.map(|addr| addr.ip()).collect())
    }

    fn reverse(&self, addr: IpAddr) -> io::Result<String> {
        dns_lookup::lookup_addr(&addr)
    }
}

fn canonical_name(names: &dyn NameService) -> Result<String, HostResolutionError> {
    let name = names
        .local_host_name()
        .map_err(|e| HostResolutionError(format!("cannot read host name: {}", e)))?;

    let addr = names
        .forward(&name)
        .map_err(|e| HostResolutionError(format!("cannot resolve '{}': {}", name, e)))?
        .into_iter()
        .next()
        .ok_or_else(|| HostResolutionError(format!("'{}' resolved to no addresses", name)))?;

    match names.reverse(addr) {
        Ok(canonical) if confirms(names, &canonical, addr) => Ok(canonical),
        Ok(canonical) => {
            tracing::debug!(
                target: "hello.hostname",
                %addr,
                %canonical,
                "Reverse name does not resolve back to the address"
            );
            Ok(addr.to_string())
        }
        Err(e) => {
            tracing::debug!(target: "hello.hostname", %addr, error = %e, "Reverse lookup failed");
            Ok(addr.to_string())
        }
    }
}

fn confirms(names: &dyn NameService, canonical: &str, addr: IpAddr) -> bool {
    names
        .forward(canonical)
        .map(|addrs| addrs.contains(&addr))
        .unwrap_or(false)
}

/// Resolver that always returns the same name.
#[derive(Debug, Clone)]
pub struct StaticHostnameResolver(pub String);

impl HostnameResolver for StaticHostnameResolver {
    fn canonical_hostname(&self) -> Result<String, HostResolutionError> {
        Ok(self.0.clone())
    }
}

/// Resolver that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingHostnameResolver;

impl HostnameResolver for FailingHostnameResolver {
    fn canonical_hostname(&self) -> Result<String, HostResolutionError> {
        Err(HostResolutionError(
            "no network interface available".to_string(),
        ))
    }
}
