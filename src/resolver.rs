// src/resolver.rs
use crate::error::{ErrorContext, Result};
use crate::types::{Resolution, ResolverConfig, SubprobeError, Unresolved};
use async_trait::async_trait;
use log::debug;
use std::net::SocketAddr;
use std::str::FromStr;
use trust_dns_resolver::config::{
    NameServerConfig, Protocol, ResolverConfig as DnsResolverConfig, ResolverOpts,
};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::TokioAsyncResolver;

/// Performs one forward address lookup per call.
///
/// Implementations never fail: every outcome, including resolver faults, is
/// reported as a [`Resolution`].
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, target: &str) -> Resolution;
}

pub struct DnsResolver {
    resolver: TokioAsyncResolver,
}

impl DnsResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let mut opts = ResolverOpts::default();
        opts.timeout = config.timeout;
        opts.attempts = 1;
        opts.cache_size = 0;

        let resolver = if config.use_system_resolver {
            let (system_config, mut system_opts) =
                trust_dns_resolver::system_conf::read_system_conf().with_context(
                    SubprobeError::ResolverInit,
                    || "Failed to read system resolver configuration".to_string(),
                )?;
            system_opts.timeout = opts.timeout;
            system_opts.attempts = opts.attempts;
            system_opts.cache_size = opts.cache_size;
            TokioAsyncResolver::tokio(system_config, system_opts)
        } else {
            TokioAsyncResolver::tokio(nameserver_config(&config.nameservers)?, opts)
        };

        Ok(Self { resolver })
    }
}

fn nameserver_config(nameservers: &[String]) -> Result<DnsResolverConfig> {
    let mut resolver_config = DnsResolverConfig::new();

    for ns in nameservers {
        let socket_addr = SocketAddr::from_str(ns).with_context(SubprobeError::ConfigError, || {
            format!("Invalid nameserver address {}", ns)
        })?;
        resolver_config.add_name_server(NameServerConfig {
            socket_addr,
            protocol: Protocol::Udp,
            tls_dns_name: None,
            trust_negative_responses: false,
            bind_addr: None,
        });
    }

    Ok(resolver_config)
}

/// Maps a lookup error onto the reason reported for a missing target.
///
/// Only NXDOMAIN and an empty NOERROR answer mean the name is absent. The
/// resolver also reports SERVFAIL, REFUSED and friends as `NoRecordsFound`,
/// so the response code decides.
fn classify(error: &ResolveError) -> Unresolved {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound {
            response_code: ResponseCode::NXDomain | ResponseCode::NoError,
            ..
        } => Unresolved::NoSuchName,
        _ => Unresolved::Transient(error.to_string()),
    }
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn resolve(&self, target: &str) -> Resolution {
        match self.resolver.lookup_ip(target).await {
            Ok(lookup) => match lookup.iter().next() {
                Some(ip) => Resolution::found(target, ip.to_string()),
                None => Resolution::not_found(target, Unresolved::NoSuchName),
            },
            Err(e) => {
                let cause = classify(&e);
                if let Unresolved::Transient(reason) = &cause {
                    debug!("Lookup for {} failed: {}", target, reason);
                }
                Resolution::not_found(target, cause)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;
    use tokio::net::UdpSocket;
    use trust_dns_resolver::proto::op::{Message, MessageType};
    use trust_dns_resolver::proto::rr::rdata::A;
    use trust_dns_resolver::proto::rr::{RData, Record};
    use trust_dns_resolver::proto::serialize::binary::BinEncodable;

    /// Loopback DNS server answering every query with `code`, plus an A
    /// record when `address` is set.
    async fn spawn_stub(code: ResponseCode, address: Option<Ipv4Addr>) -> SocketAddr {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let local = socket.local_addr().unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            loop {
                let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                let Ok(request) = Message::from_vec(&buf[..len]) else {
                    continue;
                };

                let mut response = Message::new();
                response
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_op_code(request.op_code())
                    .set_recursion_desired(request.recursion_desired())
                    .set_recursion_available(true)
                    .set_response_code(code);
                response.add_queries(request.queries().to_vec());

                if let (Some(ip), Some(query)) = (address, request.queries().first()) {
                    response.add_answer(Record::from_rdata(
                        query.name().clone(),
                        60,
                        RData::A(A(ip)),
                    ));
                }

                if let Ok(bytes) = response.to_bytes() {
                    let _ = socket.send_to(&bytes, peer).await;
                }
            }
        });

        local
    }

    fn stub_resolver(server: SocketAddr) -> DnsResolver {
        DnsResolver::new(&ResolverConfig {
            use_system_resolver: false,
            nameservers: vec![server.to_string()],
            timeout: Duration::from_secs(2),
            ..ResolverConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_returns_first_address() {
        let server = spawn_stub(ResponseCode::NoError, Some(Ipv4Addr::new(192, 0, 2, 10))).await;

        let resolution = stub_resolver(server).resolve("www.subprobe.test").await;

        assert_eq!(resolution, Resolution::found("www.subprobe.test", "192.0.2.10"));
    }

    #[tokio::test]
    async fn test_resolve_nxdomain_is_missing_name() {
        let server = spawn_stub(ResponseCode::NXDomain, None).await;

        let resolution = stub_resolver(server).resolve("bogus123xyz.subprobe.test").await;

        assert_eq!(
            resolution,
            Resolution::not_found("bogus123xyz.subprobe.test", Unresolved::NoSuchName)
        );
    }

    #[tokio::test]
    async fn test_resolve_server_failures_are_transient() {
        for code in [ResponseCode::ServFail, ResponseCode::Refused] {
            let server = spawn_stub(code, None).await;

            match stub_resolver(server).resolve("www.subprobe.test").await {
                Resolution::NotFound(missing) => {
                    assert!(missing.is_transient(), "{:?} reported as {:?}", code, missing.cause)
                }
                other => panic!("expected NotFound for {:?}, got {:?}", code, other),
            }
        }
    }

    #[test]
    fn test_nameserver_config_rejects_garbage() {
        let err = nameserver_config(&["not-an-address".to_string()]).unwrap_err();
        assert!(matches!(err, SubprobeError::ConfigError(_)));
        assert!(err.to_string().contains("not-an-address"));
    }

    #[test]
    fn test_nameserver_config_accepts_socket_addrs() {
        let config =
            nameserver_config(&["9.9.9.9:53".to_string(), "[2620:fe::fe]:53".to_string()])
                .unwrap();
        assert_eq!(config.name_servers().len(), 2);
    }

    #[test]
    fn test_classify_timeout_as_transient() {
        let error = ResolveError::from(ResolveErrorKind::Timeout);
        assert!(matches!(classify(&error), Unresolved::Transient(_)));
    }

    #[test]
    fn test_classify_keeps_failure_reason() {
        let error = ResolveError::from("server failure");
        assert_eq!(
            classify(&error),
            Unresolved::Transient("server failure".to_string())
        );
    }

    #[tokio::test]
    async fn test_new_with_explicit_nameservers() {
        let config = ResolverConfig {
            use_system_resolver: false,
            nameservers: vec!["127.0.0.1:53".to_string()],
            ..ResolverConfig::default()
        };
        assert!(DnsResolver::new(&config).is_ok());
    }
}
