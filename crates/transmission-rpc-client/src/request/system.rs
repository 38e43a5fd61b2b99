//! Daemon maintenance requests.

use serde_json::Value;

use transmission_rpc_types::{self as types, BlocklistSize, Error};

use super::{Arguments, Dispatch, RpcRequest};

/// `blocklist-update`: refreshes the blocklist from its configured URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlocklistUpdate;

impl RpcRequest for BlocklistUpdate {
    type Response = BlocklistSize;

    fn method(&self) -> &'static str {
        "blocklist-update"
    }

    fn prepare(&self) -> Result<Dispatch<BlocklistSize>, Error> {
        Ok(Dispatch::Send(None))
    }
}

/// `port-test`: asks whether the peer port is reachable from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortTest {
    /// `ipv4` or `ipv6`; the daemon picks when unset.
    pub ip_protocol: Option<String>,
}

impl PortTest {
    /// Tests over the daemon's preferred protocol.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the test to one IP protocol.
    #[must_use]
    pub fn with_ip_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.ip_protocol = Some(protocol.into());
        self
    }
}

impl RpcRequest for PortTest {
    type Response = types::PortTest;

    fn method(&self) -> &'static str {
        "port-test"
    }

    fn prepare(&self) -> Result<Dispatch<types::PortTest>, Error> {
        let Some(protocol) = &self.ip_protocol else {
            return Ok(Dispatch::Send(None));
        };
        let mut arguments = Arguments::new();
        arguments.insert("ip_protocol".to_owned(), Value::from(protocol.as_str()));
        Ok(Dispatch::Send(Some(arguments)))
    }
}

/// `free-space`: free bytes in a directory on the daemon host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeSpace {
    /// Directory to inspect.
    pub path: String,
}

impl FreeSpace {
    /// Creates the request.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RpcRequest for FreeSpace {
    type Response = types::FreeSpace;

    fn method(&self) -> &'static str {
        "free-space"
    }

    fn prepare(&self) -> Result<Dispatch<types::FreeSpace>, Error> {
        let mut arguments = Arguments::new();
        arguments.insert("path".to_owned(), Value::from(self.path.as_str()));
        Ok(Dispatch::Send(Some(arguments)))
    }
}
