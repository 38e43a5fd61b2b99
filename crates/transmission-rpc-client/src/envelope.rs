//! JSON-RPC envelope codec.
//!
//! Requests are `{"method", "arguments", "tag"}`; responses are
//! `{"result", "arguments", "tag"}`. Response `arguments` are kept as raw JSON until the
//! caller's target type is known, so integers never pass through a float.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::value::RawValue;

use transmission_rpc_types::Error;

/// The `result` value of a successful call.
pub const SUCCESS: &str = "success";

/// Outgoing envelope.
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a, A> {
    /// RPC method name.
    pub method: &'a str,
    /// Method arguments; omitted entirely when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<&'a A>,
    /// Correlation tag.
    pub tag: i64,
}

/// Incoming envelope, with the arguments still undecoded.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseEnvelope {
    /// `success` or the daemon's error message.
    pub result: String,
    /// Method specific payload.
    #[serde(default)]
    pub arguments: Option<Box<RawValue>>,
    /// Echo of the request tag.
    #[serde(default)]
    pub tag: Option<i64>,
}

/// Encodes a request envelope.
pub fn encode_request<A: Serialize>(
    method: &str,
    arguments: Option<&A>,
    tag: i64,
) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(&RequestEnvelope {
        method,
        arguments,
        tag,
    })
    .map_err(|e| Error::Encode(e.to_string()))
}

/// Parses a response envelope without interpreting it.
pub fn parse_response(body: &[u8]) -> Result<ResponseEnvelope, Error> {
    serde_json::from_slice(body).map_err(|e| Error::Decode(format!("response envelope: {e}")))
}

impl ResponseEnvelope {
    /// Checks the result and tag, then decodes the arguments into `R`.
    ///
    /// A response without a tag is accepted; a response with a different tag is not.
    pub fn into_arguments<R: DeserializeOwned>(self, expected_tag: i64) -> Result<R, Error> {
        if let Some(tag) = self.tag {
            if tag != expected_tag {
                return Err(Error::MismatchedIds {
                    request: expected_tag,
                    response: tag,
                });
            }
        }
        if self.result != SUCCESS {
            return Err(Error::ServerError(self.result));
        }
        let raw = self.arguments.as_deref().map_or("{}", RawValue::get);
        serde_json::from_str(raw).map_err(|e| Error::Decode(format!("response arguments: {e}")))
    }
}
