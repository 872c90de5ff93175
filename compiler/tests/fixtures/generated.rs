// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// DO NOT EDIT: This file is auto-generated by dapgen.
// DAP spec: https://microsoft.github.io/debug-adapter-protocol/specification

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

/// Implemented by every protocol message type. It is not part of the protocol
/// but lets code accept any message while keeping static types.
///
/// The protocol type `Message` (used in the body of `ErrorResponse`) is
/// renamed to `ErrorMessage` to avoid colliding with this trait.
pub trait Message {}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProtocolMessage {
    pub seq: i64,
    #[serde(rename = "type")]
    pub type_: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(flatten)]
    pub protocol_message: ProtocolMessage,
    pub command: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub protocol_message: ProtocolMessage,
    pub event: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(flatten)]
    pub protocol_message: ProtocolMessage,
    pub request_seq: i64,
    pub success: bool,
    pub command: String,
    pub message: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(flatten)]
    pub response: Response,
    pub body: ErrorResponseBody,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    pub error: Option<ErrorMessage>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoppedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub body: StoppedEventBody,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoppedEventBody {
    pub reason: String,
    #[serde(rename = "threadId")]
    pub thread_id: Option<i64>,
    #[serde(rename = "allThreadsStopped")]
    pub all_threads_stopped: Option<bool>,
    #[serde(rename = "hitBreakpointIds")]
    pub hit_breakpoint_ids: Option<Vec<i64>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InitializeRequest {
    #[serde(flatten)]
    pub request: Request,
    pub arguments: InitializeRequestArguments,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InitializeRequestArguments {
    #[serde(rename = "clientID")]
    pub client_id: Option<String>,
    #[serde(rename = "adapterID")]
    pub adapter_id: String,
    #[serde(rename = "linesStartAt1")]
    pub lines_start_at1: Option<bool>,
    #[serde(rename = "pathFormat")]
    pub path_format: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InitializeResponse {
    #[serde(flatten)]
    pub response: Response,
    pub body: Option<Capabilities>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigurationDoneArguments {}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunInTerminalRequestArguments {
    pub kind: Option<String>,
    pub cwd: String,
    pub args: Vec<String>,
    pub env: Option<BTreeMap<String, serde_json::Value>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(rename = "supportsConfigurationDoneRequest")]
    pub supports_configuration_done_request: Option<bool>,
    #[serde(rename = "supportedChecksumAlgorithms")]
    pub supported_checksum_algorithms: Option<Vec<ChecksumAlgorithm>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub id: i64,
    pub format: String,
    pub variables: Option<BTreeMap<String, String>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Source {
    pub name: Option<String>,
    pub sources: Option<Vec<Source>>,
    #[serde(rename = "adapterData")]
    pub adapter_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecksumAlgorithm(pub String);

impl Message for ProtocolMessage {}
impl Message for Request {}
impl Message for Event {}
impl Message for Response {}
impl Message for ErrorResponse {}
impl Message for StoppedEvent {}
impl Message for InitializeRequest {}
impl Message for InitializeResponse {}
