//! Request formatting.
//!
//! Turns an operation plus a parameter bag into a ready-to-send request
//! descriptor: URL substitution, verb resolution, and body construction.
//! The transformation is pure; all configuration arrives as an explicit
//! argument.

use crate::config::{ClientConfig, RequestMode};
use crate::registry::{EndpointDescriptor, Method, Operation, ResponseType};
use crate::template::{resolve, ParamBag};
use std::collections::HashMap;

/// A fully-populated request, ready for dispatch.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path-and-query portion of the request, already substituted. The
    /// dispatch client joins it onto the configured base URL.
    pub url: String,
    pub headers: HashMap<String, String>,
    /// Serialized body, typically a JSON document built by a body strategy.
    /// Opaque to the formatter.
    pub body: Option<String>,
    pub timeout_ms: u64,
    pub response_type: ResponseType,
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        Self {
            method: Method::Get,
            url: String::new(),
            headers: HashMap::new(),
            body: None,
            timeout_ms: 0,
            response_type: ResponseType::Json,
        }
    }
}

/// Fields a body strategy may override on the draft request. Anything set
/// here wins over the draft's defaults.
#[derive(Debug, Default)]
pub struct RequestOverrides {
    pub method: Option<Method>,
    pub body: Option<String>,
    pub headers: HashMap<String, String>,
    pub timeout_ms: Option<u64>,
    pub response_type: Option<ResponseType>,
}

impl RequestDescriptor {
    fn apply(&mut self, overrides: RequestOverrides) {
        if let Some(method) = overrides.method {
            self.method = method;
        }
        if overrides.body.is_some() {
            self.body = overrides.body;
        }
        self.headers.extend(overrides.headers);
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(response_type) = overrides.response_type {
            self.response_type = response_type;
        }
    }
}

/// Format a request for `operation` from the parameter bag and configuration.
///
/// In mock mode the endpoint's fixture path is resolved into the URL and the
/// verb is forced to GET; fixtures are fetched, never mutated. In live mode
/// the endpoint's path template is resolved and prefixed by the API prefix,
/// with a per-endpoint override taking precedence over the configured one.
/// The endpoint's body strategy, if any, runs last and may override any
/// already-set field.
///
/// Formatting never fails. An endpoint without a fixture formats to an empty
/// URL in mock mode; the failure surfaces at dispatch, not here.
pub fn format(operation: Operation, params: &ParamBag, config: &ClientConfig) -> RequestDescriptor {
    format_descriptor(&operation.descriptor(), params, config)
}

/// Format a request from an endpoint descriptor directly.
///
/// [`format`] is the registry-backed entry point; this is the underlying
/// transformation for callers that carry descriptors of their own.
pub fn format_descriptor(
    descriptor: &EndpointDescriptor,
    params: &ParamBag,
    config: &ClientConfig,
) -> RequestDescriptor {
    let mut draft = RequestDescriptor {
        timeout_ms: descriptor.timeout_ms.unwrap_or(config.timeout_ms),
        response_type: descriptor.response_type,
        ..Default::default()
    };

    match config.mode {
        RequestMode::Mock => {
            draft.url = resolve(descriptor.mock_path, params);
        }
        RequestMode::Live => {
            let prefix: &str = match descriptor.api_prefix {
                Some(prefix) => prefix,
                None => &config.api_prefix,
            };
            draft.url = format!("{}{}", prefix, resolve(descriptor.path, params));
            draft.method = descriptor.method;
        }
    }

    if let Some(builder) = &descriptor.body {
        let overrides = builder.build(params, &draft);
        draft.apply(overrides);
    }

    // Mock fixtures stay read-only even when a body strategy asked for a
    // mutating verb.
    if config.mode == RequestMode::Mock {
        draft.method = Method::Get;
    }

    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> ParamBag {
        [
            ("clusterName".to_string(), json!("c1")),
            ("serviceName".to_string(), json!("HDFS")),
            ("data".to_string(), json!({"Clusters": {}})),
        ]
        .into_iter()
        .collect()
    }

    fn live_config() -> ClientConfig {
        ClientConfig::default()
    }

    fn mock_config() -> ClientConfig {
        ClientConfig {
            mode: RequestMode::Mock,
            ..Default::default()
        }
    }

    #[test]
    fn test_descriptor_prefix_override_beats_configured_prefix() {
        let descriptor = EndpointDescriptor {
            path: "/clusters/{clusterName}",
            mock_path: "",
            method: Method::Get,
            api_prefix: Some("/api/v2"),
            body: None,
            timeout_ms: None,
            response_type: ResponseType::Json,
            runs_against_production: false,
        };
        let request = format_descriptor(&descriptor, &params(), &live_config());
        assert_eq!(request.url, "/api/v2/clusters/c1");
    }

    #[test]
    fn test_live_url_gets_prefix_and_substitution() {
        let request = format(Operation::ServiceUpdate, &params(), &live_config());
        assert_eq!(request.url, "/api/v1/clusters/c1/services/HDFS");
    }

    #[test]
    fn test_live_method_comes_from_descriptor() {
        let request = format(Operation::HostDelete, &params(), &live_config());
        assert_eq!(request.method, Method::Delete);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_builder_overrides_default_method() {
        // ServicesUpdate declares GET; its body strategy upgrades it to PUT.
        assert_eq!(
            Operation::ServicesUpdate.descriptor().method,
            Method::Get
        );
        let request = format(Operation::ServicesUpdate, &params(), &live_config());
        assert_eq!(request.method, Method::Put);
        assert!(request.body.is_some());
    }

    #[test]
    fn test_mock_mode_forces_get() {
        let request = format(Operation::ClusterUpdate, &params(), &mock_config());
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "/data/wizard/deploy/poll_1.json");
    }

    #[test]
    fn test_mock_mode_skips_api_prefix() {
        let request = format(Operation::ClustersLoad, &params(), &mock_config());
        assert_eq!(request.url, "/data/clusters/info.json");
    }

    #[test]
    fn test_mock_path_resolves_placeholders() {
        let bag: ParamBag = [("key".to_string(), json!("theme"))].into_iter().collect();
        let request = format(Operation::UserPrefGet, &bag, &mock_config());
        assert_eq!(request.url, "/data/user_settings/theme.json");
    }

    #[test]
    fn test_missing_fixture_formats_to_empty_url() {
        let request = format(Operation::HostDelete, &params(), &mock_config());
        assert_eq!(request.url, "");
        assert_eq!(request.method, Method::Get);
    }

    #[test]
    fn test_missing_bag_entries_leave_empty_segments() {
        let request = format(Operation::ServiceUpdate, &ParamBag::new(), &live_config());
        assert_eq!(request.url, "/api/v1/clusters//services/");
        assert!(!request.url.contains('{'));
    }

    #[test]
    fn test_timeout_defaults_and_overrides() {
        let request = format(Operation::ClustersLoad, &params(), &live_config());
        assert_eq!(request.timeout_ms, 180_000);

        let request = format(Operation::SecurityStatus, &params(), &live_config());
        assert_eq!(request.timeout_ms, 10_000);
    }

    #[test]
    fn test_response_type_passthrough() {
        let request = format(Operation::ClustersLoad, &params(), &live_config());
        assert_eq!(request.response_type, ResponseType::Json);

        let request = format(
            Operation::ClusterProvisioningStateSet,
            &params(),
            &live_config(),
        );
        assert_eq!(request.response_type, ResponseType::Text);
    }

    #[test]
    fn test_overrides_merge_layering() {
        let mut draft = RequestDescriptor {
            method: Method::Get,
            timeout_ms: 180_000,
            ..Default::default()
        };
        draft
            .headers
            .insert("X-Requested-By".to_string(), "console".to_string());

        draft.apply(RequestOverrides {
            method: Some(Method::Put),
            body: Some("{}".to_string()),
            headers: [("Content-Type".to_string(), "application/json".to_string())]
                .into_iter()
                .collect(),
            timeout_ms: Some(5_000),
            response_type: Some(ResponseType::Text),
        });

        assert_eq!(draft.method, Method::Put);
        assert_eq!(draft.body.as_deref(), Some("{}"));
        assert_eq!(draft.timeout_ms, 5_000);
        assert_eq!(draft.response_type, ResponseType::Text);
        assert_eq!(draft.headers.len(), 2);
    }
}
