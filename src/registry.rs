//! Endpoint registry.
//!
//! Every operation the client can issue is declared here as a static
//! descriptor: the live path template, the mock fixture path, the HTTP verb,
//! and the body strategy used to build the request payload. The registry is
//! immutable and lives for the process lifetime; callers address it through
//! the [`Operation`] enum or, at the dynamic entry point, by dotted name.

use crate::request::{RequestDescriptor, RequestOverrides};
use crate::template::ParamBag;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// HTTP verbs supported by the management API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Wire form of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Expected response payload encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Json,
    Text,
}

/// Scope of a service state-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationLevel {
    Cluster,
    Service,
}

impl OperationLevel {
    fn as_str(&self) -> &'static str {
        match self {
            OperationLevel::Cluster => "CLUSTER",
            OperationLevel::Service => "SERVICE",
        }
    }
}

/// Closed set of request body strategies.
///
/// Each endpoint references one of these instead of carrying arbitrary
/// formatting logic inline. A strategy is invoked with the parameter bag and
/// the draft request, and its returned overrides are merged over the draft's
/// defaults (method, body, headers, timeout, response type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyBuilder {
    /// Serialize the bag's `data` entry verbatim.
    RawData,
    /// Wrap a service state change in the `RequestInfo`/`Body` envelope at
    /// the given operation level. Forces the verb to PUT.
    ServiceOperation { level: OperationLevel },
    /// Bulk host-component update: `RequestInfo` carries the selection query,
    /// `Body` carries the `HostRoles` patch.
    HostRolesQuery,
    /// Alert group payload built from `name`/`definitions`/`targets`, sent
    /// with the given verb.
    AlertGroup { method: Method },
    /// Persist the bag's `keyValuePair` entry verbatim.
    KeyValue,
}

impl BodyBuilder {
    /// Build the overrides this strategy contributes to a draft request.
    ///
    /// Never fails: absent bag entries serialize as JSON null, consistent
    /// with the resolver's silent-degradation policy.
    pub fn build(&self, params: &ParamBag, _draft: &RequestDescriptor) -> RequestOverrides {
        match self {
            BodyBuilder::RawData => RequestOverrides {
                body: Some(param(params, "data").to_string()),
                ..Default::default()
            },
            BodyBuilder::ServiceOperation { level } => {
                let mut operation_level = json!({
                    "level": level.as_str(),
                    "cluster_name": param(params, "clusterName"),
                });
                if *level == OperationLevel::Service {
                    operation_level["service_name"] = param(params, "serviceName");
                }
                RequestOverrides {
                    method: Some(Method::Put),
                    body: Some(
                        json!({
                            "RequestInfo": {
                                "context": param(params, "context"),
                                "operation_level": operation_level,
                            },
                            "Body": {
                                "ServiceInfo": param(params, "ServiceInfo"),
                            },
                        })
                        .to_string(),
                    ),
                    ..Default::default()
                }
            }
            BodyBuilder::HostRolesQuery => RequestOverrides {
                body: Some(
                    json!({
                        "RequestInfo": {
                            "context": param(params, "context"),
                            "query": param(params, "query"),
                        },
                        "Body": {
                            "HostRoles": param(params, "HostRoles"),
                        },
                    })
                    .to_string(),
                ),
                ..Default::default()
            },
            BodyBuilder::AlertGroup { method } => RequestOverrides {
                method: Some(*method),
                body: Some(
                    json!({
                        "AlertGroup": {
                            "name": param(params, "name"),
                            "definitions": param(params, "definitions"),
                            "targets": param(params, "targets"),
                        },
                    })
                    .to_string(),
                ),
                ..Default::default()
            },
            BodyBuilder::KeyValue => RequestOverrides {
                body: Some(param(params, "keyValuePair").to_string()),
                ..Default::default()
            },
        }
    }
}

fn param(params: &ParamBag, key: &str) -> Value {
    params.get(key).cloned().unwrap_or(Value::Null)
}

/// Static description of one named API operation.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// Live path template, relative to the API prefix.
    pub path: &'static str,
    /// Fixture path used in mock mode. Empty when no fixture exists.
    pub mock_path: &'static str,
    /// Configured verb. Mock mode ignores it and fetches with GET.
    pub method: Method,
    /// Per-endpoint API prefix override. Takes precedence over the
    /// configured prefix.
    pub api_prefix: Option<&'static str>,
    /// Body strategy applied after the draft's defaults are filled in.
    pub body: Option<BodyBuilder>,
    /// Client-side timeout override in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Expected response encoding.
    pub response_type: ResponseType,
    /// Whether test tooling may run this operation against a production
    /// cluster. Metadata only; the formatter ignores it.
    pub runs_against_production: bool,
}

impl EndpointDescriptor {
    const fn get(path: &'static str, mock_path: &'static str) -> Self {
        Self {
            path,
            mock_path,
            method: Method::Get,
            api_prefix: None,
            body: None,
            timeout_ms: None,
            response_type: ResponseType::Json,
            runs_against_production: false,
        }
    }

    const fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    const fn body(mut self, body: BodyBuilder) -> Self {
        self.body = Some(body);
        self
    }

    const fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    const fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    const fn production_safe(mut self) -> Self {
        self.runs_against_production = true;
        self
    }
}

/// Enumerated identifiers for every operation in the registry.
///
/// Addressing the table through an enum gives compile-time coverage checking;
/// the dotted names remain available through [`Operation::from_name`] for
/// callers that carry operation names as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ClusterUpdate,
    ClusterProvisioningStateSet,
    ClustersLoad,
    ServicesUpdate,
    ServiceUpdate,
    ServiceComponentInfo,
    ServiceDelete,
    HostComponentsUpdate,
    HostWithComponent,
    HostDelete,
    HostComponentDelete,
    AlertGroupsLoad,
    AlertGroupCreate,
    AlertGroupUpdate,
    AlertGroupDelete,
    AlertDefinitionsLoad,
    AlertInstancesLoad,
    BackgroundOperationsRecent,
    SecurityStatus,
    UserPrefGet,
    UserPrefSet,
}

impl Operation {
    /// Every operation in the registry, for table-wide checks.
    pub const ALL: &'static [Operation] = &[
        Operation::ClusterUpdate,
        Operation::ClusterProvisioningStateSet,
        Operation::ClustersLoad,
        Operation::ServicesUpdate,
        Operation::ServiceUpdate,
        Operation::ServiceComponentInfo,
        Operation::ServiceDelete,
        Operation::HostComponentsUpdate,
        Operation::HostWithComponent,
        Operation::HostDelete,
        Operation::HostComponentDelete,
        Operation::AlertGroupsLoad,
        Operation::AlertGroupCreate,
        Operation::AlertGroupUpdate,
        Operation::AlertGroupDelete,
        Operation::AlertDefinitionsLoad,
        Operation::AlertInstancesLoad,
        Operation::BackgroundOperationsRecent,
        Operation::SecurityStatus,
        Operation::UserPrefGet,
        Operation::UserPrefSet,
    ];

    /// Dotted operation name, as used by the dynamic dispatch entry point.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ClusterUpdate => "cluster.update",
            Operation::ClusterProvisioningStateSet => "cluster.save_provisioning_state",
            Operation::ClustersLoad => "clusters.load",
            Operation::ServicesUpdate => "services.update",
            Operation::ServiceUpdate => "service.update",
            Operation::ServiceComponentInfo => "service_component.info",
            Operation::ServiceDelete => "service.delete",
            Operation::HostComponentsUpdate => "host_components.update",
            Operation::HostWithComponent => "host.with_host_component",
            Operation::HostDelete => "host.delete",
            Operation::HostComponentDelete => "host_component.delete",
            Operation::AlertGroupsLoad => "alert_groups.load",
            Operation::AlertGroupCreate => "alert_groups.create",
            Operation::AlertGroupUpdate => "alert_groups.update",
            Operation::AlertGroupDelete => "alert_groups.delete",
            Operation::AlertDefinitionsLoad => "alert_definitions.load",
            Operation::AlertInstancesLoad => "alert_instances.load",
            Operation::BackgroundOperationsRecent => "background_operations.get_most_recent",
            Operation::SecurityStatus => "admin.security_status",
            Operation::UserPrefGet => "settings.get.user_pref",
            Operation::UserPrefSet => "settings.post.user_pref",
        }
    }

    /// Look up an operation by its dotted name.
    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// The static endpoint descriptor for this operation.
    pub fn descriptor(&self) -> EndpointDescriptor {
        match self {
            Operation::ClusterUpdate => {
                EndpointDescriptor::get("/clusters/{clusterName}", "/data/wizard/deploy/poll_1.json")
                    .method(Method::Put)
                    .body(BodyBuilder::RawData)
            }
            Operation::ClusterProvisioningStateSet => {
                EndpointDescriptor::get("/clusters/{clusterName}", "")
                    .method(Method::Put)
                    .body(BodyBuilder::RawData)
                    .response_type(ResponseType::Text)
            }
            Operation::ClustersLoad => {
                EndpointDescriptor::get("/clusters", "/data/clusters/info.json").production_safe()
            }
            Operation::ServicesUpdate => EndpointDescriptor::get(
                "/clusters/{clusterName}/services?{urlParams}",
                "/data/wizard/deploy/poll_1.json",
            )
            .body(BodyBuilder::ServiceOperation {
                level: OperationLevel::Cluster,
            }),
            Operation::ServiceUpdate => EndpointDescriptor::get(
                "/clusters/{clusterName}/services/{serviceName}",
                "/data/wizard/deploy/poll_1.json",
            )
            .body(BodyBuilder::ServiceOperation {
                level: OperationLevel::Service,
            }),
            Operation::ServiceComponentInfo => EndpointDescriptor::get(
                "/clusters/{clusterName}/services/{serviceName}/components/{componentName}?{urlParams}",
                "/data/wizard/deploy/poll_1.json",
            ),
            Operation::ServiceDelete => EndpointDescriptor::get(
                "/clusters/{clusterName}/services/{serviceName}",
                "/data/services/catalog.json",
            )
            .method(Method::Delete),
            Operation::HostComponentsUpdate => {
                EndpointDescriptor::get("/clusters/{clusterName}/host_components", "")
                    .method(Method::Put)
                    .body(BodyBuilder::HostRolesQuery)
            }
            Operation::HostWithComponent => EndpointDescriptor::get(
                "/clusters/{clusterName}/hosts?host_components/HostRoles/component_name={componentName}&minimal_response=true",
                "",
            ),
            Operation::HostDelete => {
                EndpointDescriptor::get("/clusters/{clusterName}/hosts/{hostName}", "")
                    .method(Method::Delete)
            }
            Operation::HostComponentDelete => EndpointDescriptor::get(
                "/clusters/{clusterName}/hosts/{hostName}/host_components/{componentName}",
                "",
            )
            .method(Method::Delete),
            Operation::AlertGroupsLoad => EndpointDescriptor::get(
                "/clusters/{clusterName}/alert_groups?fields=*",
                "/data/alerts/alert_groups.json",
            ),
            Operation::AlertGroupCreate => {
                EndpointDescriptor::get("/clusters/{clusterName}/alert_groups", "")
                    .body(BodyBuilder::AlertGroup {
                        method: Method::Post,
                    })
            }
            Operation::AlertGroupUpdate => {
                EndpointDescriptor::get("/clusters/{clusterName}/alert_groups/{groupId}", "")
                    .body(BodyBuilder::AlertGroup {
                        method: Method::Put,
                    })
            }
            Operation::AlertGroupDelete => {
                EndpointDescriptor::get("/clusters/{clusterName}/alert_groups/{groupId}", "")
                    .method(Method::Delete)
            }
            Operation::AlertDefinitionsLoad => EndpointDescriptor::get(
                "/clusters/{clusterName}/alert_definitions?fields=*",
                "/data/alerts/alert_definitions.json",
            ),
            Operation::AlertInstancesLoad => EndpointDescriptor::get(
                "/clusters/{clusterName}/alerts?fields=*",
                "/data/alerts/alert_instances.json",
            ),
            Operation::BackgroundOperationsRecent => EndpointDescriptor::get(
                "/clusters/{clusterName}/requests?to=end&page_size={operationsCount}&fields=Requests",
                "/data/background_operations/list_on_start.json",
            )
            .production_safe(),
            Operation::SecurityStatus => EndpointDescriptor::get(
                "/clusters/{clusterName}?fields=Clusters/security_type",
                "",
            )
            .timeout_ms(10_000),
            Operation::UserPrefGet => {
                EndpointDescriptor::get("/persist/{key}", "/data/user_settings/{key}.json")
            }
            Operation::UserPrefSet => EndpointDescriptor::get("/persist", "")
                .method(Method::Post)
                .body(BodyBuilder::KeyValue),
        }
    }
}
