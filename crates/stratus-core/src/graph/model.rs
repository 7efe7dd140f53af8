//! Graph vocabulary: resource types, property values, node references and
//! the assertions (triples) a graph is made of.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::StratusError;

/// Kind of a remote resource
///
/// Ordering is alphabetical on the lower-case name, which is the order types
/// are listed in every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Bucket,
    Database,
    ElasticIp,
    Function,
    Group,
    Instance,
    InternetGateway,
    KeyPair,
    LoadBalancer,
    Policy,
    Queue,
    Record,
    Region,
    Role,
    RouteTable,
    SecurityGroup,
    StorageObject,
    Subnet,
    TargetGroup,
    Topic,
    User,
    Volume,
    Vpc,
    Zone,
}

impl ResourceType {
    pub const ALL: [ResourceType; 24] = [
        ResourceType::Bucket,
        ResourceType::Database,
        ResourceType::ElasticIp,
        ResourceType::Function,
        ResourceType::Group,
        ResourceType::Instance,
        ResourceType::InternetGateway,
        ResourceType::KeyPair,
        ResourceType::LoadBalancer,
        ResourceType::Policy,
        ResourceType::Queue,
        ResourceType::Record,
        ResourceType::Region,
        ResourceType::Role,
        ResourceType::RouteTable,
        ResourceType::SecurityGroup,
        ResourceType::StorageObject,
        ResourceType::Subnet,
        ResourceType::TargetGroup,
        ResourceType::Topic,
        ResourceType::User,
        ResourceType::Volume,
        ResourceType::Vpc,
        ResourceType::Zone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Bucket => "bucket",
            ResourceType::Database => "database",
            ResourceType::ElasticIp => "elasticip",
            ResourceType::Function => "function",
            ResourceType::Group => "group",
            ResourceType::Instance => "instance",
            ResourceType::InternetGateway => "internetgateway",
            ResourceType::KeyPair => "keypair",
            ResourceType::LoadBalancer => "loadbalancer",
            ResourceType::Policy => "policy",
            ResourceType::Queue => "queue",
            ResourceType::Record => "record",
            ResourceType::Region => "region",
            ResourceType::Role => "role",
            ResourceType::RouteTable => "routetable",
            ResourceType::SecurityGroup => "securitygroup",
            ResourceType::StorageObject => "storageobject",
            ResourceType::Subnet => "subnet",
            ResourceType::TargetGroup => "targetgroup",
            ResourceType::Topic => "topic",
            ResourceType::User => "user",
            ResourceType::Volume => "volume",
            ResourceType::Vpc => "vpc",
            ResourceType::Zone => "zone",
        }
    }
}

impl Ord for ResourceType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for ResourceType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = StratusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        ResourceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| StratusError::UnknownResourceType {
                name: s.to_string(),
            })
    }
}

/// A loosely typed scalar attached to a node
///
/// Absence is modelled with `Option<PropertyValue>` by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// A timestamp, kept with the literal it was read from
    Time { at: DateTime<Utc>, raw: String },
}

impl PropertyValue {
    /// Convert a decoded JSON value. `null` is absent; arrays and objects
    /// keep their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(PropertyValue::Text(b.to_string())),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(PropertyValue::Int(i)),
                None => n.as_f64().map(PropertyValue::Float),
            },
            serde_json::Value::String(s) => Some(PropertyValue::from_text(s)),
            other => Some(PropertyValue::Text(other.to_string())),
        }
    }

    /// Text that looks like an RFC 3339 timestamp becomes `Time`
    pub fn from_text(s: &str) -> Self {
        match DateTime::parse_from_rfc3339(s) {
            Ok(t) => PropertyValue::Time {
                at: t.with_timezone(&Utc),
                raw: s.to_string(),
            },
            Err(_) => PropertyValue::Text(s.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PropertyValue::Int(i) => serde_json::Value::from(*i),
            PropertyValue::Float(f) => serde_json::Value::from(*f),
            PropertyValue::Text(s) | PropertyValue::Time { raw: s, .. } => {
                serde_json::Value::from(s.as_str())
            }
        }
    }

    /// Integer view, parsing text when needed
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            PropertyValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Floating-point view, parsing text when needed
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Text(s) => s.trim().parse().ok(),
            PropertyValue::Time { .. } => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            PropertyValue::Time { at, .. } => Some(*at),
            PropertyValue::Text(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Int(i) => write!(f, "{}", i),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::Text(s) | PropertyValue::Time { raw: s, .. } => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::from_text(s)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::from_text(&s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

/// Identity of a node: its type plus an opaque id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub resource_type: ResourceType,
    pub id: String,
}

impl NodeRef {
    pub fn new(resource_type: ResourceType, id: impl Into<String>) -> Self {
        Self {
            resource_type,
            id: id.into(),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}<{}>", self.resource_type, self.id)
    }
}

/// A materialized entity: identity plus its properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) reference: NodeRef,
    pub(crate) properties: BTreeMap<String, PropertyValue>,
}

impl Node {
    pub(crate) fn new(reference: NodeRef) -> Self {
        Self {
            reference,
            properties: BTreeMap::new(),
        }
    }

    pub fn reference(&self) -> &NodeRef {
        &self.reference
    }

    pub fn id(&self) -> &str {
        &self.reference.id
    }

    pub fn resource_type(&self) -> ResourceType {
        self.reference.resource_type
    }

    /// Properties ordered by name
    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    /// Look up a property, preferring an exact name match over a
    /// case-insensitive one
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key).or_else(|| {
            self.properties
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    /// The `Name` property when present and non-empty, else the id
    pub fn display_name(&self) -> String {
        self.name().unwrap_or_else(|| self.id().to_string())
    }

    /// The non-empty `Name` property, if any
    pub fn name(&self) -> Option<String> {
        self.properties
            .get(NAME_PROPERTY)
            .map(|v| v.to_string())
            .filter(|n| !n.is_empty())
    }
}

pub const NAME_PROPERTY: &str = "Name";

/// What an assertion says about its subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "predicate", rename_all = "snake_case")]
pub enum Predicate {
    HasType {
        resource_type: ResourceType,
    },
    Property {
        key: String,
        value: Option<PropertyValue>,
    },
    ParentOf {
        child: NodeRef,
    },
}

/// One atomic fact about a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: NodeRef,
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl Triple {
    pub fn has_type(subject: NodeRef) -> Self {
        let resource_type = subject.resource_type;
        Self {
            subject,
            predicate: Predicate::HasType { resource_type },
        }
    }

    pub fn property(subject: NodeRef, key: impl Into<String>, value: Option<PropertyValue>) -> Self {
        Self {
            subject,
            predicate: Predicate::Property {
                key: key.into(),
                value,
            },
        }
    }

    pub fn parent_of(parent: NodeRef, child: NodeRef) -> Self {
        Self {
            subject: parent,
            predicate: Predicate::ParentOf { child },
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.predicate, Predicate::ParentOf { .. })
    }

    /// Canonical text form; two triples are equal iff their keys are equal
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::HasType { resource_type } => write!(
                f,
                "{}\t\"has_type\"@[]\t\"/{}\"^^type:text",
                self.subject, resource_type
            ),
            Predicate::Property { key, value } => {
                let literal = serde_json::json!({
                    "Key": key,
                    "Value": value.as_ref().map(PropertyValue::to_json),
                });
                write!(
                    f,
                    "{}\t\"property\"@[]\t\"{}\"^^type:text",
                    self.subject, literal
                )
            }
            Predicate::ParentOf { child } => {
                write!(f, "{}\t\"parent_of\"@[]\t{}", self.subject, child)
            }
        }
    }
}
