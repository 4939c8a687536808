//! Resource model produced by probing an API description

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// REST action role, independent of the HTTP method that serves it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pseudonym {
    /// Usually POST on a collection path
    Create,
    /// Usually GET on a singleton path
    Show,
    /// Usually GET on a collection path
    Index,
    /// Usually PUT, PATCH, or POST on a singleton path
    Update,
    /// Usually DELETE on a singleton path
    Delete,
}

/// Per-pseudonym probing configuration
#[derive(Debug)]
pub struct PseudonymProfile {
    /// Acceptable HTTP methods, highest priority first
    pub methods: &'static [HttpMethod],
    /// Status codes treated as a successful response
    pub success_codes: &'static [u16],
    /// Whether the path must end in a path parameter
    pub singleton: bool,
}

static CREATE_PROFILE: PseudonymProfile = PseudonymProfile {
    methods: &[HttpMethod::Post],
    success_codes: &[201, 200],
    singleton: false,
};

static SHOW_PROFILE: PseudonymProfile = PseudonymProfile {
    methods: &[HttpMethod::Get],
    success_codes: &[200, 203],
    singleton: true,
};

static INDEX_PROFILE: PseudonymProfile = PseudonymProfile {
    methods: &[HttpMethod::Get],
    success_codes: &[200, 203],
    singleton: false,
};

static UPDATE_PROFILE: PseudonymProfile = PseudonymProfile {
    methods: &[HttpMethod::Put, HttpMethod::Patch, HttpMethod::Post],
    success_codes: &[200],
    singleton: true,
};

// DELETE first; some APIs delete through POST/PUT/PATCH on the instance path.
static DELETE_PROFILE: PseudonymProfile = PseudonymProfile {
    methods: &[
        HttpMethod::Delete,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
    ],
    success_codes: &[200, 204],
    singleton: true,
};

impl Pseudonym {
    /// Order in which a path is probed for each pseudonym
    pub const PROBE_ORDER: [Pseudonym; 5] = [
        Pseudonym::Show,
        Pseudonym::Delete,
        Pseudonym::Update,
        Pseudonym::Index,
        Pseudonym::Create,
    ];

    pub fn profile(self) -> &'static PseudonymProfile {
        match self {
            Pseudonym::Create => &CREATE_PROFILE,
            Pseudonym::Show => &SHOW_PROFILE,
            Pseudonym::Index => &INDEX_PROFILE,
            Pseudonym::Update => &UPDATE_PROFILE,
            Pseudonym::Delete => &DELETE_PROFILE,
        }
    }

    pub fn methods(self) -> &'static [HttpMethod] {
        self.profile().methods
    }

    pub fn success_codes(self) -> &'static [u16] {
        self.profile().success_codes
    }

    pub fn requires_singleton(self) -> bool {
        self.profile().singleton
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pseudonym::Create => "create",
            Pseudonym::Show => "show",
            Pseudonym::Index => "index",
            Pseudonym::Update => "update",
            Pseudonym::Delete => "delete",
        }
    }
}

impl fmt::Display for Pseudonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP methods an OpenAPI path item can define
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "PUT" => Ok(HttpMethod::Put),
            "POST" => Ok(HttpMethod::Post),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            "PATCH" => Ok(HttpMethod::Patch),
            "TRACE" => Ok(HttpMethod::Trace),
            other => Err(format!("unknown HTTP method: {}", other)),
        }
    }
}

/// Binding between a pseudonym, a method, and a path template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub pseudonym: Pseudonym,
    pub method: HttpMethod,
    pub path: String,
    /// `operationId` of the bound operation, if the document declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

/// Conceptual resource assembled from one or more paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub paths: BTreeSet<String>,
    pub actions: BTreeMap<Pseudonym, Action>,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paths: BTreeSet::new(),
            actions: BTreeMap::new(),
        }
    }

    pub fn action(&self, pseudonym: Pseudonym) -> Option<&Action> {
        self.actions.get(&pseudonym)
    }

    /// Show, create, update, and delete are all present
    pub fn is_crud(&self) -> bool {
        [
            Pseudonym::Show,
            Pseudonym::Create,
            Pseudonym::Update,
            Pseudonym::Delete,
        ]
        .iter()
        .all(|p| self.actions.contains_key(p))
    }

    pub fn can_update(&self) -> bool {
        self.actions.contains_key(&Pseudonym::Update)
    }

    pub fn can_read_identity(&self) -> bool {
        self.actions.contains_key(&Pseudonym::Show)
    }

    pub fn can_read_collection(&self) -> bool {
        self.actions.contains_key(&Pseudonym::Index)
    }
}

/// OpenAPI data type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl AttributeType {
    /// Parse an OpenAPI `type` keyword
    pub fn from_openapi(s: &str) -> Option<Self> {
        match s {
            "string" => Some(AttributeType::String),
            "number" => Some(AttributeType::Number),
            "integer" => Some(AttributeType::Integer),
            "boolean" => Some(AttributeType::Boolean),
            "object" => Some(AttributeType::Object),
            "array" => Some(AttributeType::Array),
            _ => None,
        }
    }

    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            AttributeType::String
                | AttributeType::Number
                | AttributeType::Integer
                | AttributeType::Boolean
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Number => "number",
            AttributeType::Integer => "integer",
            AttributeType::Boolean => "boolean",
            AttributeType::Object => "object",
            AttributeType::Array => "array",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite view of one property across a resource's schema fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Element type, only set for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem_type: Option<AttributeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    /// No create/update fragment has mentioned this attribute (yet)
    pub read_only: bool,
    /// Nested attributes of an object, or of the elements of an object array
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Attribute>,
}

impl Attribute {
    /// Find a direct child by name
    pub fn child(&self, name: &str) -> Option<&Attribute> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn is_simple_array(&self) -> bool {
        self.attr_type == AttributeType::Array
            && self.elem_type.is_some_and(AttributeType::is_primitive)
    }

    pub fn is_composite_array(&self) -> bool {
        self.attr_type == AttributeType::Array && self.elem_type == Some(AttributeType::Object)
    }

    /// Clear `read_only` on this attribute and every descendant
    pub fn mark_writable(&mut self) {
        self.read_only = false;
        for child in &mut self.children {
            child.mark_writable();
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.attr_type)
    }
}

/// User-declared `{path, method}` for one pseudonym
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBinding {
    pub path: String,
    pub method: String,
}

impl ActionBinding {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
        }
    }
}

impl From<&Action> for ActionBinding {
    fn from(action: &Action) -> Self {
        Self {
            path: action.path.clone(),
            method: action.method.to_string(),
        }
    }
}

/// Explicit mapping that replaces heuristic probing for one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub resource_name: String,
    pub actions: BTreeMap<Pseudonym, ActionBinding>,
}

impl Binding {
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            actions: BTreeMap::new(),
        }
    }

    pub fn with_action(mut self, pseudonym: Pseudonym, binding: ActionBinding) -> Self {
        self.actions.insert(pseudonym, binding);
        self
    }
}
