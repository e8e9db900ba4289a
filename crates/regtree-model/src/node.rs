//! Registration-tree nodes.
//!
//! A [`TreeNode`] is one entry in the registration hierarchy (package →
//! assembly → plugin type → step → image, plus the endpoint-style kinds at
//! assembly level). Kind-specific metadata lives in the [`NodeData`] tagged
//! union so filters and renderers match exhaustively instead of probing a
//! property bag.
//!
//! # Example
//!
//! ```
//! use regtree_model::{NodeData, TreeNode};
//!
//! let assembly = TreeNode::new("a1", "ContosoPlugins", NodeData::assembly())
//!     .child(TreeNode::new("t1", "Contoso.AccountPlugin", NodeData::PluginType));
//!
//! assert_eq!(assembly.children().len(), 1);
//! assert!(assembly.kind().is_container());
//! ```

use bitflags::bitflags;
use std::fmt;

/// Stable, globally unique node identifier.
///
/// Ids are producer-assigned strings (typically record GUIDs) and survive
/// re-renders; they key expansion, selection, and membership state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// Create an id from any string-like value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Node kind discriminator.
///
/// Closed set; the wire names are the camelCase forms returned by
/// [`NodeKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Package,
    Assembly,
    PluginType,
    Step,
    Image,
    WebHook,
    ServiceEndpoint,
    DataProvider,
    CustomApi,
}

impl NodeKind {
    /// All kinds, in hierarchy order.
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Package,
        NodeKind::Assembly,
        NodeKind::PluginType,
        NodeKind::Step,
        NodeKind::Image,
        NodeKind::WebHook,
        NodeKind::ServiceEndpoint,
        NodeKind::DataProvider,
        NodeKind::CustomApi,
    ];

    /// Wire/display name for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Package => "package",
            NodeKind::Assembly => "assembly",
            NodeKind::PluginType => "pluginType",
            NodeKind::Step => "step",
            NodeKind::Image => "image",
            NodeKind::WebHook => "webHook",
            NodeKind::ServiceEndpoint => "serviceEndpoint",
            NodeKind::DataProvider => "dataProvider",
            NodeKind::CustomApi => "customApi",
        }
    }

    /// Parse a wire name back into a kind.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Whether nodes of this kind act as containers.
    ///
    /// Container kinds participate in the empty-container suppression rules:
    /// a container that loses all children to a filter is dropped, while one
    /// that was empty to begin with is kept. `Image` is the only pure leaf.
    #[must_use]
    pub const fn is_container(self) -> bool {
        !matches!(self, NodeKind::Image)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage a step is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    PreValidation,
    PreOperation,
    MainOperation,
    #[default]
    PostOperation,
}

impl Stage {
    /// Numeric pipeline code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Stage::PreValidation => 10,
            Stage::PreOperation => 20,
            Stage::MainOperation => 30,
            Stage::PostOperation => 40,
        }
    }

    /// Decode a wire pipeline code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            10 => Some(Stage::PreValidation),
            20 => Some(Stage::PreOperation),
            30 => Some(Stage::MainOperation),
            40 => Some(Stage::PostOperation),
            _ => None,
        }
    }

    /// Short label used in step badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Stage::PreValidation => "PreValidation",
            Stage::PreOperation => "PreOperation",
            Stage::MainOperation => "MainOperation",
            Stage::PostOperation => "PostOperation",
        }
    }
}

/// Step execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    #[default]
    Synchronous,
    Asynchronous,
}

impl ExecutionMode {
    /// Numeric mode code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            ExecutionMode::Synchronous => 0,
            ExecutionMode::Asynchronous => 1,
        }
    }

    /// Decode a wire mode code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ExecutionMode::Synchronous),
            1 => Some(ExecutionMode::Asynchronous),
            _ => None,
        }
    }

    /// Short label used in step badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ExecutionMode::Synchronous => "Sync",
            ExecutionMode::Asynchronous => "Async",
        }
    }
}

bitflags! {
    /// Host-action capabilities attached to a node.
    ///
    /// Consumed by the context-menu descriptor; a flag absent on the wire is
    /// simply unset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const ENABLE = 1 << 0;
        const DISABLE = 1 << 1;
        const UPDATE = 1 << 2;
        const DELETE = 1 << 3;
        const REGISTER_STEP = 1 << 4;
        const REGISTER_IMAGE = 1 << 5;
    }
}

/// Metadata for `step` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepData {
    /// Whether the step is currently enabled.
    pub enabled: bool,
    /// Hidden steps are internal registrations suppressed by the
    /// hidden-step filter.
    pub hidden: bool,
    pub stage: Stage,
    pub mode: ExecutionMode,
}

/// Metadata for `assembly` nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyData {
    /// Owning package, when the assembly was delivered inside one.
    pub package_id: Option<NodeId>,
}

/// Kind-specific node payload.
///
/// The variant doubles as the node's kind; see [`NodeData::kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Package,
    Assembly(AssemblyData),
    PluginType,
    Step(StepData),
    Image,
    WebHook,
    ServiceEndpoint,
    DataProvider,
    CustomApi,
}

impl NodeData {
    /// Assembly payload with no owning package.
    #[must_use]
    pub fn assembly() -> Self {
        NodeData::Assembly(AssemblyData::default())
    }

    /// Step payload with default (enabled, visible, post-op sync) metadata.
    #[must_use]
    pub fn step() -> Self {
        NodeData::Step(StepData {
            enabled: true,
            ..StepData::default()
        })
    }

    /// The kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            NodeData::Package => NodeKind::Package,
            NodeData::Assembly(_) => NodeKind::Assembly,
            NodeData::PluginType => NodeKind::PluginType,
            NodeData::Step(_) => NodeKind::Step,
            NodeData::Image => NodeKind::Image,
            NodeData::WebHook => NodeKind::WebHook,
            NodeData::ServiceEndpoint => NodeKind::ServiceEndpoint,
            NodeData::DataProvider => NodeKind::DataProvider,
            NodeData::CustomApi => NodeKind::CustomApi,
        }
    }
}

/// A node in the registration hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    id: NodeId,
    label: String,
    managed: bool,
    icon: Option<String>,
    caps: Capabilities,
    data: NodeData,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a node with the given id, display label, and payload.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, data: NodeData) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            managed: false,
            icon: None,
            caps: Capabilities::empty(),
            data,
            children: Vec::new(),
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: TreeNode) -> Self {
        self.children.push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<TreeNode>) -> Self {
        self.children = nodes;
        self
    }

    /// Mark the node as managed.
    #[must_use]
    pub fn with_managed(mut self, managed: bool) -> Self {
        self.managed = managed;
        self
    }

    /// Attach a producer-supplied icon hint.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the capability flags.
    #[must_use]
    pub fn with_caps(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.managed
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn caps(&self) -> Capabilities {
        self.caps
    }

    #[must_use]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Step payload, when this is a step node.
    #[must_use]
    pub fn step_data(&self) -> Option<&StepData> {
        match &self.data {
            NodeData::Step(step) => Some(step),
            _ => None,
        }
    }

    /// Replace this node's own fields, keeping its current children.
    ///
    /// The children of `replacement` are discarded; callers that want a full
    /// subtree swap use [`TreeNode::replace_subtree`].
    pub fn replace_fields(&mut self, replacement: TreeNode) {
        let TreeNode {
            id,
            label,
            managed,
            icon,
            caps,
            data,
            children: _,
        } = replacement;
        self.id = id;
        self.label = label;
        self.managed = managed;
        self.icon = icon;
        self.caps = caps;
        self.data = data;
    }

    /// Replace this node and its entire children list.
    pub fn replace_subtree(&mut self, replacement: TreeNode) {
        *self = replacement;
    }

    /// Total node count of this subtree, including this node.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }

    /// Clone this node's own fields with an empty children list.
    ///
    /// Filters use this to rebuild container shape around an independently
    /// filtered child list without copying whole subtrees first.
    #[must_use]
    pub fn clone_shallow(&self) -> TreeNode {
        TreeNode {
            id: self.id.clone(),
            label: self.label.clone(),
            managed: self.managed,
            icon: self.icon.clone(),
            caps: self.caps,
            data: self.data.clone(),
            children: Vec::new(),
        }
    }
}
