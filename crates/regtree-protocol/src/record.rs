//! Wire shape of tree nodes.
//!
//! The wire format is intentionally permissive where the model is strict:
//! `metadata` is a flat record of optional fields shared by every kind, and
//! every flag defaults when absent. Conversion into [`TreeNode`] is the
//! validation point — an unknown `type` is rejected, while out-of-range
//! stage/mode codes fall back to their defaults the way the original
//! untyped consumer behaved.

use crate::error::ProtocolError;
use regtree_model::{
    AssemblyData, Capabilities, ExecutionMode, NodeData, NodeId, NodeKind, Stage, StepData,
    TreeNode,
};
use serde::{Deserialize, Serialize};

/// One node as it travels over the message channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub display_name: String,
    #[serde(default)]
    pub is_managed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "MetadataRecord::is_empty")]
    pub metadata: MetadataRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRecord>,
}

/// Kind-specific side channel, flattened to optional fields on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_disable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_register_step: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_register_image: Option<bool>,
}

impl MetadataRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &MetadataRecord::default()
    }

    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        let mut set = |flag: Capabilities, value: Option<bool>| {
            if value.unwrap_or(false) {
                caps |= flag;
            }
        };
        set(Capabilities::ENABLE, self.can_enable);
        set(Capabilities::DISABLE, self.can_disable);
        set(Capabilities::UPDATE, self.can_update);
        set(Capabilities::DELETE, self.can_delete);
        set(Capabilities::REGISTER_STEP, self.can_register_step);
        set(Capabilities::REGISTER_IMAGE, self.can_register_image);
        caps
    }
}

impl TryFrom<NodeRecord> for TreeNode {
    type Error = ProtocolError;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        let kind = NodeKind::parse(&record.node_type)
            .ok_or_else(|| ProtocolError::UnknownNodeType(record.node_type.clone()))?;

        let meta = &record.metadata;
        let data = match kind {
            NodeKind::Step => NodeData::Step(StepData {
                enabled: meta.is_enabled.unwrap_or(true),
                hidden: meta.is_hidden.unwrap_or(false),
                stage: meta
                    .stage
                    .and_then(Stage::from_code)
                    .unwrap_or_default(),
                mode: meta
                    .mode
                    .and_then(ExecutionMode::from_code)
                    .unwrap_or_default(),
            }),
            NodeKind::Assembly => NodeData::Assembly(AssemblyData {
                package_id: meta.package_id.clone().map(NodeId::new),
            }),
            NodeKind::Package => NodeData::Package,
            NodeKind::PluginType => NodeData::PluginType,
            NodeKind::Image => NodeData::Image,
            NodeKind::WebHook => NodeData::WebHook,
            NodeKind::ServiceEndpoint => NodeData::ServiceEndpoint,
            NodeKind::DataProvider => NodeData::DataProvider,
            NodeKind::CustomApi => NodeData::CustomApi,
        };
        let caps = record.metadata.capabilities();

        let children: Vec<TreeNode> = record
            .children
            .into_iter()
            .map(TreeNode::try_from)
            .collect::<Result<_, _>>()?;

        let mut node = TreeNode::new(record.id, record.display_name, data)
            .with_managed(record.is_managed)
            .with_caps(caps)
            .with_children(children);
        if let Some(icon) = record.icon {
            node = node.with_icon(icon);
        }
        Ok(node)
    }
}

impl From<&TreeNode> for NodeRecord {
    fn from(node: &TreeNode) -> Self {
        let caps = node.caps();
        let flag = |c: Capabilities| caps.contains(c).then_some(true);

        let mut metadata = MetadataRecord {
            can_enable: flag(Capabilities::ENABLE),
            can_disable: flag(Capabilities::DISABLE),
            can_update: flag(Capabilities::UPDATE),
            can_delete: flag(Capabilities::DELETE),
            can_register_step: flag(Capabilities::REGISTER_STEP),
            can_register_image: flag(Capabilities::REGISTER_IMAGE),
            ..MetadataRecord::default()
        };
        match node.data() {
            NodeData::Step(step) => {
                metadata.is_enabled = Some(step.enabled);
                metadata.is_hidden = Some(step.hidden);
                metadata.stage = Some(step.stage.code());
                metadata.mode = Some(step.mode.code());
            }
            NodeData::Assembly(assembly) => {
                metadata.package_id = assembly
                    .package_id
                    .as_ref()
                    .map(|id| id.as_str().to_string());
            }
            _ => {}
        }

        NodeRecord {
            id: node.id().as_str().to_string(),
            node_type: node.kind().as_str().to_string(),
            display_name: node.label().to_string(),
            is_managed: node.is_managed(),
            icon: node.icon().map(str::to_string),
            metadata,
            children: node.children().iter().map(NodeRecord::from).collect(),
        }
    }
}
