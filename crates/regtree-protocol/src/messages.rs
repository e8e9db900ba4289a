//! Inbound commands and outbound events.
//!
//! The JSON encoding is intentionally small and stable: a `command` tag
//! plus camelCase payload fields, matching what the host shell posts over
//! its message channel. Unknown command tags fail decoding.

use crate::error::ProtocolError;
use crate::record::NodeRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Host → panel commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostCommand {
    /// Show progress UI and hide the tree while a snapshot is assembled.
    #[serde(rename_all = "camelCase")]
    UpdateLoadingProgress { step: String, percent: u8 },

    /// Bulk replace of the tree and (optionally) the membership index.
    #[serde(rename_all = "camelCase")]
    UpdateTree {
        tree_items: Vec<NodeRecord>,
        is_empty: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        solution_memberships: Option<HashMap<String, Vec<String>>>,
    },

    /// Replace one node's own fields, keeping its children.
    #[serde(rename_all = "camelCase")]
    UpdateNode {
        node_id: String,
        updated_node: NodeRecord,
    },

    /// Replace a node together with all of its descendants.
    #[serde(rename_all = "camelCase")]
    UpdateSubtree {
        node_id: String,
        updated_subtree: NodeRecord,
    },

    /// Insert a node (as a root when `parentId` is null) and reveal it.
    #[serde(rename_all = "camelCase")]
    AddNode {
        #[serde(default)]
        parent_id: Option<String>,
        node: NodeRecord,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        solution_id: Option<String>,
    },

    /// Delete a node wherever it occurs.
    #[serde(rename_all = "camelCase")]
    RemoveNode { node_id: String },

    /// Switch the active solution scope (null clears it).
    #[serde(rename_all = "camelCase")]
    SolutionFilterChanged {
        #[serde(default)]
        solution_id: Option<String>,
    },

    /// Reveal, select, and re-announce a node (post-create helper).
    #[serde(rename_all = "camelCase")]
    SelectAndShowDetails {
        node_id: String,
        node_type: String,
    },
}

/// Panel → host events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ViewEvent {
    /// Selection moved to this node.
    #[serde(rename_all = "camelCase")]
    SelectNode { node_id: String, node_type: String },
}

impl HostCommand {
    /// Decode a command from its wire JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this command as wire JSON.
    pub fn to_json_string(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ViewEvent {
    /// Decode an event from its wire JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this event as wire JSON.
    pub fn to_json_string(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tags_are_camel_case() {
        let cmd = HostCommand::RemoveNode {
            node_id: "s1".to_string(),
        };
        let json = cmd.to_json_string().unwrap();
        assert!(json.contains(r#""command":"removeNode""#));
        assert!(json.contains(r#""nodeId":"s1""#));
    }

    #[test]
    fn decodes_update_tree() {
        let json = r#"{
            "command": "updateTree",
            "treeItems": [
                {"id": "a1", "type": "assembly", "displayName": "Asm"}
            ],
            "isEmpty": false,
            "solutionMemberships": {"sol1": ["a1"]}
        }"#;
        let cmd = HostCommand::from_json_str(json).unwrap();
        match cmd {
            HostCommand::UpdateTree {
                tree_items,
                is_empty,
                solution_memberships,
            } => {
                assert_eq!(tree_items.len(), 1);
                assert!(!is_empty);
                assert_eq!(solution_memberships.unwrap()["sol1"], vec!["a1"]);
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn decodes_add_node_with_null_parent() {
        let json = r#"{
            "command": "addNode",
            "parentId": null,
            "node": {"id": "p1", "type": "package", "displayName": "Pkg"}
        }"#;
        let cmd = HostCommand::from_json_str(json).unwrap();
        match cmd {
            HostCommand::AddNode {
                parent_id,
                solution_id,
                ..
            } => {
                assert_eq!(parent_id, None);
                assert_eq!(solution_id, None);
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn decodes_solution_filter_cleared() {
        let json = r#"{"command": "solutionFilterChanged", "solutionId": null}"#;
        let cmd = HostCommand::from_json_str(json).unwrap();
        assert_eq!(
            cmd,
            HostCommand::SolutionFilterChanged { solution_id: None }
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        let json = r#"{"command": "openModal", "nodeId": "x"}"#;
        assert!(matches!(
            HostCommand::from_json_str(json),
            Err(ProtocolError::Json(_))
        ));
    }

    #[test]
    fn commands_round_trip() {
        let commands = vec![
            HostCommand::UpdateLoadingProgress {
                step: "Loading assemblies".to_string(),
                percent: 60,
            },
            HostCommand::RemoveNode {
                node_id: "s1".to_string(),
            },
            HostCommand::SelectAndShowDetails {
                node_id: "s1".to_string(),
                node_type: "step".to_string(),
            },
        ];
        for cmd in commands {
            let json = cmd.to_json_string().unwrap();
            assert_eq!(HostCommand::from_json_str(&json).unwrap(), cmd);
        }
    }

    #[test]
    fn select_event_round_trips() {
        let event = ViewEvent::SelectNode {
            node_id: "s1".to_string(),
            node_type: "step".to_string(),
        };
        let json = event.to_json_string().unwrap();
        assert!(json.contains(r#""command":"selectNode""#));
        assert_eq!(ViewEvent::from_json_str(&json).unwrap(), event);
    }
}
