//! Command dispatch into one panel's controller.
//!
//! [`PanelBridge`] is the single entry point a host shell drives: inbound
//! JSON commands go through [`PanelBridge::handle_json`], DOM interactions
//! through the facade methods, and both return an [`Outcome`] — the
//! presentation effects to replay plus the events to post back to the host
//! process.

use crate::error::ProtocolError;
use crate::messages::{HostCommand, ViewEvent};
use crate::record::NodeRecord;
use regtree_engine::{Effect, TreeView, ViewConfig};
use regtree_model::{NodeId, SolutionId, TreeNode};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// What one dispatch produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    /// Presentation follow-ups for the shell, in order.
    pub effects: Vec<Effect>,
    /// Events to post back to the host process.
    pub events: Vec<ViewEvent>,
}

impl Outcome {
    /// Split engine effects into presentation effects and outbound events.
    fn from_effects(effects: Vec<Effect>) -> Self {
        let mut out = Outcome::default();
        for effect in effects {
            match effect {
                Effect::SelectionChanged { id, kind } => {
                    out.events.push(ViewEvent::SelectNode {
                        node_id: id.as_str().to_string(),
                        node_type: kind.as_str().to_string(),
                    });
                }
                other => out.effects.push(other),
            }
        }
        out
    }

    /// Nothing to replay and nothing to post.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty() && self.events.is_empty()
    }
}

/// One webview panel: a controller plus its message boundary.
#[derive(Debug, Default)]
pub struct PanelBridge {
    view: TreeView,
}

impl PanelBridge {
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        Self {
            view: TreeView::new(config),
        }
    }

    #[must_use]
    pub fn view(&self) -> &TreeView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TreeView {
        &mut self.view
    }

    /// Decode and dispatch one raw message from the host channel.
    pub fn handle_json(&mut self, json: &str) -> Result<Outcome, ProtocolError> {
        self.handle(HostCommand::from_json_str(json)?)
    }

    /// Dispatch one decoded command.
    pub fn handle(&mut self, command: HostCommand) -> Result<Outcome, ProtocolError> {
        debug!(command = command_name(&command), "dispatching host command");
        let effects = match command {
            HostCommand::UpdateLoadingProgress { step, percent } => {
                vec![Effect::ShowProgress { step, percent }]
            }
            HostCommand::UpdateTree {
                tree_items,
                is_empty,
                solution_memberships,
            } => {
                let roots = convert_nodes(tree_items)?;
                let memberships = solution_memberships.map(convert_memberships);
                self.view.apply_snapshot(roots, is_empty, memberships)
            }
            HostCommand::UpdateNode {
                node_id,
                updated_node,
            } => {
                let node = TreeNode::try_from(updated_node)?;
                self.view.update_node(&NodeId::new(node_id), node)
            }
            HostCommand::UpdateSubtree {
                node_id,
                updated_subtree,
            } => {
                let node = TreeNode::try_from(updated_subtree)?;
                self.view.update_subtree(&NodeId::new(node_id), node)
            }
            HostCommand::AddNode {
                parent_id,
                node,
                solution_id,
            } => {
                let node = TreeNode::try_from(node)?;
                self.view.add_node(
                    parent_id.map(NodeId::new).as_ref(),
                    node,
                    solution_id.map(SolutionId::new),
                )
            }
            HostCommand::RemoveNode { node_id } => self.view.remove_node(&NodeId::new(node_id)),
            HostCommand::SolutionFilterChanged { solution_id } => {
                self.view.set_solution(solution_id.map(SolutionId::new))
            }
            // The payload's nodeType is advisory; the model owns the kind.
            HostCommand::SelectAndShowDetails { node_id, .. } => {
                self.view.select_and_reveal(&NodeId::new(node_id))
            }
        };
        Ok(Outcome::from_effects(effects))
    }

    // ────────────────────────────────────────────────────────────────────
    // Interaction facade (DOM → controller)
    // ────────────────────────────────────────────────────────────────────

    pub fn activate_row(&mut self, id: &NodeId) -> Outcome {
        Outcome::from_effects(self.view.activate_row(id))
    }

    pub fn toggle_expansion(&mut self, id: &NodeId) -> Outcome {
        Outcome::from_effects(self.view.toggle_expansion(id))
    }

    pub fn expand_all(&mut self) -> Outcome {
        Outcome::from_effects(self.view.expand_all())
    }

    pub fn collapse_all(&mut self) -> Outcome {
        Outcome::from_effects(self.view.collapse_all())
    }

    pub fn set_search(&mut self, query: Option<String>) -> Outcome {
        Outcome::from_effects(self.view.set_search(query))
    }

    pub fn set_hide_hidden_steps(&mut self, hide: bool) -> Outcome {
        Outcome::from_effects(self.view.set_hide_hidden_steps(hide))
    }

    pub fn set_hide_vendor_assemblies(&mut self, hide: bool) -> Outcome {
        Outcome::from_effects(self.view.set_hide_vendor_assemblies(hide))
    }

    pub fn set_viewport_height(&mut self, px: u32) {
        self.view.set_viewport_height(px);
    }

    pub fn on_scroll(&mut self, scroll_top: u32) {
        self.view.on_scroll(scroll_top);
    }

    /// Animation-frame tick; see [`TreeView::on_frame`].
    pub fn on_frame(&mut self) -> Outcome {
        Outcome::from_effects(self.view.on_frame())
    }

    // ────────────────────────────────────────────────────────────────────
    // Rendering facade
    // ────────────────────────────────────────────────────────────────────

    /// Markup for the current tree, in whichever mode applies.
    #[must_use]
    pub fn render_markup(&self) -> String {
        regtree_render::render_tree(&self.view)
    }

    #[must_use]
    pub fn empty_state_markup(&self) -> String {
        regtree_render::empty_state()
    }

    #[must_use]
    pub fn progress_markup(&self, step: &str, percent: u8) -> String {
        regtree_render::loading_progress(step, percent)
    }
}

fn command_name(command: &HostCommand) -> &'static str {
    match command {
        HostCommand::UpdateLoadingProgress { .. } => "updateLoadingProgress",
        HostCommand::UpdateTree { .. } => "updateTree",
        HostCommand::UpdateNode { .. } => "updateNode",
        HostCommand::UpdateSubtree { .. } => "updateSubtree",
        HostCommand::AddNode { .. } => "addNode",
        HostCommand::RemoveNode { .. } => "removeNode",
        HostCommand::SolutionFilterChanged { .. } => "solutionFilterChanged",
        HostCommand::SelectAndShowDetails { .. } => "selectAndShowDetails",
    }
}

fn convert_nodes(records: Vec<NodeRecord>) -> Result<Vec<TreeNode>, ProtocolError> {
    records.into_iter().map(TreeNode::try_from).collect()
}

fn convert_memberships(
    raw: HashMap<String, Vec<String>>,
) -> HashMap<SolutionId, HashSet<NodeId>> {
    raw.into_iter()
        .map(|(solution, members)| {
            (
                SolutionId::new(solution),
                members.into_iter().map(NodeId::new).collect(),
            )
        })
        .collect()
}
