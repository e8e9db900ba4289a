//! Markup assembly.
//!
//! Builds the HTML fragments a webview shell injects: the nested full tree,
//! the virtual window with its spacers, and the empty/progress states.
//! Markup is write-only output; interaction and state questions go back
//! through the controller, never through the produced HTML.

use crate::row::{Badge, RowVisual, ToggleMarker, compose_row};
use regtree_engine::{RenderMode, TreeView};
use regtree_model::TreeNode;
use std::fmt::Write;

/// Escape text for safe insertion into markup. Display names are
/// producer-controlled and must always pass through here.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the tree in whichever mode the current row count calls for.
#[must_use]
pub fn render_tree(view: &TreeView) -> String {
    match view.mode() {
        RenderMode::Full => render_full(view),
        RenderMode::Virtual => render_virtual(view),
    }
}

/// Nested markup for the whole filtered view.
///
/// Rows hidden by the active search stay in the markup with a hiding class;
/// toggling the term only flips visibility instead of rebuilding the tree.
fn render_full(view: &TreeView) -> String {
    let mut out = String::new();
    for root in view.view_roots() {
        render_subtree(root, 0, view, &mut out);
    }
    out
}

fn render_subtree(node: &TreeNode, depth: usize, view: &TreeView, out: &mut String) {
    let row = compose_row(node, depth, view);
    let expanded = node.has_children() && view.is_expanded(node.id());

    let _ = write!(out, r#"<div class="tree-node" data-id="{}">"#, escape(row.id.as_str()));
    push_row(&row, out);
    if expanded {
        out.push_str(r#"<div class="children">"#);
        for child in node.children() {
            render_subtree(child, depth + 1, view, out);
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

/// Flat markup for the window around the viewport, bracketed by two spacers
/// that keep the scrollbar honest about the rows not materialized.
fn render_virtual(view: &TreeView) -> String {
    let rows = view.searched_rows();
    let window = view.current_window();
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<div class="spacer" style="height:{}px"></div>"#,
        window.spacer_top
    );
    for flat in &rows[window.start..window.end] {
        let row = compose_row(flat.node, flat.depth, view);
        push_row(&row, &mut out);
    }
    let _ = write!(
        out,
        r#"<div class="spacer" style="height:{}px"></div>"#,
        window.spacer_bottom
    );
    out
}

/// One row. Flat by construction: depth appears only as an attribute and
/// as computed left padding.
fn push_row(row: &RowVisual, out: &mut String) {
    let mut class = String::from("tree-row");
    for token in row.classes.tokens() {
        class.push(' ');
        class.push_str(token);
    }

    let _ = write!(
        out,
        r#"<div class="{}" data-id="{}" data-kind="{}" data-depth="{}" style="padding-left:{}px">"#,
        class,
        escape(row.id.as_str()),
        row.kind.as_str(),
        row.depth,
        row.indent_px,
    );

    let twistie = match row.toggle {
        ToggleMarker::Expanded => r#"<span class="twistie expanded"></span>"#,
        ToggleMarker::Collapsed => r#"<span class="twistie collapsed"></span>"#,
        ToggleMarker::Leaf => r#"<span class="twistie leaf"></span>"#,
    };
    out.push_str(twistie);

    let _ = write!(out, r#"<span class="icon icon-{}"></span>"#, escape(&row.icon));
    let _ = write!(out, r#"<span class="label">{}</span>"#, escape(&row.label));

    match &row.badge {
        Some(Badge::ChildCount(count)) => {
            let _ = write!(out, r#"<span class="badge">{count}</span>"#);
        }
        Some(Badge::StepSummary { stage, mode }) => {
            let _ = write!(
                out,
                r#"<span class="badge">{}, {}</span>"#,
                stage.label(),
                mode.label()
            );
        }
        None => {}
    }
    out.push_str("</div>");
}

/// Presentation shown when the source has no registrations at all.
#[must_use]
pub fn empty_state() -> String {
    r#"<div class="empty-state">No plugin registrations found</div>"#.to_string()
}

/// Loading presentation shown while the host assembles a snapshot.
#[must_use]
pub fn loading_progress(step: &str, percent: u8) -> String {
    let percent = percent.min(100);
    format!(
        r#"<div class="progress"><span class="progress-label">{} ({}%)</span><div class="progress-bar" style="width:{}%"></div></div>"#,
        escape(step),
        percent,
        percent
    )
}
