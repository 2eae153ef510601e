use log::debug;

use crate::conflict::{ConflictModel, DecisionMakerId, Node, NodeId};

/// One position in the move tree. `height` is the remaining depth budget;
/// `last_mover` is the decision maker whose move led here.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub node: NodeId,
    pub height: usize,
    pub last_mover: Option<DecisionMakerId>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Unfolds the moves available from `root`. A decision maker never moves twice
/// in a row and, with `only_improving`, moves with `payoff_change < 1` are
/// skipped. The depth counter is the only termination guard.
pub fn build_tree(
    model: &ConflictModel,
    root: &Node,
    excluded_mover: Option<&DecisionMakerId>,
    remaining_depth: usize,
    only_improving: bool,
) -> TreeNode {
    let mut children = Vec::new();
    if remaining_depth > 0 {
        for transition in &root.transitions {
            if only_improving && transition.payoff_change < 1.0 {
                continue;
            }
            if excluded_mover == Some(&transition.decision_maker) {
                continue;
            }
            let Some(target) = model.node(transition.target) else {
                continue;
            };
            children.push(build_tree(
                model,
                target,
                Some(&transition.decision_maker),
                remaining_depth - 1,
                only_improving,
            ));
        }
    }

    TreeNode {
        node: root.id,
        height: remaining_depth,
        last_mover: excluded_mover.cloned(),
        children,
    }
}

pub fn build_rooted(
    model: &ConflictModel,
    root: NodeId,
    depth: usize,
    only_improving: bool,
) -> Option<TreeNode> {
    let root_node = model.node(root)?;
    let tree = build_tree(model, root_node, None, depth, only_improving);
    debug!(
        "built move tree from state {root}: {} positions, depth {}",
        tree.size(),
        tree.depth()
    );
    Some(tree)
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlatPosition {
    pub node: NodeId,
    pub depth: usize,
    pub last_mover: Option<DecisionMakerId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatTree {
    pub positions: Vec<FlatPosition>,
    pub links: Vec<(usize, usize)>,
}

pub fn flatten(tree: &TreeNode) -> FlatTree {
    fn visit(node: &TreeNode, depth: usize, parent: Option<usize>, out: &mut FlatTree) {
        let index = out.positions.len();
        out.positions.push(FlatPosition {
            node: node.node,
            depth,
            last_mover: node.last_mover.clone(),
        });
        if let Some(parent) = parent {
            out.links.push((parent, index));
        }
        for child in &node.children {
            visit(child, depth + 1, Some(index), out);
        }
    }

    let mut flat = FlatTree::default();
    visit(tree, 0, None, &mut flat);
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::fixtures::{chain, three_party, two_cycle};

    fn paths(tree: &TreeNode) -> Vec<Vec<NodeId>> {
        if tree.children.is_empty() {
            return vec![vec![tree.node]];
        }
        tree.children
            .iter()
            .flat_map(paths)
            .map(|mut path| {
                path.insert(0, tree.node);
                path
            })
            .collect()
    }

    fn assert_turn_order(tree: &TreeNode) {
        for child in &tree.children {
            assert!(child.last_mover.is_some());
            assert_ne!(
                tree.last_mover, child.last_mover,
                "a decision maker moved twice in a row"
            );
            assert_turn_order(child);
        }
    }

    #[test]
    fn chain_unfolds_into_a_single_path() {
        let model = chain();
        let tree = build_rooted(&model, NodeId(0), 2, false).expect("root exists");

        assert_eq!(paths(&tree), vec![vec![NodeId(0), NodeId(1), NodeId(2)]]);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.last_mover, None);
        assert_eq!(tree.children[0].last_mover, Some(DecisionMakerId::from("A")));
        assert_turn_order(&tree);
    }

    #[test]
    fn depth_exhaustion_leaves_children_empty() {
        let model = chain();
        let tree = build_rooted(&model, NodeId(0), 1, false).expect("root exists");

        let leaf = &tree.children[0];
        assert_eq!(leaf.node, NodeId(1));
        assert_eq!(leaf.height, 0);
        assert!(leaf.children.is_empty());
    }

    #[test]
    fn cyclic_graph_is_bounded_by_depth() {
        let model = two_cycle();
        for depth in 0..=6 {
            let tree = build_rooted(&model, NodeId(0), depth, false).expect("root exists");
            assert_eq!(tree.depth(), depth);
            assert!(paths(&tree).iter().all(|path| path.len() <= depth + 1));
            assert_turn_order(&tree);
        }
    }

    #[test]
    fn alternating_movers_keep_both_branches() {
        // From the root both movers may act; below that only the other one.
        let model = two_cycle();
        let tree = build_rooted(&model, NodeId(0), 3, false).expect("root exists");

        assert_eq!(tree.children.len(), 2);
        assert!(tree.children.iter().all(|child| child.children.len() == 1));
        assert_eq!(tree.size(), 1 + 2 + 2 + 2);
    }

    #[test]
    fn improving_filter_uses_threshold_of_one() {
        let model = two_cycle();
        let tree = build_rooted(&model, NodeId(0), 2, true).expect("root exists");

        // 0.5 is positive but below the tree threshold.
        assert_eq!(tree.children.len(), 1);
        let child = &tree.children[0];
        assert_eq!(child.last_mover, Some(DecisionMakerId::from("dm0")));
        assert_eq!(child.children.len(), 1);
        assert_eq!(child.children[0].last_mover, Some(DecisionMakerId::from("dm1")));
    }

    #[test]
    fn children_follow_transition_order() {
        let model = three_party();
        let tree = build_rooted(&model, NodeId(0), 1, false).expect("root exists");
        let order = tree.children.iter().map(|child| child.node).collect::<Vec<_>>();
        assert_eq!(order, [NodeId(1), NodeId(2)]);
    }

    #[test]
    fn unknown_root_yields_nothing() {
        assert!(build_rooted(&chain(), NodeId(17), 3, false).is_none());
    }

    #[test]
    fn flatten_is_preorder_with_parent_links() {
        let model = three_party();
        let tree = build_rooted(&model, NodeId(0), 2, false).expect("root exists");
        let flat = flatten(&tree);

        let nodes = flat.positions.iter().map(|p| p.node).collect::<Vec<_>>();
        assert_eq!(nodes, [NodeId(0), NodeId(1), NodeId(3), NodeId(2), NodeId(3)]);
        assert_eq!(flat.links, [(0, 1), (1, 2), (0, 3), (3, 4)]);
        assert_eq!(flat.positions[2].depth, 2);
        assert_eq!(flat.positions.len(), tree.size());
    }
}
