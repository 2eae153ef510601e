use eframe::egui::{Vec2, vec2};

use super::LayoutEngine;

const TOP_MARGIN: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 100.0;

/// Layered placement for a tree given as parent-to-child links with node 0
/// as the root. Leaves take consecutive slots left to right; every parent is
/// centred between its first and last child.
#[derive(Debug, Default)]
pub struct TreeLayout {
    positions: Vec<Vec2>,
}

impl TreeLayout {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutEngine for TreeLayout {
    fn start(&mut self, node_count: usize, links: &[(usize, usize)], size: Vec2) {
        self.positions.clear();
        if node_count == 0 {
            return;
        }

        let mut children = vec![Vec::new(); node_count];
        for &(parent, child) in links {
            if parent < node_count && child < node_count && parent != child {
                children[parent].push(child);
            }
        }

        let mut slots = vec![0.0f32; node_count];
        let mut depths = vec![0usize; node_count];
        let mut next_leaf = 0.0f32;
        let mut max_depth = 0usize;

        // Iterative post-order so deep trees cannot exhaust the stack.
        let mut stack = vec![(0usize, 0usize, false)];
        while let Some((node, depth, expanded)) = stack.pop() {
            depths[node] = depth;
            max_depth = max_depth.max(depth);

            if children[node].is_empty() {
                slots[node] = next_leaf;
                next_leaf += 1.0;
                continue;
            }

            if expanded {
                let first = children[node][0];
                let last = children[node][children[node].len() - 1];
                slots[node] = (slots[first] + slots[last]) * 0.5;
                continue;
            }

            stack.push((node, depth, true));
            for &child in children[node].iter().rev() {
                stack.push((child, depth + 1, false));
            }
        }

        let leaf_count = next_leaf.max(1.0);
        let width = size.x.max(1.0);
        let height = (size.y - BOTTOM_MARGIN).max(1.0);
        let band = if max_depth == 0 {
            0.0
        } else {
            height / max_depth as f32
        };

        self.positions = (0..node_count)
            .map(|node| {
                let x = ((slots[node] + 0.5) / leaf_count) * width - width * 0.5;
                let y = depths[node] as f32 * band - height * 0.5 + TOP_MARGIN;
                vec2(x, y)
            })
            .collect();
    }

    fn tick(&mut self) -> bool {
        false
    }

    fn positions(&self) -> &[Vec2] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_sit_above_and_between_children() {
        let mut layout = TreeLayout::new();
        // 0 -> 1 -> 2, 0 -> 3
        layout.start(4, &[(0, 1), (1, 2), (0, 3)], vec2(400.0, 300.0));
        let positions = layout.positions();

        assert_eq!(positions.len(), 4);
        assert!(positions[0].y < positions[1].y);
        assert!(positions[1].y < positions[2].y);
        assert_eq!(positions[1].y, positions[3].y);
        assert!(positions[2].x < positions[3].x);
        assert_eq!(positions[0].x, (positions[1].x + positions[3].x) * 0.5);
        assert!(!layout.tick());
    }

    #[test]
    fn positions_stay_inside_the_viewport() {
        let mut layout = TreeLayout::new();
        let size = vec2(640.0, 480.0);
        let links = (1..9).map(|child| ((child - 1) / 2, child)).collect::<Vec<_>>();
        layout.start(9, &links, size);

        for position in layout.positions() {
            assert!(position.x.abs() <= size.x * 0.5);
            assert!(position.y.abs() <= size.y * 0.5);
        }
    }

    #[test]
    fn single_node_and_empty_inputs() {
        let mut layout = TreeLayout::new();
        layout.start(1, &[], vec2(100.0, 200.0));
        assert_eq!(layout.positions().len(), 1);
        assert_eq!(layout.positions()[0].x, 0.0);

        layout.start(0, &[], vec2(100.0, 200.0));
        assert!(layout.positions().is_empty());
    }
}
