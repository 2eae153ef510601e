use std::fmt;

use crate::conflict::NodeId;

/// Shared tag carried by every element that stands for the same state
/// (`st<id>`) or the same option row (`opt<i>`), whichever view drew it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HighlightKey {
    State(NodeId),
    Option(usize),
}

impl HighlightKey {
    pub fn state(self) -> Option<NodeId> {
        match self {
            Self::State(node) => Some(node),
            Self::Option(_) => None,
        }
    }
}

impl fmt::Display for HighlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(node) => write!(f, "st{node}"),
            Self::Option(option) => write!(f, "opt{option}"),
        }
    }
}

/// Hover bookkeeping for immediate-mode drawing. Elements read the keys lit
/// during the previous frame and report what the pointer is over now;
/// `end_frame` swaps the two.
#[derive(Clone, Debug, Default)]
pub struct Highlight {
    lit: Vec<HighlightKey>,
    pending: Vec<HighlightKey>,
}

impl Highlight {
    pub fn hover(&mut self, key: HighlightKey) {
        if !self.pending.contains(&key) {
            self.pending.push(key);
        }
    }

    #[cfg(test)]
    pub fn lit(&self) -> &[HighlightKey] {
        &self.lit
    }

    pub fn is_lit(&self, keys: &[HighlightKey]) -> bool {
        keys.iter().any(|key| self.lit.contains(key))
    }

    pub fn end_frame(&mut self) -> bool {
        let next = std::mem::take(&mut self.pending);
        let changed = next != self.lit;
        self.lit = next;
        changed
    }

    pub fn clear(&mut self) {
        self.lit.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_render_as_class_names() {
        assert_eq!(HighlightKey::State(NodeId(12)).to_string(), "st12");
        assert_eq!(HighlightKey::Option(3).to_string(), "opt3");
    }

    #[test]
    fn hover_lights_key_on_next_frame_only() {
        let mut highlight = Highlight::default();
        let key = HighlightKey::State(NodeId(1));

        highlight.hover(key);
        assert!(!highlight.is_lit(&[key]));
        assert!(highlight.end_frame());
        assert!(highlight.is_lit(&[key, HighlightKey::Option(0)]));
        assert!(!highlight.is_lit(&[HighlightKey::State(NodeId(2))]));

        assert!(highlight.end_frame());
        assert!(highlight.lit().is_empty());
        assert!(!highlight.end_frame());
    }

    #[test]
    fn value_cell_hover_lights_row_and_column() {
        let mut highlight = Highlight::default();
        highlight.hover(HighlightKey::Option(2));
        highlight.hover(HighlightKey::State(NodeId(5)));
        highlight.hover(HighlightKey::Option(2));
        highlight.end_frame();

        assert_eq!(highlight.lit().len(), 2);
        assert!(highlight.is_lit(&[HighlightKey::Option(2)]));
        assert!(highlight.is_lit(&[HighlightKey::State(NodeId(5))]));
        assert!(!highlight.is_lit(&[HighlightKey::Option(1), HighlightKey::State(NodeId(1))]));

        highlight.clear();
        assert!(highlight.lit().is_empty());
    }
}
