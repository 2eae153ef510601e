use eframe::egui::Vec2;

mod force;
mod tree;

pub use force::ForceLayout;
pub use tree::TreeLayout;

pub trait LayoutEngine {
    fn start(&mut self, node_count: usize, links: &[(usize, usize)], size: Vec2);

    fn tick(&mut self) -> bool;

    fn positions(&self) -> &[Vec2];
}
