use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

use super::LayoutEngine;

const NODE_RADIUS: f32 = 10.0;
const LINK_DISTANCE: f32 = 80.0;
const COOLING: f32 = 0.965;
const MIN_TEMPERATURE: f32 = 0.55;
const DRAG_TEMPERATURE: f32 = 12.0;

#[derive(Debug, Default)]
pub struct ForceLayout {
    positions: Vec<Vec2>,
    links: Vec<(usize, usize)>,
    k: f32,
    temperature: f32,
    bounds: Vec2,
    pinned: Option<usize>,
}

impl ForceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warm_start(&mut self, previous: &[Vec2]) {
        if previous.len() == self.positions.len() {
            self.positions.copy_from_slice(previous);
            self.positions
                .iter_mut()
                .for_each(|position| *position = position.clamp(-self.bounds, self.bounds));
        }
    }

    /// Holds `index` at `position` until `release`, and wakes the layout so
    /// the neighbours follow.
    pub fn pin(&mut self, index: usize, position: Vec2) -> bool {
        let Some(slot) = self.positions.get_mut(index) else {
            return false;
        };
        *slot = position.clamp(-self.bounds, self.bounds);
        self.pinned = Some(index);
        self.temperature = self.temperature.max(DRAG_TEMPERATURE);
        true
    }

    pub fn release(&mut self) {
        self.pinned = None;
    }

    pub fn is_settled(&self) -> bool {
        self.temperature < MIN_TEMPERATURE
    }
}

impl LayoutEngine for ForceLayout {
    fn start(&mut self, node_count: usize, links: &[(usize, usize)], size: Vec2) {
        self.links = links
            .iter()
            .copied()
            .filter(|&(from, to)| from < node_count && to < node_count && from != to)
            .collect();
        self.bounds = vec2(size.x.max(1.0), size.y.max(1.0)) * 0.5;
        self.pinned = None;

        let n = node_count.max(1) as f32;
        let base_radius = self.bounds.min_elem() * 0.6;
        self.positions = (0..node_count)
            .map(|index| {
                let angle = (index as f32 / n) * TAU;
                let (jx, jy) = stable_pair(index);
                let jitter = vec2(jx, jy) * (base_radius * 0.15);
                vec2(angle.cos(), angle.sin()) * base_radius + jitter
            })
            .collect();

        let area = (self.bounds.x * 2.0) * (self.bounds.y * 2.0);
        self.k = (area / n).sqrt().clamp(NODE_RADIUS * 3.0, LINK_DISTANCE * 2.0);
        self.temperature = (self.k * 0.5).max(40.0);
    }

    fn tick(&mut self) -> bool {
        let n = self.positions.len();
        if n < 2 || self.is_settled() {
            self.temperature = 0.0;
            return false;
        }

        let k = self.k;
        let mut disp = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.positions[i] - self.positions[j];
                let distance = delta.length().max(0.5);
                let direction = delta / distance;

                let force = (k * k) / distance;
                disp[i] += direction * force;
                disp[j] -= direction * force;

                let min_distance = NODE_RADIUS * 4.0;
                if distance < min_distance {
                    let overlap_push = (min_distance - distance) * 2.4;
                    disp[i] += direction * overlap_push;
                    disp[j] -= direction * overlap_push;
                }
            }
        }

        for &(from, to) in &self.links {
            let delta = self.positions[from] - self.positions[to];
            let distance = delta.length().max(0.5);
            let direction = delta / distance;
            let force = (distance - LINK_DISTANCE) * 0.18;

            disp[from] -= direction * force;
            disp[to] += direction * force;
        }

        for (index, (position, d)) in self.positions.iter_mut().zip(disp).enumerate() {
            if self.pinned == Some(index) {
                continue;
            }
            let d = d - *position * 0.02;
            let length = d.length();
            if length > 0.0 {
                *position += d / length * length.min(self.temperature);
            }
            *position = position.clamp(-self.bounds, self.bounds);
        }

        self.temperature *= COOLING;
        !self.is_settled()
    }

    fn positions(&self) -> &[Vec2] {
        &self.positions
    }
}
