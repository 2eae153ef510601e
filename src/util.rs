use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn stable_pair(seed: impl Hash) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn format_payoff(change: f64) -> String {
    if change.fract() == 0.0 {
        format!("{change:+.0}")
    } else {
        format!("{change:+.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_repeatable_and_bounded() {
        let first = stable_pair(42usize);
        assert_eq!(first, stable_pair(42usize));
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }

    #[test]
    fn payoff_is_signed() {
        assert_eq!(format_payoff(2.0), "+2");
        assert_eq!(format_payoff(-1.0), "-1");
        assert_eq!(format_payoff(0.5), "+0.50");
    }
}
