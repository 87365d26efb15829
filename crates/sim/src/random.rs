use factory_core::round_to;
use rand::{Rng, RngCore};

/// Uniform draw from `[low, high]`, rounded to `decimals` places.
pub(crate) fn uniform(rng: &mut dyn RngCore, low: f64, high: f64, decimals: u32) -> f64 {
    round_to(rng.gen_range(low..=high), decimals)
}

/// Uniform choice from a non-empty option list.
pub(crate) fn pick<T: Copy>(rng: &mut dyn RngCore, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}
