use std::collections::HashSet;

use rand::Rng;

/// Draw up to `n` distinct items from `items`, uniformly at random, never
/// returning anything in `ignore`.
///
/// Sampling is without replacement: each pick is removed from the working
/// list. The loop ends after `n` picks or once the eligible list is empty, so
/// asking for more than is available yields a shorter result rather than
/// spinning. Duplicates in `items` are collapsed before drawing.
///
/// The result is in draw order.
pub fn sample<R>(items: &[&str], n: usize, ignore: &HashSet<String>, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut eligible: Vec<&str> = items
        .iter()
        .copied()
        .filter(|item| !ignore.contains(*item) && seen.insert(*item))
        .collect();

    let mut picked = Vec::with_capacity(n.min(eligible.len()));
    while picked.len() < n && !eligible.is_empty() {
        let idx = rng.gen_range(0..eligible.len());
        picked.push(eligible.swap_remove(idx).to_owned());
    }
    picked
}
