use rand::{Rng, rngs::ThreadRng, seq::SliceRandom};

/// Ordering source for the related panel.
pub trait RandomSource {
    fn shuffle(&mut self, indices: &mut [usize]);
}

pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn shuffle(&mut self, indices: &mut [usize]) {
        indices.shuffle(&mut self.0);
    }
}

/// Applies a fixed permutation: slot `i` receives the element at `permutation[i]`.
///
/// A permutation that does not cover exactly `0..len` leaves the order untouched.
#[derive(Debug, Clone, Default)]
pub struct FixedPermutation(pub Vec<usize>);

impl RandomSource for FixedPermutation {
    fn shuffle(&mut self, indices: &mut [usize]) {
        if !is_permutation(&self.0, indices.len()) {
            return;
        }

        let original = indices.to_vec();
        for (slot, &from) in indices.iter_mut().zip(&self.0) {
            *slot = original[from];
        }
    }
}

fn is_permutation(candidate: &[usize], len: usize) -> bool {
    if candidate.len() != len {
        return false;
    }

    let mut seen = vec![false; len];
    candidate
        .iter()
        .all(|&index| index < len && !std::mem::replace(&mut seen[index], true))
}
