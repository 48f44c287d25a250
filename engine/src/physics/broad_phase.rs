//! Broad-phase pair enumeration.
//!
//! The resolver only consumes a list of candidate index pairs, so a spatial
//! partition can replace [`BruteForcePairs`] without touching the contact code.

use super::body::PhysicsBody;

/// Potential collision pair (body indices, `first < second`).
pub type CollisionPair = (usize, usize);

/// Produces the candidate pairs the narrow phase should test.
pub trait BroadPhase {
    /// Clears `pairs` and fills it with candidate pairs for `bodies`.
    fn collect_pairs(&mut self, bodies: &[PhysicsBody], pairs: &mut Vec<CollisionPair>);
}

/// Every unordered pair of bodies, skipping pairs where both are static.
///
/// `O(n²)` in the body count.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForcePairs;

impl BroadPhase for BruteForcePairs {
    fn collect_pairs(&mut self, bodies: &[PhysicsBody], pairs: &mut Vec<CollisionPair>) {
        pairs.clear();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if bodies[i].is_static() && bodies[j].is_static() {
                    continue;
                }
                pairs.push((i, j));
            }
        }
    }
}
