use std::{iter::Copied, slice::Iter};

use itertools::Itertools;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::*;

/// Trait for methods on the weighted out-neighborhood of a single vertex.
///
/// Entries are kept in insertion order; overwriting an existing neighbor keeps its position.
pub trait Neighborhood: Clone + Default {
    /// Returns the number of neighbors in the Neighborhood
    fn num_of_neighbors(&self) -> NumNodes;

    type NeighborhoodIter<'a>: Iterator<Item = (Node, Weight)> + 'a
    where
        Self: 'a;

    /// Returns an iterator over all `(neighbor, weight)` entries in insertion order
    fn weighted_neighbors(&self) -> Self::NeighborhoodIter<'_>;

    /// Returns an iterator over all neighbors in insertion order
    fn neighbors(&self) -> impl Iterator<Item = Node> + '_ {
        self.weighted_neighbors().map(|(v, _)| v)
    }

    /// Returns the weight stored for neighbor `v` if present
    fn weight_of(&self, v: Node) -> Option<Weight> {
        self.weighted_neighbors()
            .find_map(|(u, w)| (u == v).then_some(w))
    }

    /// Inserts `v` with the given weight or overwrites the weight of an existing entry in place.
    /// Returns the previous weight.
    fn set_neighbor(&mut self, v: Node, weight: Weight) -> Option<Weight>;

    /// Tries to remove a neighbor from the Neighborhood preserving the order of the rest.
    /// Returns the stored weight if the node was in the Neighborhood before.
    fn try_remove_neighbor(&mut self, v: Node) -> Option<Weight>;
}

macro_rules! impl_vec_like_neighborhood {
    ($nbs:ident) => {
        impl Neighborhood for $nbs {
            fn num_of_neighbors(&self) -> NumNodes {
                self.0.len() as NumNodes
            }

            type NeighborhoodIter<'a>
                = Copied<Iter<'a, (Node, Weight)>>
            where
                Self: 'a;

            fn weighted_neighbors(&self) -> Self::NeighborhoodIter<'_> {
                self.0.iter().copied()
            }

            fn set_neighbor(&mut self, v: Node, weight: Weight) -> Option<Weight> {
                if let Some(entry) = self.0.iter_mut().find(|(u, _)| *u == v) {
                    Some(std::mem::replace(&mut entry.1, weight))
                } else {
                    self.0.push((v, weight));
                    None
                }
            }

            fn try_remove_neighbor(&mut self, v: Node) -> Option<Weight> {
                let (pos, _) = self.0.iter().find_position(|(u, _)| *u == v)?;
                Some(self.0.remove(pos).1)
            }
        }
    };
}

/// Basic Neighborhood-Impl. using `Vec<(Node, Weight)>`
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrNeighborhood(pub Vec<(Node, Weight)>);

impl_vec_like_neighborhood!(ArrNeighborhood);

/// Like `ArrNeighborhood` but uses `SmallVec<[(Node, Weight); 8]>` instead.
/// Prefer this if the graph is known to be sparse.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SparseNeighborhood(pub SmallVec<[(Node, Weight); 8]>);

impl_vec_like_neighborhood!(SparseNeighborhood);
