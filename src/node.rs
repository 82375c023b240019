/*!
# Node Representation

Vertices carry user-supplied string labels, but every algorithm works on `Node = u32`, the index of the
vertex's slot in the graph's arena. The label-to-index lookup lives in the graph itself
(see [`Labelled`](crate::ops::Labelled)).

Indices are stable for the lifetime of a vertex: removing a vertex only tombstones its slot, so indices
of all other vertices remain valid. Per-node scratch arrays are therefore sized by
[`GraphNodeOrder::node_capacity`](crate::ops::GraphNodeOrder::node_capacity), not by the number of live
vertices.
*/

use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;
