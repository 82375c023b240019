/*!
`lwgraphs` is a graph data structure & algorithms library designed for graphs that are
- **l**abelled : Vertices are identified by unique string labels
- **w**eighted : Edges carry a signed integer weight (this one is **optional**, per graph)
- directed or undirected, again chosen per graph

# Representation

Internally, we represent **nodes** as `u32` indices into an arena of vertex slots; the graph keeps a
label-to-index table on the side. Removing a vertex tombstones its slot so that all other indices stay valid.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)` and `WeightedEdge(Node, Node, Weight)`.

### Directed vs Undirected

Both kinds live in the same type and are selected at construction time with a [`GraphKind`](ops::GraphKind):

- In an **undirected** graph, every edge is stored at both endpoints with the same weight, and every
  mutation keeps both entries in sync.
- In a **directed** graph, the edge has orientation, so `Edge(u, v)` and `Edge(v, u)` are considered distinct.

Unweighted graphs store the weight `-1` on every edge; algorithms use a cost of `1` per edge instead.

### Available Representations

See the [`repr`] module for the graph storage backends:

- [`Graph`](crate::repr::Graph): neighborhoods stored in `Vec`s
- [`SparseGraph`](crate::repr::SparseGraph): neighborhoods stored in `SmallVec`s
- [`SharedGraph`](crate::repr::SharedGraph): a lock-guarded handle for sharing a graph across threads

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, errors, basic graph operations, and all graph representations,
- [`algo`] includes algorithm traits that are implemented on graphs itself such as BFS (`graph.bfs(start_node)`),
  Dijkstra, Bellman-Ford, Floyd-Warshall, Prim, Edmonds-Karp and structural queries,
- [`gens`] includes random graph generators and deterministic substructures such as paths/cycles/cliques,
- [`io`] includes readers and writers for the plain text graph format.

In most use-cases, `use lwgraphs::{prelude::*, algo::*};` suffices for your needs.

```rust
use lwgraphs::{prelude::*, algo::*};

let mut g = Graph::undirected_weighted();
g.add_edge("A", "B", 5);
g.add_edge("B", "C", 3);

assert_eq!(g.degree("B").unwrap(), 2);
assert_eq!(g.dijkstra("A").unwrap().distance_to(g.node("C").unwrap()), Some(8));
assert_eq!(g.classify_tree_or_forest(), TreeClassification::Tree);
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;

pub use edge::*;
pub use error::GraphError;
pub use node::*;

/// `lwgraphs::prelude` includes definitions for nodes and edges, the error type, all basic graph operation traits
/// as well as all implemented representations.
pub mod prelude {
    pub use super::{
        edge::*,
        error::{GraphError, Result},
        node::*,
        ops::*,
        repr::*,
    };
}
