/*!
# Graph Algorithms

This module provides a suite of **graph algorithms** built on top of the graph representations in this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use lwgraphs::algo::*;
```
and gain access to traversal, degree queries, structural classification, shortest paths,
minimum spanning trees and maximum flows.

Algorithms are extension traits implemented for every graph that provides the capabilities they need.
User-facing entry points accept anything implementing [`VertexRef`](crate::ops::VertexRef), i.e. a label
or a raw [`Node`](crate::Node), and report unknown vertices as
[`GraphError::VertexNotFound`](crate::error::GraphError::VertexNotFound).
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod degree;
mod mst;
mod network_flow;
mod shortest_path;
mod structure;
mod traversal;

use crate::{
    error::{GraphError, Result},
    prelude::*,
};

pub use degree::*;
pub use mst::*;
pub use network_flow::*;
pub use shortest_path::*;
pub use structure::*;
pub use traversal::*;
