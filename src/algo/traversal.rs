/*!
Breadth-first and depth-first traversals.

Both searches are the same iterator, [`TraversalSearch`], parametrized by its frontier:
a queue yields BFS order and a stack yields DFS preorder. Items are either plain nodes or
[`TreeEdge`]s that additionally carry the parent a node was reached from.

BFS marks a node when it enters the queue, so every vertex is enqueued at most once.
DFS marks a node when it leaves the stack and pushes the unmarked neighbors in reverse, which
reproduces the visiting order of the recursive search without recursing.
*/

use super::*;
use itertools::Itertools;
use std::{collections::VecDeque, marker::PhantomData};

/// `(parent, node)`; the root of a search is its own parent
pub type TreeEdge = (Node, Node);

/// Something a traversal can yield: a node, possibly together with its parent.
pub trait TraversalItem: Copy {
    fn reached_from(parent: Node, node: Node) -> Self;

    fn root(node: Node) -> Self;

    fn node(&self) -> Node;

    /// `None` for the root of the search or if parents are not tracked
    fn parent(&self) -> Option<Node>;
}

impl TraversalItem for Node {
    fn reached_from(_: Node, node: Node) -> Self {
        node
    }

    fn root(node: Node) -> Self {
        node
    }

    fn node(&self) -> Node {
        *self
    }

    fn parent(&self) -> Option<Node> {
        None
    }
}

impl TraversalItem for TreeEdge {
    fn reached_from(parent: Node, node: Node) -> Self {
        (parent, node)
    }

    fn root(node: Node) -> Self {
        (node, node)
    }

    fn node(&self) -> Node {
        self.1
    }

    fn parent(&self) -> Option<Node> {
        (self.0 != self.1).then_some(self.0)
    }
}

/// The set of discovered but not yet expanded items.
pub trait Frontier<T> {
    /// Whether a node counts as visited once it is taken out (DFS) instead of once it is put in (BFS)
    const MARK_ON_POP: bool;

    fn with_root(item: T) -> Self;

    fn put(&mut self, item: T);

    fn take(&mut self) -> Option<T>;

    fn clear(&mut self);
}

impl<T> Frontier<T> for VecDeque<T> {
    const MARK_ON_POP: bool = false;

    fn with_root(item: T) -> Self {
        VecDeque::from([item])
    }

    fn put(&mut self, item: T) {
        self.push_back(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }
}

impl<T> Frontier<T> for Vec<T> {
    const MARK_ON_POP: bool = true;

    fn with_root(item: T) -> Self {
        vec![item]
    }

    fn put(&mut self, item: T) {
        self.push(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop()
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

/// Iterator over all vertices reachable from a start vertex, in the order given by the frontier `F`.
pub struct TraversalSearch<'a, G, F, I>
where
    G: AdjacencyList,
    F: Frontier<I>,
    I: TraversalItem,
{
    graph: &'a G,
    visited: NodeBitSet,
    frontier: F,
    stop_at: Option<Node>,
    _item: PhantomData<I>,
}

pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node>;
pub type DFS<'a, G> = TraversalSearch<'a, G, Vec<Node>, Node>;
pub type BFSWithPredecessor<'a, G> = TraversalSearch<'a, G, VecDeque<TreeEdge>, TreeEdge>;
pub type DFSWithPredecessor<'a, G> = TraversalSearch<'a, G, Vec<TreeEdge>, TreeEdge>;

impl<'a, G, F, I> TraversalSearch<'a, G, F, I>
where
    G: AdjacencyList,
    F: Frontier<I>,
    I: TraversalItem,
{
    /// Starts a new search at `start`.
    /// ** Panics if `start` is not a live node **
    pub fn new(graph: &'a G, start: Node) -> Self {
        assert!(graph.contains_node(start), "{start} is not a live node");

        let mut visited = graph.vertex_bitset_unset();
        if !F::MARK_ON_POP {
            visited.set_bit(start);
        }

        Self {
            graph,
            visited,
            frontier: F::with_root(I::root(start)),
            stop_at: None,
            _item: PhantomData,
        }
    }

    /// Returns *true* if `u` was reached so far or is excluded.
    /// BFS counts a node as reached as soon as it is discovered.
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.get_bit(u)
    }

    /// The search ends right after yielding `stopper`
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.stop_at = Some(stopper);
        self
    }

    /// Treats `u` as already visited, so the search never enters it.
    /// Has to be called before the search reaches `u`.
    pub fn with_node_excluded(mut self, u: Node) -> Self {
        self.visited.set_bit(u);
        self
    }

    /// Excludes every node of `us`, see [`TraversalSearch::with_node_excluded`]
    pub fn with_nodes_excluded<N>(self, us: N) -> Self
    where
        N: IntoIterator<Item = Node>,
    {
        us.into_iter().fold(self, Self::with_node_excluded)
    }

    /// Pops the next item whose node has not been expanded yet
    fn next_fresh(&mut self) -> Option<I> {
        loop {
            let item = self.frontier.take()?;
            // a stack may hold several entries for a node reached via different branches
            if !F::MARK_ON_POP || !self.visited.set_bit(item.node()) {
                return Some(item);
            }
        }
    }
}

impl<G, F, I> Iterator for TraversalSearch<'_, G, F, I>
where
    G: AdjacencyList,
    F: Frontier<I>,
    I: TraversalItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.next_fresh()?;
        let u = item.node();

        if self.stop_at == Some(u) {
            self.frontier.clear();
        } else if F::MARK_ON_POP {
            let unvisited = self
                .graph
                .neighbors_of(u)
                .filter(|&v| !self.visited.get_bit(v))
                .collect_vec();
            for v in unvisited.into_iter().rev() {
                self.frontier.put(I::reached_from(u, v));
            }
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.visited.set_bit(v) {
                    self.frontier.put(I::reached_from(u, v));
                }
            }
        }

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.graph.len()))
    }
}

impl<G, F> TraversalSearch<'_, G, F, TreeEdge>
where
    G: AdjacencyList,
    F: Frontier<TreeEdge>,
{
    /// Runs the search to its end and returns the parent of every slot.
    /// Unreached slots and the root are their own parent.
    pub fn parent_array(&mut self) -> Vec<Node> {
        let mut parents = (0..self.graph.node_capacity()).collect_vec();
        for (parent, node) in self.by_ref() {
            parents[node as usize] = parent;
        }
        parents
    }
}

/// Traversals available on every graph
pub trait Traversal: AdjacencyList + Sized {
    /// Iterates over all nodes reachable from `start` in breadth-first order.
    ///
    /// # Examples
    /// ```
    /// use lwgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(GraphKind::undirected_unweighted(), [("a", "b", 1), ("b", "c", 1)]);
    ///
    /// let order = g.labels_of(g.bfs(g.node("b").unwrap()));
    /// assert_eq!(order, vec!["b", "a", "c"]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Iterates over all nodes reachable from `start` in depth-first preorder.
    ///
    /// # Examples
    /// ```
    /// use lwgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(GraphKind::directed_weighted(), [("a", "b", 1), ("b", "c", 1), ("a", "d", 1)]);
    ///
    /// let order = g.labels_of(g.dfs(g.node("a").unwrap()));
    /// assert_eq!(order, vec!["a", "b", "c", "d"]);
    /// ```
    fn dfs(&self, start: Node) -> DFS<'_, Self> {
        DFS::new(self, start)
    }

    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    fn dfs_with_predecessor(&self, start: Node) -> DFSWithPredecessor<'_, Self> {
        DFSWithPredecessor::new(self, start)
    }

    /// Returns the BFS visiting order from a vertex given by label or node
    fn bfs_order(&self, start: impl VertexRef) -> Result<Vec<Node>>
    where
        Self: Labelled,
    {
        let start = start.resolve(self)?;
        Ok(self.bfs(start).collect())
    }

    /// Returns the DFS visiting order from a vertex given by label or node
    fn dfs_order(&self, start: impl VertexRef) -> Result<Vec<Node>>
    where
        Self: Labelled,
    {
        let start = start.resolve(self)?;
        Ok(self.dfs(start).collect())
    }

    /// Returns *true* if `v` can be reached from `u`
    fn is_reachable(&self, u: Node, v: Node) -> bool {
        self.bfs(u).stop_at(v).any(|w| w == v)
    }

    fn count_reachable(&self, start: Node) -> usize {
        self.bfs(start).count()
    }

    /// Returns a path with the fewest edges from `start` to `end` that never enters a node
    /// of `excluded`, including both endpoints. `None` if there is no such path.
    fn bfs_path_avoiding<I>(&self, start: Node, end: Node, excluded: I) -> Option<Vec<Node>>
    where
        I: IntoIterator<Item = Node>,
    {
        if start == end {
            return Some(vec![start]);
        }

        let mut search = self
            .bfs_with_predecessor(start)
            .with_nodes_excluded(excluded)
            .stop_at(end);
        let parents = search.parent_array();

        // an excluded `end` counts as visited but never gets a parent
        if !search.did_visit_node(end) || parents[end as usize] == end {
            return None;
        }

        let mut path = vec![end];
        let mut node = end;
        while node != start {
            node = parents[node as usize];
            path.push(node);
        }
        path.reverse();
        Some(path)
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}
