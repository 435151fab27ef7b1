use crate::*;
use algograph::graph::{directed, GrowableGraph, QueryableGraph, VertexId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Page identifier to the identifiers it links to.
pub type Corpus = BTreeMap<String, BTreeSet<String>>;

/// An immutable directed link graph.
///
/// Every page is a vertex and every link an edge of a directed
/// `TreeBackedGraph`. Pages are kept in lexicographic order of their
/// identifiers, which is the enumeration order every algorithm in this
/// crate relies on.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    pages: Vec<VertexId>,
    names: HashMap<VertexId, String, ahash::RandomState>,
    vertices: HashMap<String, VertexId, ahash::RandomState>,
}

impl LinkGraph {
    /// Builds the graph, rejecting self links and links to pages that are
    /// not keys of `corpus`.
    pub fn new(corpus: &Corpus) -> Result<Self> {
        let mut graph = directed::TreeBackedGraph::new();
        let mut pages = Vec::with_capacity(corpus.len());
        let mut names = HashMap::with_hasher(ahash::RandomState::new());
        let mut vertices = HashMap::with_hasher(ahash::RandomState::new());
        for page in corpus.keys() {
            let v = graph.add_vertex();
            pages.push(v);
            names.insert(v, page.clone());
            vertices.insert(page.clone(), v);
        }
        for (page, links) in corpus.iter() {
            let u = vertices[page];
            for target in links.iter() {
                if target == page {
                    return Err(Error::SelfLink(page.clone()));
                }
                let Some(v) = vertices.get(target) else {
                    return Err(Error::DanglingLink {
                        page: page.clone(),
                        target: target.clone(),
                    });
                };
                graph.add_edge(u, *v);
            }
        }
        Ok(Self {
            graph,
            pages,
            names,
            vertices,
        })
    }

    /// Shorthand for building a graph from borrowed adjacency lists.
    pub fn from_adjacency(adjacency: &[(&str, &[&str])]) -> Result<Self> {
        let corpus: Corpus = adjacency
            .iter()
            .map(|(page, links)| {
                let links = links.iter().map(|l| l.to_string()).collect();
                (page.to_string(), links)
            })
            .collect();
        Self::new(&corpus)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in lexicographic order of their identifiers.
    pub fn pages(&self) -> &[VertexId] {
        &self.pages
    }

    pub fn vertex(&self, name: &str) -> Option<VertexId> {
        self.vertices.get(name).copied()
    }

    /// Identifier of `v`; empty when `v` is not a vertex of this graph.
    pub fn name(&self, v: VertexId) -> &str {
        self.names.get(&v).map(String::as_str).unwrap_or_default()
    }

    pub fn links(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&v).map(|e| e.sink)
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.graph.out_edges(&v).count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_size()
    }
}
