use crate::*;
use algograph::graph::VertexId;
use std::collections::HashMap;

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&self) -> crate::Result<Self::Result>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState>;
    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a;

    fn rank_map(&self, graph: &LinkGraph) -> RankMap {
        named(graph, self.page_rank())
    }
}
