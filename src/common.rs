use crate::graph::LinkGraph;
use algograph::graph::VertexId;
use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

/// Page identifier to estimated rank, ordered by identifier.
pub type RankMap = BTreeMap<String, f64>;

pub fn norm_1<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn named(graph: &LinkGraph, ranks: &HashMap<VertexId, f64, ahash::RandomState>) -> RankMap {
    ranks
        .iter()
        .map(|(v, rank)| (graph.name(*v).to_string(), *rank))
        .collect()
}
