use crate::RankMap;
use std::io::{self, Write};

pub const ITERATION_HEADER: &str = "PageRank Results from Iteration";

pub fn sampling_header(samples: usize) -> String {
    format!("PageRank Results from Sampling (n = {samples})")
}

/// Writes `header` and then one indented `page: rank` line per page, in
/// identifier order, ranks to four decimals.
pub fn write_ranks<W: Write>(out: &mut W, header: &str, ranks: &RankMap) -> io::Result<()> {
    writeln!(out, "{header}")?;
    for (page, rank) in ranks.iter() {
        writeln!(out, "  {page}: {rank:.4}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_block() {
        let ranks: RankMap = [("b.html", 0.25), ("a.html", 0.75)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let mut buf = Vec::new();
        write_ranks(&mut buf, &sampling_header(10_000), &ranks).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "PageRank Results from Sampling (n = 10000)\n  a.html: 0.7500\n  b.html: 0.2500\n"
        );
    }
}
