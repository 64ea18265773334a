use crate::domain::School;

/// Order-preserving subsequence of `master` matching `query`.
/// An empty query keeps everything.
///
/// Always derived from the whole of `master`; callers re-run it whenever
/// either input changes instead of patching a previous result.
pub fn project(master: &[School], query: &str) -> Vec<School> {
    if query.is_empty() {
        return master.to_vec();
    }

    let needle = query.to_lowercase();
    master
        .iter()
        .filter(|school| school.searchable_text().contains(&needle))
        .cloned()
        .collect()
}
