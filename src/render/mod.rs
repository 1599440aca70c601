//! Text rendering of shard populations.

/// One bar per shard, one `x` per whole percent of the total population.
///
/// ```text
/// 0 xxxxxxxxxxxxxxxxxxxxx
/// 1 xxxxxxxxxxxxxxxxxxxxxxxxxx
/// ```
pub fn population_bars(population: &[usize]) -> String {
    let total: usize = population.iter().sum();
    let mut out = String::new();
    for (idx, count) in population.iter().enumerate() {
        let width = if total == 0 { 0 } else { count * 100 / total };
        out.push_str(&format!("{} {}\n", idx, "x".repeat(width)));
    }
    out
}
