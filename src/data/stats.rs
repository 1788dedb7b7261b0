use super::model::{Roster, Student};

/// Aggregate view over every student's average.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics<'a> {
    pub count: usize,
    /// Mean of the per-student averages.
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Every student whose average equals `max`, in roster order.
    pub best: Vec<&'a Student>,
    /// Every student whose average equals `min`, in roster order.
    pub worst: Vec<&'a Student>,
}

/// Compute roster statistics, or `None` when there is no data.
pub fn compute(roster: &Roster) -> Option<Statistics<'_>> {
    if roster.is_empty() {
        return None;
    }

    let averages: Vec<(&Student, f64)> = roster.iter().map(|s| (s, s.average())).collect();

    let max = averages
        .iter()
        .map(|(_, avg)| *avg)
        .fold(f64::NEG_INFINITY, f64::max);
    let min = averages
        .iter()
        .map(|(_, avg)| *avg)
        .fold(f64::INFINITY, f64::min);
    let mean = averages.iter().map(|(_, avg)| avg).sum::<f64>() / averages.len() as f64;

    let attaining = |target: f64| -> Vec<&Student> {
        averages
            .iter()
            .filter(|(_, avg)| *avg == target)
            .map(|(s, _)| *s)
            .collect()
    };

    Some(Statistics {
        count: roster.len(),
        mean,
        max,
        min,
        best: attaining(max),
        worst: attaining(min),
    })
}
