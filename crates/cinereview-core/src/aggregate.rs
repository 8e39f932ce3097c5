// Rating aggregation: count and arithmetic mean of a set of reviews

use cinereview_models::{Rated, RatingEntry};
use serde::Serialize;
use std::collections::HashMap;

/// Derived `(count, mean)` pair for one movie. Never persisted.
///
/// `mean` is exactly `0.0` when `count` is zero; that value is a sentinel and
/// not a valid rating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Aggregate {
    pub count: usize,
    pub mean: f64,
}

impl Aggregate {
    pub fn has_reviews(&self) -> bool {
        self.count > 0
    }
}

/// Count and mean of the given ratings. No rounding.
pub fn aggregate<'a, T, I>(items: I) -> Aggregate
where
    T: Rated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let (count, sum) = items
        .into_iter()
        .fold((0usize, 0u64), |(count, sum), item| (count + 1, sum + u64::from(item.rating())));

    if count == 0 {
        return Aggregate::default();
    }

    Aggregate {
        count,
        mean: sum as f64 / count as f64,
    }
}

/// Group rating projections by movie id and aggregate each group.
///
/// Movies without entries are absent from the map; look them up with
/// `unwrap_or_default()` to get the empty aggregate.
pub fn aggregate_by_movie(entries: &[RatingEntry]) -> HashMap<String, Aggregate> {
    let mut grouped: HashMap<&str, Vec<&RatingEntry>> = HashMap::new();
    for entry in entries {
        grouped.entry(entry.movie_id.as_str()).or_default().push(entry);
    }

    grouped
        .into_iter()
        .map(|(movie_id, group)| (movie_id.to_string(), aggregate(group)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(movie_id: &str, rating: u8) -> RatingEntry {
        RatingEntry {
            movie_id: movie_id.to_string(),
            rating,
        }
    }

    #[test]
    fn test_empty_collection_is_zero() {
        let entries: Vec<RatingEntry> = Vec::new();
        let agg = aggregate(&entries);
        assert_eq!(agg.count, 0);
        assert_eq!(agg.mean, 0.0);
        assert!(!agg.has_reviews());
    }

    #[test]
    fn test_mean_is_sum_over_count() {
        let entries = vec![entry("m1", 4), entry("m1", 2)];
        let agg = aggregate(&entries);
        assert_eq!(agg.count, 2);
        assert_eq!(agg.mean, 3.0);
    }

    #[test]
    fn test_mean_is_not_rounded() {
        let entries = vec![entry("m1", 5), entry("m1", 4), entry("m1", 4)];
        let agg = aggregate(&entries);
        assert!((agg.mean - 13.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_stays_within_rating_bounds() {
        for ratings in [vec![1u8], vec![5, 5, 5], vec![1, 2, 3, 4, 5], vec![2, 5]] {
            let entries: Vec<RatingEntry> = ratings.iter().map(|r| entry("m", *r)).collect();
            let agg = aggregate(&entries);
            let expected = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64;
            assert_eq!(agg.count, ratings.len());
            assert_eq!(agg.mean, expected);
            assert!((1.0..=5.0).contains(&agg.mean));
        }
    }

    #[test]
    fn test_aggregate_by_movie_groups_entries() {
        let entries = vec![entry("m1", 4), entry("m2", 5), entry("m1", 2)];
        let by_movie = aggregate_by_movie(&entries);

        assert_eq!(by_movie.len(), 2);
        assert_eq!(by_movie["m1"], Aggregate { count: 2, mean: 3.0 });
        assert_eq!(by_movie["m2"], Aggregate { count: 1, mean: 5.0 });
        assert_eq!(by_movie.get("m3").copied().unwrap_or_default(), Aggregate::default());
    }
}
