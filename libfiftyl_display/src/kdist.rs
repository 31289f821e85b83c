//! k-distance calculation for DBSCAN parameter studies.

use ndarray::Array2;

use super::channel_map::Plane;

/// A sample above threshold in a pedestal-subtracted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub tick: usize,
    pub channel: usize,
}

impl Hit {
    pub fn plane(&self) -> Plane {
        Plane::of_channel(self.channel)
    }
}

/// Collect every sample above the ADC threshold
pub fn find_hits(adcs: &Array2<i32>, threshold: i32) -> Vec<Hit> {
    let mut hits = Vec::new();
    for ((tick, channel), sample) in adcs.indexed_iter() {
        if *sample > threshold {
            hits.push(Hit { tick, channel });
        }
    }
    hits
}

/// Manhattan distance between two hits in (channel, tick) space
pub fn manhattan(a: &Hit, b: &Hit) -> u64 {
    (a.channel.abs_diff(b.channel) + a.tick.abs_diff(b.tick)) as u64
}

/// Distance to the k-th nearest same-plane neighbor for every hit, sorted
/// descending.
///
/// Each hit counts itself as a neighbor, per the DBSCAN neighbor definition.
/// Hits with fewer than k + 1 neighbors on their plane are dropped.
pub fn k_distances(hits: &[Hit], k: usize) -> Vec<u64> {
    let mut k_distance = Vec::new();
    for x in hits {
        let mut dist: Vec<u64> = hits
            .iter()
            .filter(|y| y.plane() == x.plane())
            .map(|y| manhattan(x, y))
            .collect();
        if dist.len() <= k {
            continue;
        }
        dist.sort_unstable();
        k_distance.push(dist[k]);
    }
    k_distance.sort_unstable_by(|a, b| b.cmp(a));
    k_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_find_hits() {
        let mut adcs = Array2::<i32>::zeros((10, 128));
        adcs[[3, 5]] = 300;
        adcs[[7, 100]] = 250;
        let hits = find_hits(&adcs, 200);
        assert_eq!(
            hits,
            vec![Hit { tick: 3, channel: 5 }, Hit { tick: 7, channel: 100 }]
        );
        assert_eq!(hits[0].plane(), Plane::Collection);
        assert_eq!(hits[1].plane(), Plane::Induction2);
    }

    #[test]
    fn test_k_distances_stay_within_plane() {
        // Two collection hits 4 apart and one lone induction hit
        let hits = vec![
            Hit { tick: 0, channel: 0 },
            Hit { tick: 3, channel: 1 },
            Hit { tick: 0, channel: 90 },
        ];
        let dists = k_distances(&hits, 1);
        // The induction hit has no same-plane neighbor beyond itself
        assert_eq!(dists, vec![4, 4]);
    }

    #[test]
    fn test_k_zero_is_self() {
        let hits = vec![
            Hit { tick: 0, channel: 0 },
            Hit { tick: 9, channel: 2 },
        ];
        assert_eq!(k_distances(&hits, 0), vec![0, 0]);
    }

    #[test]
    fn test_descending_order() {
        let hits = vec![
            Hit { tick: 0, channel: 0 },
            Hit { tick: 1, channel: 0 },
            Hit { tick: 10, channel: 0 },
        ];
        let dists = k_distances(&hits, 1);
        assert_eq!(dists, vec![9, 1, 1]);
    }
}
