//! Taste analysis over a visitor's top tracks.
//!
//! Everything here is pure: three [`TimeWindowBucket`]s go in, one
//! [`TasteAnalysis`] comes out. No I/O, no randomness.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::types::{TimeWindow, TimeWindowBucket};

/// How many entries the per-window genre and artist rankings keep.
pub const TOP_N: usize = 5;

/// Labels with their counts, most frequent first.
///
/// Serializes as a JSON object whose key order follows the ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedCounts(pub Vec<(String, usize)>);

impl RankedCounts {
    pub fn get(&self, label: &str) -> Option<usize> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }
}

impl Serialize for RankedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopularityStats {
    pub average: f64,
    pub max: u32,
    pub min: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TasteAnalysis {
    pub top_genres: BTreeMap<TimeWindow, RankedCounts>,
    pub top_artists: BTreeMap<TimeWindow, RankedCounts>,
    /// Windows without tracks have no entry.
    pub popularity_stats: BTreeMap<TimeWindow, PopularityStats>,
    /// Per genre, its top-5 count in every window (0 when outside that window's top 5).
    pub genre_evolution: BTreeMap<String, BTreeMap<TimeWindow, usize>>,
}

/// Counts labels and keeps the `n` most frequent.
///
/// Ties keep the order in which labels were first seen.
pub fn top_n<'a, I>(labels: I, n: usize) -> RankedCounts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for label in labels {
        match index.get(label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label, counts.len());
                counts.push((label.to_string(), 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    RankedCounts(counts)
}

pub fn popularity_stats(values: &[u32]) -> Option<PopularityStats> {
    let max = *values.iter().max()?;
    let min = *values.iter().min()?;
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();

    Some(PopularityStats {
        average: sum as f64 / values.len() as f64,
        max,
        min,
    })
}

/// Aggregates the fetched windows into a [`TasteAnalysis`].
///
/// Every window in [`TimeWindow::ALL`] gets a genre and artist ranking, even
/// when no bucket was supplied for it.
pub fn analyze(buckets: &[TimeWindowBucket]) -> TasteAnalysis {
    let mut analysis = TasteAnalysis::default();

    for window in TimeWindow::ALL {
        let tracks = buckets
            .iter()
            .find(|b| b.window == window)
            .map(|b| b.tracks.as_slice())
            .unwrap_or_default();

        let genres = tracks.iter().flat_map(|t| t.genres.iter().map(String::as_str));
        let artists = tracks.iter().flat_map(|t| t.artists.iter().map(String::as_str));
        analysis.top_genres.insert(window, top_n(genres, TOP_N));
        analysis.top_artists.insert(window, top_n(artists, TOP_N));

        let popularity: Vec<u32> = tracks.iter().map(|t| t.popularity).collect();
        if let Some(stats) = popularity_stats(&popularity) {
            analysis.popularity_stats.insert(window, stats);
        }
    }

    analysis.genre_evolution = genre_evolution(&analysis.top_genres);
    analysis
}

/// Builds the genre trend table from the per-window top genres.
///
/// Only top-5 counts are used, so a genre that drops out of a window's top 5
/// reads as 0 there even if it still appears in that window.
pub fn genre_evolution(
    top_genres: &BTreeMap<TimeWindow, RankedCounts>,
) -> BTreeMap<String, BTreeMap<TimeWindow, usize>> {
    let mut evolution: BTreeMap<String, BTreeMap<TimeWindow, usize>> = BTreeMap::new();

    for ranked in top_genres.values() {
        for (genre, _) in ranked.iter() {
            if evolution.contains_key(genre) {
                continue;
            }
            let row = TimeWindow::ALL
                .iter()
                .map(|w| {
                    let count = top_genres.get(w).and_then(|r| r.get(genre)).unwrap_or(0);
                    (*w, count)
                })
                .collect();
            evolution.insert(genre.to_string(), row);
        }
    }

    evolution
}
