use serde::{Deserialize, Serialize};

/// Tracks how many votes each player has received this round.
///
/// Targets are kept in the order they received their first vote,
/// which is the order ties are broken in.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub struct Votes {
    tally: Vec<(String, usize)>,
}

impl Votes {
    /// Creates an empty `Votes`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one vote against the given target.
    pub fn vote(&mut self, target: &str) {
        match self.tally.iter_mut().find(|(name, _)| name == target) {
            Some((_, count)) => *count += 1,
            None => self.tally.push((target.to_string(), 1)),
        }
    }

    /// Gets the number of votes cast against the given target.
    pub fn count(&self, target: &str) -> usize {
        self.tally
            .iter()
            .find(|(name, _)| name == target)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// The total number of votes cast.
    pub fn total(&self) -> usize {
        self.tally.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tally.is_empty()
    }

    pub fn clear(&mut self) {
        self.tally.clear();
    }

    /// Returns the target with the most votes, or `None` if no votes were cast.
    ///
    /// A tie goes to whichever of the tied targets was voted for first.
    pub fn tally(&self) -> Option<&str> {
        let mut leader: Option<(&str, usize)> = None;
        for (name, count) in self.tally.iter() {
            if leader.map_or(true, |(_, max)| *count > max) {
                leader = Some((name, *count));
            }
        }
        leader.map(|(name, _)| name)
    }

    /// Returns whether more than one target shares the highest vote count.
    pub fn is_tied(&self) -> bool {
        let max = self.tally.iter().map(|(_, count)| *count).max().unwrap_or(0);
        self.tally.iter().filter(|(_, count)| *count == max).count() > 1
    }

    /// Iterates over each target and their vote count, in the order they were first voted for.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tally.iter().map(|(name, count)| (&name[..], *count))
    }
}
