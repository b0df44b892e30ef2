use super::{similarity, ItemId, RatingSet, UserId};

/// Another user who rated the target item
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    ratings: &'a RatingSet,
    score: f64,
}

impl<'a> Neighbor<'a> {
    /// Wraps a rating set as a neighbor for `item_id`
    ///
    /// Returns `None` when the user never rated that item.
    pub fn for_item(ratings: &'a RatingSet, item_id: ItemId) -> Option<Self> {
        ratings.get(item_id).map(|score| Self { ratings, score })
    }

    pub fn user_id(&self) -> UserId {
        self.ratings.user_id()
    }

    /// The neighbor's own score for the target item
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn ratings(&self) -> &RatingSet {
        self.ratings
    }
}

/// A predicted score together with how many neighbors supported it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub score: f64,
    /// Neighbors with positive similarity that contributed to the score
    pub neighbors: usize,
}

/// Predicts the target user's score for `item_id`
///
/// See [`predict_with_support`]. Returns `None` when no neighbor has a
/// positive similarity to the target user.
pub fn predict(target: &RatingSet, item_id: ItemId, neighbors: &[Neighbor<'_>]) -> Option<f64> {
    predict_with_support(target, item_id, neighbors).map(|prediction| prediction.score)
}

/// Similarity-weighted mean of the neighbors' scores for `item_id`
///
/// Every neighbor's similarity to `target` is computed; neighbors with zero or
/// negative similarity are dropped entirely. The remaining scores are averaged
/// with their similarities as weights, summed in the order given. The result is
/// not clamped to any rating scale.
///
/// Returns `None` when the neighbor list is empty or every neighbor was
/// dropped.
pub fn predict_with_support(
    target: &RatingSet,
    item_id: ItemId,
    neighbors: &[Neighbor<'_>],
) -> Option<Prediction> {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut retained = 0;

    for neighbor in neighbors {
        let sim = similarity(target, neighbor.ratings());
        if sim.is_nan() || sim <= 0.0 {
            continue;
        }

        weighted_sum += neighbor.score() * sim;
        weight_total += sim;
        retained += 1;
    }

    tracing::debug!(
        user_id = target.user_id(),
        item_id,
        candidates = neighbors.len(),
        retained,
        "Aggregated neighbor scores"
    );

    if retained == 0 {
        return None;
    }

    Some(Prediction {
        score: weighted_sum / weight_total,
        neighbors: retained,
    })
}
