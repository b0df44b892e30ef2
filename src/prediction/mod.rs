//! User-based collaborative filtering
//!
//! Predicts how a user would rate an item from the ratings of other users who
//! rated it, weighting each of them by how closely their taste follows the
//! target user's. Taste similarity is the Pearson correlation of the scores two
//! users gave to the items they both rated.
//!
//! Everything here is pure computation over caller-supplied [`RatingSet`]s: no
//! storage access, no shared state, safe to call from any number of tasks.
//!
//! ```
//! use movie_ratings::prediction::{predict, similarity, Neighbor, RatingSet};
//!
//! let u1 = RatingSet::from_scores(1, [(1, 5.0), (2, 3.0)]).unwrap();
//! let u2 = RatingSet::from_scores(2, [(1, 4.0), (2, 2.0), (3, 4.0)]).unwrap();
//! let u3 = RatingSet::from_scores(3, [(1, 1.0), (2, 5.0), (3, 2.0)]).unwrap();
//!
//! assert!(similarity(&u1, &u2) > 0.99);
//! assert!(similarity(&u1, &u3) < -0.99);
//!
//! let neighbors: Vec<Neighbor> = [&u2, &u3]
//!     .into_iter()
//!     .filter_map(|set| Neighbor::for_item(set, 3))
//!     .collect();
//! assert_eq!(predict(&u1, 3, &neighbors), Some(4.0));
//! assert_eq!(predict(&u1, 26, &[]), None);
//! ```

pub mod aggregator;
pub mod correlation;
pub mod rating_set;
pub mod similarity;

pub use aggregator::{predict, predict_with_support, Neighbor, Prediction};
pub use correlation::pearson;
pub use rating_set::{ItemId, RatingSet, RatingSetError, UserId};
pub use similarity::similarity;
