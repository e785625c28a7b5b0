use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{ReviewId, ShowId, UserId};

/// Authenticated account, as returned by login and registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A TV show from the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Show {
    pub id: ShowId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub no_of_reviews: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A user's rating and comment on a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Review {
    pub id: ReviewId,
    #[serde(default)]
    pub comment: String,
    pub rating: u8,
    pub show_id: ShowId,
    pub user: User,
}

/// Body for creating a review.
///
/// Rating bounds are checked here so an out-of-range value never reaches the wire.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    show_id: ShowId,
    rating: u8,
    comment: String,
}

impl NewReview {
    /// Lowest accepted rating.
    pub const MIN_RATING: u8 = 1;
    /// Highest accepted rating.
    pub const MAX_RATING: u8 = 5;

    /// Validate and build a review for `show_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReview`] if `rating` is outside 1..=5.
    pub fn new(show_id: ShowId, rating: u8, comment: impl Into<String>) -> Result<Self, Error> {
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&rating) {
            return Err(Error::InvalidReview(format!(
                "rating must be between {} and {}, got {rating}",
                Self::MIN_RATING,
                Self::MAX_RATING
            )));
        }
        Ok(Self {
            show_id,
            rating,
            comment: comment.into(),
        })
    }

    /// Show being reviewed.
    #[must_use]
    pub fn show_id(&self) -> &ShowId {
        &self.show_id
    }

    /// Rating, 1 to 5.
    #[must_use]
    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Review text.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Reviews in display order.
///
/// Starts in server order; a review the user just posted goes to the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewList {
    reviews: Vec<Review>,
}

impl ReviewList {
    /// Empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a freshly posted review in front of the rest.
    pub fn prepend(&mut self, review: Review) {
        self.reviews.insert(0, review);
    }

    /// Number of reviews.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// True when there are no reviews.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Reviews in display order.
    #[must_use]
    pub fn as_slice(&self) -> &[Review] {
        &self.reviews
    }

    /// Iterate in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Review> {
        self.reviews.iter()
    }
}

impl From<Vec<Review>> for ReviewList {
    fn from(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }
}

impl IntoIterator for ReviewList {
    type Item = Review;
    type IntoIter = std::vec::IntoIter<Review>;

    fn into_iter(self) -> Self::IntoIter {
        self.reviews.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReviewList {
    type Item = &'a Review;
    type IntoIter = std::slice::Iter<'a, Review>;

    fn into_iter(self) -> Self::IntoIter {
        self.reviews.iter()
    }
}

// Response envelopes.

#[derive(Deserialize)]
pub(crate) struct UserEnvelope {
    pub(crate) user: User,
}

#[derive(Deserialize)]
pub(crate) struct ReviewsEnvelope {
    pub(crate) reviews: Vec<Review>,
}

#[derive(Deserialize)]
pub(crate) struct ReviewEnvelope {
    pub(crate) review: Review,
}

#[derive(Deserialize)]
pub(crate) struct ShowsEnvelope {
    pub(crate) shows: Vec<Show>,
}
