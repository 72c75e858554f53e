use std::cmp::Ordering;

use super::entities::Book;

/// Ratings at or above this value count as a good opinion
pub const GOOD_OPINION_THRESHOLD: f64 = 3.0;

/// Rank books by number of good opinions, then by the average of those
/// opinions, and keep the first `limit`.
///
/// Books without any good opinion are dropped rather than ranked last.
/// Remaining ties fall back to ascending id.
pub fn rank_most_popular(books: Vec<Book>, limit: usize) -> Vec<Book> {
    let mut scored: Vec<(PopularityScore, Book)> = books
        .into_iter()
        .filter_map(|book| PopularityScore::of(&book).map(|score| (score, book)))
        .collect();

    scored.sort_by(|(a, book_a), (b, book_b)| {
        b.good_opinions
            .cmp(&a.good_opinions)
            .then_with(|| {
                b.good_average
                    .partial_cmp(&a.good_average)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| book_a.id.cmp(&book_b.id))
    });

    scored.into_iter().take(limit).map(|(_, book)| book).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PopularityScore {
    good_opinions: usize,
    good_average: f64,
}

impl PopularityScore {
    fn of(book: &Book) -> Option<Self> {
        let (count, sum) = book
            .opinions_rated_at_least(GOOD_OPINION_THRESHOLD)
            .filter_map(|opinion| opinion.rate)
            .fold((0usize, 0.0f64), |(count, sum), rate| (count + 1, sum + rate));

        (count > 0).then(|| Self {
            good_opinions: count,
            good_average: sum / count as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::opinion::domain::Opinion;
    use chrono::Utc;

    fn book(id: i32, rates: &[f64]) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            author: "Author".into(),
            description: None,
            image_url: None,
            creation_date: Utc::now(),
            average_rate: None,
            genre_id: None,
            opinions: rates
                .iter()
                .enumerate()
                .map(|(i, rate)| Opinion {
                    id: id * 100 + i as i32,
                    rate: Some(*rate),
                    view: "view".into(),
                    user_name: "reader".into(),
                    post_date: "2024-01-01 00:00:00".into(),
                    book_id: id,
                })
                .collect(),
        }
    }

    fn ids(books: &[Book]) -> Vec<i32> {
        books.iter().map(|b| b.id).collect()
    }

    #[test]
    fn count_of_good_opinions_beats_their_average() {
        let ranked = rank_most_popular(vec![book(2, &[5.0]), book(1, &[5.0, 3.0, 4.0])], 10);
        assert_eq!(ids(&ranked), vec![1, 2]);
    }

    #[test]
    fn average_breaks_count_ties() {
        let ranked = rank_most_popular(
            vec![book(1, &[3.0, 3.0]), book(2, &[5.0, 4.0]), book(3, &[4.0, 4.0, 1.0])],
            10,
        );
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn books_without_good_opinions_are_excluded() {
        let ranked = rank_most_popular(vec![book(1, &[1.0, 2.0]), book(2, &[]), book(3, &[3.0])], 10);
        assert_eq!(ids(&ranked), vec![3]);
    }

    #[test]
    fn only_good_opinions_feed_the_average() {
        // book 1: good = [4] -> 4.0; book 2: good = [3] -> 3.0
        let ranked = rank_most_popular(vec![book(2, &[3.0]), book(1, &[4.0, 1.0, 1.0])], 10);
        assert_eq!(ids(&ranked), vec![1, 2]);
    }

    #[test]
    fn takes_top_n() {
        let ranked = rank_most_popular(
            vec![book(1, &[5.0]), book(2, &[5.0, 5.0]), book(3, &[5.0, 5.0, 5.0])],
            2,
        );
        assert_eq!(ids(&ranked), vec![3, 2]);
    }
}
