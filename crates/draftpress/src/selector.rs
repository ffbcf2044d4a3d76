// Selector — deterministic pick of one article out of a round.

use draftpress_types::GeneratedArticle;

/// The score used for ranking.
///
/// Placeholder policy: a real SEO/readability/engagement score is expected to
/// be populated into `GeneratedArticle::score` by an external stage before
/// selection; when it is absent the word count stands in as a crude length
/// proxy. The formula itself is deliberately not invented here.
pub fn effective_score(article: &GeneratedArticle) -> f64 {
    article.score.unwrap_or(article.word_count as f64)
}

/// Index of the best article: strictly greatest effective score wins, and
/// ties keep the earliest entry — with settlement-ordered input this means
/// first-settled wins among equals. Non-finite scores never beat the current
/// leader.
///
/// Returns `None` only on an empty slice, which the orchestrator never
/// produces.
pub fn select_best_index(articles: &[GeneratedArticle]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, article) in articles.iter().enumerate() {
        let score = effective_score(article);
        match best {
            None => best = Some((i, score)),
            Some((_, leader)) => {
                if score.partial_cmp(&leader).is_some_and(|o| o.is_gt()) {
                    best = Some((i, score));
                }
            }
        }
    }
    best.map(|(i, _)| i)
}

/// The best article of a round; see [`select_best_index`] for the rule.
pub fn select_best(articles: &[GeneratedArticle]) -> Option<&GeneratedArticle> {
    select_best_index(articles).map(|i| &articles[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::make_test_article;
    use draftpress_types::ProviderId;

    #[test]
    fn test_select_best_empty_is_none() {
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn test_select_best_singleton_returned_unchanged() {
        let articles = vec![make_test_article(ProviderId::Anthropic, "Only", 500)];
        let best = select_best(&articles).unwrap();
        assert_eq!(best.provider, ProviderId::Anthropic);
        assert_eq!(best.title, "Only");
    }

    #[test]
    fn test_select_best_greatest_word_count_wins_without_scores() {
        let articles = vec![
            make_test_article(ProviderId::OpenAi, "A", 1500),
            make_test_article(ProviderId::Gemini, "C", 1600),
        ];
        let best = select_best(&articles).unwrap();
        assert_eq!(best.provider, ProviderId::Gemini);
        assert_eq!(best.word_count, 1600);
    }

    #[test]
    fn test_select_best_tie_keeps_earliest() {
        let articles = vec![
            make_test_article(ProviderId::OpenAi, "first", 1000),
            make_test_article(ProviderId::Anthropic, "second", 1000),
            make_test_article(ProviderId::Gemini, "third", 1000),
        ];
        let best = select_best(&articles).unwrap();
        assert_eq!(best.title, "first");
    }

    #[test]
    fn test_select_best_explicit_score_beats_word_count() {
        let mut short = make_test_article(ProviderId::OpenAi, "short", 200);
        short.score = Some(9000.0);
        let long = make_test_article(ProviderId::Gemini, "long", 2000);
        let articles = vec![long, short];
        let best = select_best(&articles).unwrap();
        assert_eq!(best.title, "short");
    }

    #[test]
    fn test_select_best_mixed_scored_and_unscored() {
        // Unscored falls back to word count, compared directly against
        // explicit scores.
        let mut scored = make_test_article(ProviderId::OpenAi, "scored", 100);
        scored.score = Some(1500.0);
        let unscored = make_test_article(ProviderId::Anthropic, "unscored", 1600);
        let articles = vec![scored, unscored];
        let best = select_best(&articles).unwrap();
        assert_eq!(best.title, "unscored");
    }

    #[test]
    fn test_select_best_nan_score_never_wins() {
        let mut poisoned = make_test_article(ProviderId::OpenAi, "poisoned", 100);
        poisoned.score = Some(f64::NAN);
        let sound = make_test_article(ProviderId::Gemini, "sound", 50);
        let articles = vec![sound, poisoned];
        let best = select_best(&articles).unwrap();
        assert_eq!(best.title, "sound");
    }

    #[test]
    fn test_select_best_index_matches_select_best() {
        let articles = vec![
            make_test_article(ProviderId::OpenAi, "a", 10),
            make_test_article(ProviderId::Gemini, "b", 20),
        ];
        let idx = select_best_index(&articles).unwrap();
        assert_eq!(articles[idx].title, select_best(&articles).unwrap().title);
        assert_eq!(idx, 1);
    }
}
