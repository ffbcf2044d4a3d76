/// Multi-provider comparison: send the same brief to every enabled provider
/// and show the full round, not just the selected article.
///
/// Demonstrates provider-agnostic code — the orchestrator and selector only
/// ever see the ArticleGenerator trait.
use draftpress::{select_best, Category, ContentBrief, Orchestrator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let brief = ContentBrief::new("Remote work ergonomics on a budget", Category::Productivity)
        .keywords(vec![
            "ergonomics".into(),
            "home office".into(),
            "remote work".into(),
        ])
        .target_length(1200)
        .sections(vec![
            "Desk and chair setup".into(),
            "Monitor placement".into(),
            "Cheap upgrades that matter".into(),
        ]);

    let orchestrator = Orchestrator::from_env()?;
    let round = orchestrator.generate_all(&brief).await?;

    println!(
        "{} of {} providers succeeded in {:?}",
        round.success_count(),
        round.dispatched,
        round.elapsed
    );
    for article in &round.articles {
        println!(
            "--- {} ({} words, model {}) ---",
            article.provider, article.word_count, article.model
        );
        let preview: String = article.body.chars().take(200).collect();
        println!("{preview}…\n");
    }
    for failure in &round.failures {
        println!("failed: {failure}");
    }

    if let Some(best) = select_best(&round.articles) {
        println!("Selected: {} ({} words)", best.provider, best.word_count);
    }

    Ok(())
}
