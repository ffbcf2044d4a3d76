/// Daily run: today's calendar brief → all enabled providers → best pick →
/// optional WordPress draft.
///
/// Requires at least one provider key (OPENAI_API_KEY, ANTHROPIC_API_KEY,
/// GEMINI_API_KEY). Publishing is attempted only when the WORDPRESS_* env
/// vars are present, and a publish failure never fails the run.
use draftpress::{topics, Orchestrator, WordPressPublisher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draftpress=debug".into()),
        )
        .init();

    let brief = topics::brief_for_date(chrono::Utc::now().date_naive());
    println!(
        "Brief: {} [{}] — {} words",
        brief.topic, brief.category, brief.target_length
    );

    let orchestrator = Orchestrator::from_env()?;
    println!("Providers: {:?}", orchestrator.provider_ids());

    let report = orchestrator.generate_and_select(&brief).await?;
    println!(
        "Selected {} ({} words, model {}) in {:?}",
        report.best.provider, report.best.word_count, report.best.model, report.elapsed
    );
    for alt in &report.alternatives {
        println!("  alternative: {} ({} words)", alt.provider, alt.word_count);
    }
    for failure in &report.failures {
        println!("  failed: {failure}");
    }

    // Publishing is secondary: report the error and keep the generation.
    match WordPressPublisher::from_env() {
        Ok(publisher) => match publisher.publish_draft(&report.best).await {
            Ok(draft) => println!("Draft #{} created: {}", draft.id, draft.link),
            Err(e) => println!("Publish failed (generation still succeeded): {e}"),
        },
        Err(_) => println!("WordPress env not configured; skipping publish."),
    }

    Ok(())
}
