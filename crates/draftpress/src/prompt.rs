// Prompt assembly — one deterministic prompt shared by every adapter.

use draftpress_types::ContentBrief;

/// Fixed style/format instruction block. Identical for every provider; only
/// the transport differs per adapter.
const STYLE_BLOCK: &str = "\
You are an experienced SEO content writer. Write in English with a \
professional, approachable tone.

Structure the article exactly as follows:
- An engaging introduction that states the reader's problem.
- One body section per heading listed in the task, in the given order, \
using the heading verbatim.
- A FAQ block of 5 to 7 question-and-answer pairs relevant to the topic.
- A closing call-to-action paragraph.

Work the target keywords in naturally; never stuff them. Stay within 10% \
of the target word count. Output plain article text only, no markdown \
fences and no commentary about the task.";

/// Build the generation prompt for a brief.
///
/// Deterministic: the same brief always yields byte-identical output, so a
/// round sends the same prompt to all providers and differences between
/// their articles come from the vendors alone.
pub fn build_prompt(brief: &ContentBrief) -> String {
    let sections = if brief.sections.is_empty() {
        "(writer's choice)".to_string()
    } else {
        brief.sections.join("; ")
    };

    format!(
        "{STYLE_BLOCK}\n\n\
         Task:\n\
         Topic: {topic}\n\
         Keywords: {keywords}\n\
         Target length: {target_length} words\n\
         Sections: {sections}\n\
         Category: {category}",
        topic = brief.topic,
        keywords = brief.keywords.join(", "),
        target_length = brief.target_length,
        category = brief.category,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftpress_types::Category;

    fn brief() -> ContentBrief {
        ContentBrief::new("Standing desks for home offices", Category::Productivity)
            .keywords(vec!["standing desk".into(), "ergonomics".into()])
            .target_length(1400)
            .sections(vec!["Health benefits".into(), "Buying guide".into()])
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&brief()), build_prompt(&brief()));
    }

    #[test]
    fn test_prompt_contains_every_brief_field() {
        let p = build_prompt(&brief());
        assert!(p.contains("Standing desks for home offices"));
        assert!(p.contains("standing desk, ergonomics"));
        assert!(p.contains("1400 words"));
        assert!(p.contains("Health benefits; Buying guide"));
        assert!(p.contains("productivity"));
    }

    #[test]
    fn test_prompt_contains_structural_requirements() {
        let p = build_prompt(&brief());
        assert!(p.contains("introduction"));
        assert!(p.contains("FAQ block of 5 to 7"));
        assert!(p.contains("call-to-action"));
        assert!(p.contains("10%"));
    }

    #[test]
    fn test_prompt_handles_empty_sections() {
        let b = ContentBrief::new("Topic", Category::Travel).keywords(vec!["kw".into()]);
        let p = build_prompt(&b);
        assert!(p.contains("Sections: (writer's choice)"));
    }
}
