// Topic source — static per-category seed tables rotated by calendar.

use chrono::{Datelike, NaiveDate, Weekday};

use draftpress_types::{Category, ContentBrief};

/// One entry of the editorial seed table.
struct TopicSeed {
    topic: &'static str,
    keywords: &'static [&'static str],
    sections: &'static [&'static str],
    target_length: u32,
}

/// Each weekday owns one category, so a daily run cycles through every
/// vertical once per week.
pub fn category_for_weekday(weekday: Weekday) -> Category {
    match weekday {
        Weekday::Mon => Category::Technology,
        Weekday::Tue => Category::Marketing,
        Weekday::Wed => Category::Finance,
        Weekday::Thu => Category::Health,
        Weekday::Fri => Category::Travel,
        Weekday::Sat => Category::Ecommerce,
        Weekday::Sun => Category::Productivity,
    }
}

/// Build the brief for a calendar date: the weekday picks the category, the
/// ISO week number rotates through that category's seed table. Deterministic
/// for a given date.
pub fn brief_for_date(date: NaiveDate) -> ContentBrief {
    let category = category_for_weekday(date.weekday());
    let seeds = seeds_for(category);
    let seed = &seeds[date.iso_week().week0() as usize % seeds.len()];

    ContentBrief::new(seed.topic, category)
        .keywords(seed.keywords.iter().map(|k| k.to_string()).collect())
        .target_length(seed.target_length)
        .sections(seed.sections.iter().map(|s| s.to_string()).collect())
}

fn seeds_for(category: Category) -> &'static [TopicSeed] {
    match category {
        Category::Technology => &[
            TopicSeed {
                topic: "How to choose a password manager",
                keywords: &["password manager", "online security", "2FA"],
                sections: &["Why browsers aren't enough", "Features that matter", "Top picks"],
                target_length: 1400,
            },
            TopicSeed {
                topic: "Setting up a home NAS for backups",
                keywords: &["home NAS", "backup strategy", "RAID"],
                sections: &["Hardware basics", "Choosing drives", "Backup schedules"],
                target_length: 1600,
            },
            TopicSeed {
                topic: "Mesh Wi-Fi vs. a single router",
                keywords: &["mesh wifi", "router", "home network"],
                sections: &["How mesh works", "When a router is enough", "Placement tips"],
                target_length: 1300,
            },
        ],
        Category::Marketing => &[
            TopicSeed {
                topic: "Email newsletters that people actually read",
                keywords: &["email newsletter", "open rate", "subject lines"],
                sections: &["Finding your cadence", "Writing subject lines", "Measuring what matters"],
                target_length: 1300,
            },
            TopicSeed {
                topic: "A beginner's guide to keyword research",
                keywords: &["keyword research", "search intent", "SEO tools"],
                sections: &["Understanding intent", "Free tooling", "Building a content map"],
                target_length: 1500,
            },
            TopicSeed {
                topic: "Repurposing long-form content for social media",
                keywords: &["content repurposing", "social media", "short-form video"],
                sections: &["Choosing source material", "Format playbook", "Scheduling"],
                target_length: 1200,
            },
        ],
        Category::Finance => &[
            TopicSeed {
                topic: "Emergency funds: how much is enough",
                keywords: &["emergency fund", "savings", "personal finance"],
                sections: &["The three-month rule", "Where to keep it", "Building it gradually"],
                target_length: 1200,
            },
            TopicSeed {
                topic: "Index funds explained for first-time investors",
                keywords: &["index funds", "passive investing", "expense ratio"],
                sections: &["How index funds work", "Costs to watch", "Common mistakes"],
                target_length: 1500,
            },
            TopicSeed {
                topic: "Understanding your credit score",
                keywords: &["credit score", "credit report", "credit utilization"],
                sections: &["What moves the score", "Checking for errors", "Rebuilding credit"],
                target_length: 1300,
            },
        ],
        Category::Health => &[
            TopicSeed {
                topic: "Sleep hygiene for shift workers",
                keywords: &["sleep hygiene", "shift work", "circadian rhythm"],
                sections: &["Light management", "Meal timing", "Napping strategies"],
                target_length: 1300,
            },
            TopicSeed {
                topic: "Strength training without a gym",
                keywords: &["bodyweight training", "home workout", "progressive overload"],
                sections: &["Core movements", "Weekly structure", "Tracking progress"],
                target_length: 1400,
            },
            TopicSeed {
                topic: "Hydration myths and what the evidence says",
                keywords: &["hydration", "water intake", "electrolytes"],
                sections: &["The eight-glasses myth", "Signs you need more", "Overhydration"],
                target_length: 1100,
            },
        ],
        Category::Travel => &[
            TopicSeed {
                topic: "Carry-on only: packing for two weeks",
                keywords: &["carry-on packing", "travel light", "packing cubes"],
                sections: &["The capsule wardrobe", "Toiletries under 100ml", "Laundry on the road"],
                target_length: 1300,
            },
            TopicSeed {
                topic: "Shoulder season travel in southern Europe",
                keywords: &["shoulder season", "southern europe", "travel deals"],
                sections: &["Best months by country", "Weather tradeoffs", "Booking windows"],
                target_length: 1400,
            },
            TopicSeed {
                topic: "Travel insurance: what it actually covers",
                keywords: &["travel insurance", "trip cancellation", "medical coverage"],
                sections: &["Reading the fine print", "When it's worth it", "Filing a claim"],
                target_length: 1200,
            },
        ],
        Category::Ecommerce => &[
            TopicSeed {
                topic: "Reducing cart abandonment without discounts",
                keywords: &["cart abandonment", "checkout optimization", "conversion rate"],
                sections: &["Shipping transparency", "Guest checkout", "Recovery emails"],
                target_length: 1300,
            },
            TopicSeed {
                topic: "Product photography on a budget",
                keywords: &["product photography", "ecommerce images", "lightbox"],
                sections: &["Lighting basics", "Smartphone setups", "Editing workflow"],
                target_length: 1200,
            },
            TopicSeed {
                topic: "Choosing between marketplaces and your own store",
                keywords: &["marketplace vs own store", "ecommerce platform", "fees"],
                sections: &["Fee structures", "Owning the customer", "A hybrid approach"],
                target_length: 1500,
            },
        ],
        Category::Productivity => &[
            TopicSeed {
                topic: "Time blocking for people with meeting-heavy calendars",
                keywords: &["time blocking", "calendar management", "deep work"],
                sections: &["Auditing your week", "Defending focus blocks", "Handling overruns"],
                target_length: 1300,
            },
            TopicSeed {
                topic: "A minimal note-taking system that sticks",
                keywords: &["note taking", "second brain", "knowledge management"],
                sections: &["Capture without friction", "Weekly review", "Avoiding tool-hopping"],
                target_length: 1200,
            },
            TopicSeed {
                topic: "Single-tasking: the case against multitasking",
                keywords: &["single tasking", "focus", "context switching"],
                sections: &["The cost of switching", "Batching shallow work", "Environment design"],
                target_length: 1100,
            },
        ],
    }
}
