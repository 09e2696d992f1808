//! `oneminute explain`: Run the pipeline for one topic and print it.

use oneminute_config::AppConfig;
use oneminute_core::{AudienceLevel, Explanation, Insights, ReferenceSource, TARGET_WORDS, Topic};
use oneminute_explain::{ExplanationPipeline, InsightBuilder};
use oneminute_reference::WikipediaSource;
use std::sync::Arc;

pub struct ExplainOptions {
    pub level: AudienceLevel,
    pub json: bool,
    pub insights: bool,
}

pub async fn run(raw_topic: &str, options: ExplainOptions) -> Result<(), Box<dyn std::error::Error>> {
    let topic = Topic::parse(raw_topic)?;
    let config = AppConfig::load()?;

    let provider = oneminute_providers::build_from_config(&config);
    if provider.is_none() {
        tracing::info!("No API key configured, generative tier disabled");
    }

    let reference: Option<Arc<dyn ReferenceSource>> = if config.reference.enabled {
        Some(Arc::new(WikipediaSource::from_config(&config.reference)))
    } else {
        None
    };

    let pipeline = ExplanationPipeline::with_components(&config, provider.clone(), reference);
    let explanation = pipeline.explain(&topic, options.level).await;

    let insights = if options.insights {
        let builder = InsightBuilder::from_config(&config, provider);
        Some(
            builder
                .build(topic.as_str(), &explanation.text, explanation.source)
                .await,
        )
    } else {
        None
    };

    if options.json {
        let value = to_json(&topic, options.level, &explanation, insights.as_ref());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!(
            "{}",
            render(&topic, options.level, &explanation, insights.as_ref())
        );
    }

    Ok(())
}

/// Display-only reading progress toward the soft target.
fn progress(explanation: &Explanation) -> f64 {
    (explanation.word_count() as f64 / TARGET_WORDS as f64).min(1.0)
}

fn render(
    topic: &Topic,
    level: AudienceLevel,
    explanation: &Explanation,
    insights: Option<&Insights>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("⏱️  {topic} ({level})\n\n"));
    out.push_str(&explanation.text);
    out.push_str("\n\n");

    let words = explanation.word_count();
    out.push_str(&format!(
        "   Words:    {words}/{TARGET_WORDS} ({:.0}%)\n",
        progress(explanation) * 100.0
    ));
    out.push_str(&format!("   Source:   {}\n", explanation.source));
    if explanation.enforced {
        out.push_str("   ⚠️  Trimmed to the hard word limit\n");
    }

    if let Some(insights) = insights {
        out.push_str("\n📌 Key takeaways\n");
        for takeaway in &insights.takeaways {
            out.push_str(&format!("   • {takeaway}\n"));
        }
        out.push_str("\n🌍 Real-world example\n");
        out.push_str(&format!("   {}\n", insights.example));
    }

    out
}

fn to_json(
    topic: &Topic,
    level: AudienceLevel,
    explanation: &Explanation,
    insights: Option<&Insights>,
) -> serde_json::Value {
    let mut value = serde_json::json!({
        "topic": topic.as_str(),
        "level": level.as_str(),
        "explanation": explanation.text,
        "word_count": explanation.word_count(),
        "source": explanation.source,
        "enforced": explanation.enforced,
        "progress": progress(explanation),
    });

    if let Some(insights) = insights {
        value["takeaways"] = serde_json::json!(insights.takeaways);
        value["example"] = serde_json::json!(insights.example);
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneminute_core::SourceTier;

    fn explanation(words: usize, enforced: bool) -> Explanation {
        Explanation {
            text: vec!["word"; words].join(" "),
            source: SourceTier::Secondary,
            enforced,
        }
    }

    fn insights() -> Insights {
        Insights {
            takeaways: ["One.".into(), "Two.".into(), "Three.".into()],
            example: "Example: a case.".into(),
        }
    }

    #[test]
    fn progress_is_capped() {
        assert!((progress(&explanation(70, false)) - 0.5).abs() < 1e-9);
        assert!((progress(&explanation(150, true)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn render_shows_source_and_notice() {
        let topic = Topic::parse("Recursion").unwrap();
        let out = render(
            &topic,
            AudienceLevel::Beginner,
            &explanation(150, true),
            Some(&insights()),
        );
        assert!(out.contains("Recursion (Beginner)"));
        assert!(out.contains("Source:   secondary"));
        assert!(out.contains("hard word limit"));
        assert!(out.contains("• Two."));
        assert!(out.contains("Example: a case."));
    }

    #[test]
    fn render_without_insights() {
        let topic = Topic::parse("Recursion").unwrap();
        let out = render(&topic, AudienceLevel::Advanced, &explanation(10, false), None);
        assert!(!out.contains("takeaways"));
        assert!(!out.contains("hard word limit"));
    }

    #[test]
    fn json_shape() {
        let topic = Topic::parse("APIs").unwrap();
        let value = to_json(
            &topic,
            AudienceLevel::Intermediate,
            &explanation(14, false),
            Some(&insights()),
        );
        assert_eq!(value["level"], "Intermediate");
        assert_eq!(value["source"], "secondary");
        assert_eq!(value["word_count"], 14);
        assert_eq!(value["takeaways"].as_array().unwrap().len(), 3);
    }
}
