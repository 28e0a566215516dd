use super::{BriefingArgs, InsightArgs};
use anyhow::Result;
use daybrief_core::ContentEntry;
use std::path::Path;

fn load_entry(path: &Path) -> Result<ContentEntry> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    let entry: ContentEntry = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("{} is not a valid content entry: {}", path.display(), e))?;
    Ok(entry)
}

async fn post_generate(base: &str, body: serde_json::Value) -> Result<serde_json::Value> {
    let client = reqwest::Client::new();
    let url = format!("{}/api/generate", base);
    let resp = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP request failed: {}. Is `daybrief serve` running?", e))?;

    if !resp.status().is_success() {
        let body: serde_json::Value = resp.json().await?;
        let err = body["error"].as_str().unwrap_or("unknown error");
        anyhow::bail!("{}", err);
    }

    let body: serde_json::Value = resp.json().await?;
    Ok(body["result"].clone())
}

pub async fn briefing(args: BriefingArgs, base: &str) -> Result<()> {
    let entry = load_entry(&args.entry)?;
    let result = post_generate(
        base,
        serde_json::json!({ "action": "briefing", "entry": entry }),
    )
    .await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Briefing for \"{}\" ({})", entry.title, entry.date);
    println!("{}", "─".repeat(60));
    println!(
        "Modern relevance: {}",
        result["modernRelevance"].as_str().unwrap_or("-")
    );
    println!("Key takeaways:");
    for takeaway in result["keyTakeaways"].as_array().into_iter().flatten() {
        println!("  • {}", takeaway.as_str().unwrap_or("-"));
    }
    println!(
        "Challenge question: {}",
        result["challengeQuestion"].as_str().unwrap_or("-")
    );

    Ok(())
}

pub async fn insight(args: InsightArgs, base: &str) -> Result<()> {
    let entry = load_entry(&args.entry)?;
    let result = post_generate(
        base,
        serde_json::json!({
            "action": "insight",
            "entry": entry,
            "userQuery": args.query,
        }),
    )
    .await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.as_str().unwrap_or(""));
    Ok(())
}
