use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use konspekt_core::{
    GeminiClient, GeminiConfig, Summarizer, TimedTextClient, TranscriptSource, extract_video_id,
    parse_video_id, thumbnail_url,
};

#[derive(Parser)]
#[command(name = "konspekt")]
#[command(about = "Fetch YouTube captions and turn them into AI-generated notes")]
struct Cli {
    /// Video URL
    #[arg(required_unless_present = "list_models")]
    url: Option<String>,

    /// Caption language to request (e.g., "en", "de", "uk")
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// List the models available to the configured API key and exit
    #[arg(long)]
    list_models: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Validate API key early
    let config = match GeminiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    let gemini = GeminiClient::new(config);

    if cli.list_models {
        let spinner = create_spinner("Listing models...");
        let models = match gemini.list_models().await {
            Ok(models) => {
                spinner.finish_and_clear();
                models
            }
            Err(e) => {
                spinner.finish_and_clear();
                eprintln!("{} {}", style("Error:").red().bold(), e);
                std::process::exit(1);
            }
        };
        println!("\n{}\n", style("Available models").cyan().bold());
        for model in models {
            println!(
                "  {} {}",
                style(&model.name).green(),
                style(format!(
                    "supports: {}",
                    model.supported_generation_methods.join(", ")
                ))
                .dim()
            );
        }
        return Ok(());
    }

    let url = cli.url.expect("url is required unless --list-models");

    println!(
        "\n{}  {}\n",
        style("konspekt").cyan().bold(),
        style("YouTube Notes").dim()
    );

    let video_id = extract_video_id(&url);
    match parse_video_id(&url) {
        Some(id) => println!(
            "{} Thumbnail: {}",
            style("✓").green().bold(),
            style(thumbnail_url(&id)).dim()
        ),
        None => println!(
            "{} Could not read a video id from the link; trying anyway",
            style("!").yellow().bold()
        ),
    }

    println!("{}", style("─".repeat(60)).dim());

    // Step 1: Fetch transcript
    let source = TimedTextClient::new().with_language(cli.lang.as_str());
    let spinner = create_spinner("Fetching transcript...");
    let transcript = match source.fetch_transcript(&video_id).await {
        Ok(transcript) => transcript,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    spinner.finish_with_message(format!(
        "{} Transcript fetched: {} fragments",
        style("✓").green().bold(),
        transcript.fragments.len()
    ));

    // Step 2: Generate notes
    let spinner = create_spinner("Generating notes with Gemini...");
    let notes = match gemini.summarize(&transcript.text()).await {
        Ok(notes) => notes,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    spinner.finish_with_message(format!(
        "{} Notes generated",
        style("✓").green().bold()
    ));

    println!("{}", style("─".repeat(60)).dim());
    println!("\n{}\n", style("Detailed Notes").cyan().bold());
    println!("{notes}");

    Ok(())
}
