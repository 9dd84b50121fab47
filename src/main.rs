use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use pollinai::{
    logger::{self, LoggerConfig},
    Config, ImageController, ImageModel, ImageOutcome, LogNotifier, ModelInfo, PollinationsClient,
    TextController, TextModel, TextOutcome,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate images and text with Pollinations", long_about = None)]
struct Cli {
    /// Log request details at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable image and text models
    Models {
        /// Print the catalogs as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate an image and print its URL
    Image(ImageArgs),
    /// Generate text and print it verbatim
    Text(TextArgs),
}

#[derive(Args, Debug)]
struct ImageArgs {
    /// Prompt words, joined with spaces
    #[arg(required = true)]
    prompt: Vec<String>,
    #[arg(short, long)]
    model: Option<ImageModel>,
    /// Clamped to 64..=2048
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,
    /// Clamped to 64..=2048
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,
    #[arg(long, allow_negative_numbers = true, conflicts_with = "random_seed")]
    seed: Option<i64>,
    /// Draw a fresh seed for this request
    #[arg(long)]
    random_seed: bool,
    /// Also write the fetched image to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TextArgs {
    /// Prompt words, joined with spaces
    #[arg(required = true)]
    prompt: Vec<String>,
    #[arg(short, long)]
    model: Option<TextModel>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    logger::init_with_config(LoggerConfig::new().with_level(level))?;

    match dotenv::dotenv() {
        Ok(path) => log::debug!(".env loaded from {}", path.display()),
        Err(_) => log::debug!("No .env file found, using process environment"),
    }

    let config = Config::from_env()?;
    if cli.verbose {
        logger::log_config_info(&config);
    }

    match cli.command {
        Command::Models { json } => print_models(json)?,
        Command::Image(args) => {
            let client = PollinationsClient::new(config)?;
            if !run_image(&client, args).await? {
                std::process::exit(1);
            }
        }
        Command::Text(args) => {
            let client = PollinationsClient::new(config)?;
            if !run_text(&client, args).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_models(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let images = PollinationsClient::image_models();
    let texts = PollinationsClient::text_models();

    if json {
        let catalog = serde_json::json!({ "image": images, "text": texts });
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let print_section = |title: &str, models: &[ModelInfo]| {
        println!("{}:", title);
        for info in models {
            println!("  {:<14} {}", info.id, info);
        }
    };
    print_section("Image models", &images);
    println!();
    print_section("Text models", &texts);
    Ok(())
}

async fn run_image(
    client: &PollinationsClient,
    args: ImageArgs,
) -> Result<bool, Box<dyn std::error::Error>> {
    let controller = ImageController::from_client(client, Arc::new(LogNotifier));
    controller.edit_form(|form| {
        form.prompt = args.prompt.join(" ");
        form.model = args.model;
        if let Some(width) = args.width {
            form.set_width(width);
        }
        if let Some(height) = args.height {
            form.set_height(height);
        }
        if let Some(seed) = args.seed {
            form.set_seed(seed);
        }
        form.set_randomize_seed(args.random_seed);
    });

    match controller.submit().await? {
        ImageOutcome::Generated(response) => {
            println!("{}", response.url);
            if let Some(path) = args.output {
                let data = client.image().download(&response.url).await?;
                fs::write(&path, &data)?;
                log::info!("Saved {} bytes to {}", data.len(), path.display());
            }
            Ok(true)
        }
        ImageOutcome::Failed(_) | ImageOutcome::Superseded => Ok(false),
    }
}

async fn run_text(
    client: &PollinationsClient,
    args: TextArgs,
) -> Result<bool, Box<dyn std::error::Error>> {
    let controller = TextController::from_client(client, Arc::new(LogNotifier));
    controller.edit_form(|form| {
        form.prompt = args.prompt.join(" ");
        form.model = args.model;
    });

    let outcome = controller.submit().await?;
    if let Some(text) = controller.displayed_text() {
        print!("{}", text);
        io::stdout().flush()?;
    }
    Ok(matches!(outcome, TextOutcome::Generated(_)))
}
