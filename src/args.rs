use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use newsclip::Section;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "newsclip")]
#[command(about = "Search a news site and export matching articles to CSV")]
#[command(version)]
pub struct Args {
    /// Phrase to search articles for
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub phrase: String,

    /// Section to narrow results to
    #[arg(short, long, value_enum, default_value_t = Section::Any)]
    pub section: Section,

    /// How many months back to search (0 searches the current month only)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub months: u32,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver server URL (takes precedence over the configuration
    /// and the WEBDRIVER_URL environment variable)
    #[arg(long)]
    pub webdriver_url: Option<String>,
}
