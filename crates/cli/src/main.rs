//! Civic command line client.

#[macro_use]
extern crate log;

#[macro_use]
extern crate civic_result;

mod cli;
mod render;

use clap::Parser;
use civic_client::{greeting, CommentsSection, Context, CreateReportForm, ReportCard, ReportFeed};
use civic_files::ImageUpload;
use civic_result::Result;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Configure logging and environment
    civic_config::configure!(civic);

    let cli = Cli::parse();
    if let Err(error) = run(cli.cmd).await {
        debug!("{error:?}");
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    let context = Context::connect().await?;

    match command {
        Commands::Whoami => match greeting(&context.session) {
            Some(greeting) => println!("{greeting}"),
            None => println!("Not signed in"),
        },
        Commands::List { category } => {
            let mut feed = ReportFeed::new();
            feed.refresh(&context).await;
            feed.set_filter(category);

            println!("{}\n", render::stats(feed.stats()));
            println!("{}\n{}\n", feed.heading(), feed.found());

            let reports = feed.visible();
            if reports.is_empty() {
                println!("No reports found\n{}", feed.empty_message());
            }

            for report in reports {
                println!("{}\n", render::report(report));
            }
        }
        Commands::Comments { report } => {
            let mut section = CommentsSection::new(&report);
            section.refresh(&context).await;
            print_comments(&section);
        }
        Commands::Comment { report, text } => {
            let mut section = CommentsSection::new(&report);
            section.draft = text;
            section.submit(&context).await?;
            print_comments(&section);
        }
        Commands::Vote { report, direction } => {
            let mut feed = ReportFeed::new();
            feed.refresh(&context).await;
            let report = feed
                .get(&report)
                .cloned()
                .ok_or_else(|| create_error!(NotFound))?;

            let mut card = ReportCard::new(report);
            card.load_vote(&context).await;
            let state = card.vote(&context, direction).await?;

            println!("{}\n{}", render::report(&card.report), render::vote(state));
        }
        Commands::Create {
            title,
            description,
            location,
            category,
            image,
        } => {
            let image = match image {
                Some(path) => Some(ImageUpload::from_path(&path).map_err(|error| {
                    create_error!(FailedValidation {
                        error: format!("Could not read {}: {error}", path.display())
                    })
                })?),
                None => None,
            };

            let mut form = CreateReportForm::new();
            form.open();
            form.title = title;
            form.description = description;
            form.location = location;
            form.category = Some(category);
            form.image = image;

            let report = form.submit(&context).await?;
            info!("Report {} submitted", report.id);
            println!("Report submitted: {}", report.id);
        }
    }

    Ok(())
}

fn print_comments(section: &CommentsSection) {
    if section.comments().is_empty() {
        println!("No comments yet");
    }

    for comment in section.comments() {
        println!("{}", render::comment(comment));
    }
}
