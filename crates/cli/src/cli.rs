//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use civic_models::v0::{Category, CategoryFilter, VoteDirection};

#[derive(Parser, Debug)]
#[command(
    name = "civic",
    version,
    about = "Report and discuss civic issues in your community",
    long_about = "Report and discuss civic issues in your community.\n\nThe backend is read from Civic.toml and CIVIC_ environment variables, an empty backend URL uses an in-memory store.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show who is signed in
    Whoami,
    /// List reports, newest first
    #[command(after_help = "Examples:\n  civic list\n  civic list --category \"road damage\"")]
    List {
        #[arg(long, default_value_t = CategoryFilter::All, help = "Only show this category (default: All)")]
        category: CategoryFilter,
    },
    /// Show the comments on a report, oldest first
    Comments {
        #[arg(help = "Report id")]
        report: String,
    },
    /// Comment on a report
    Comment {
        #[arg(help = "Report id")]
        report: String,
        #[arg(help = "Comment text")]
        text: String,
    },
    /// Vote on whether a report is true, repeating a vote withdraws it
    Vote {
        #[arg(help = "Report id")]
        report: String,
        #[arg(help = "true or false")]
        direction: VoteDirection,
    },
    /// File a new report
    #[command(
        after_help = "Examples:\n  civic create --title \"Broken light\" --description \"Out for a week\" --location \"Oak St\" --category \"street light issue\" --image light.jpg"
    )]
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        category: Category,
        #[arg(long, help = "Image to attach")]
        image: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use civic_models::v0::{Category, CategoryFilter, VoteDirection};

    use super::{Cli, Commands};

    #[test]
    fn list_defaults_to_every_category() {
        let cli = Cli::try_parse_from(["civic", "list"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Commands::List {
                category: CategoryFilter::All
            }
        ));

        let cli = Cli::try_parse_from(["civic", "list", "--category", "road-damage"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Commands::List {
                category: CategoryFilter::Only(Category::RoadDamage)
            }
        ));
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["civic", "list", "--category", "potholes"]).is_err());
    }

    #[test]
    fn vote_direction() {
        let cli = Cli::try_parse_from(["civic", "vote", "01J0", "false"]).unwrap();
        let Commands::Vote { report, direction } = cli.cmd else {
            panic!("expected vote")
        };
        assert_eq!(report, "01J0");
        assert_eq!(direction, VoteDirection::False);

        assert!(Cli::try_parse_from(["civic", "vote", "01J0", "maybe"]).is_err());
    }

    #[test]
    fn create_with_image() {
        let cli = Cli::try_parse_from([
            "civic",
            "create",
            "--title",
            "Broken light",
            "--description",
            "Out for a week",
            "--location",
            "Oak St",
            "--category",
            "Street Light Issue",
            "--image",
            "light.jpg",
        ])
        .unwrap();

        let Commands::Create {
            category, image, ..
        } = cli.cmd
        else {
            panic!("expected create")
        };
        assert_eq!(category, Category::StreetLightIssue);
        assert_eq!(image, Some(PathBuf::from("light.jpg")));
    }

    #[test]
    fn create_requires_fields() {
        assert!(Cli::try_parse_from(["civic", "create", "--title", "Broken light"]).is_err());
    }
}
