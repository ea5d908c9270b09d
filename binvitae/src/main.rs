//! Command-line tool for a personal site's markdown documents.
//!
//! Usage: vitae [OPTIONS] <COMMAND>
//!
//! Commands:
//!   parse    Parse one document and print its metadata (json, yaml, toml, frontmatter)
//!   check    Report every line the parser skipped or reinterpreted
//!   index    Write the blog index (blog-index.json)
//!   posts    List blog posts, newest first, with search and paging
//!   post     Show one blog post
//!   profile  Show the profile
//!
//! Options:
//!   --config <FILE>  Configuration file [default: ./vitae.toml when present]
//!   --root <DIR>     Site directory, overriding [site] root
//!   -v, --verbose    Debug logging

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use libvitae::site::{excerpt, format_date, BlogPost, Profile, Section, DEFAULT_EXCERPT_LENGTH};
use libvitae::{encode, parse_frontmatter_with, Format, ParseOptions, QuotedScalars, Value};
use thiserror::Error;
use walkdir::WalkDir;

mod config;
mod index;
mod loader;
mod logging;
mod transcode;

use config::{Config, ConfigError};
use index::IndexError;
use loader::LoadError;

#[derive(Parser, Debug)]
#[command(name = "vitae", version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Site directory, overriding [site] root
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one document and print its metadata
    Parse {
        /// Input file (stdin when absent or `-`)
        file: Option<String>,
        /// Output format
        #[arg(short = 't', long = "to", value_enum, default_value_t = MetadataFormat::Json)]
        to: MetadataFormat,
        /// Print the body instead of the metadata
        #[arg(long)]
        body: bool,
        /// Print diagnostics for skipped and reinterpreted lines
        #[arg(long)]
        strict: bool,
        /// Keep quoted values as strings
        #[arg(long)]
        preserve_quoted: bool,
    },
    /// Report every line the parser skipped or reinterpreted
    Check {
        /// Files, or directories to search for `.md` files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Write the blog index
    Index {
        #[arg(long, value_name = "DIR")]
        blog_dir: Option<PathBuf>,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List blog posts, newest first
    Posts {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one blog post
    Post {
        /// Path relative to the blog directory, as listed in the index
        id: String,
    },
    /// Show the profile
    Profile {
        #[arg(short = 't', long = "to", value_enum, default_value_t = ProfileFormat::Text)]
        to: ProfileFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MetadataFormat {
    Json,
    Yaml,
    Toml,
    Frontmatter,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ProfileFormat {
    Text,
    Json,
    Yaml,
    Toml,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("failed to read {0}: {1}")]
    Read(String, #[source] io::Error),

    #[error("Cannot convert to {0}: {1}")]
    Transcode(&'static str, String),

    #[error("no blog post with id {0}")]
    PostNotFound(String),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        config.site.root = root;
    }
    logging::init(&config.logging, cli.verbose);

    match cli.command {
        Command::Parse {
            file,
            to,
            body,
            strict,
            preserve_quoted,
        } => {
            let mut options = config.parse_options();
            options.strict = strict;
            if preserve_quoted {
                options.quoted_scalars = QuotedScalars::Preserve;
            }
            parse_command(file.as_deref(), to, body, options)
        }
        Command::Check { paths } => check_command(&paths, &config),
        Command::Index { blog_dir, output } => {
            let blog_dir = blog_dir.unwrap_or_else(|| config.site.blog_path());
            let output = output.unwrap_or_else(|| config.site.index_path());
            let entries = index::write_index(&blog_dir, &output)?;
            println!("Wrote {} entries to {}", entries.len(), output.display());
            Ok(0)
        }
        Command::Posts { search, page } => {
            let mut state = loader::load_site(&config.site, &config.parse_options()).await?;
            if let Some(query) = search {
                state.set_search(&query);
            }
            state.change_page(page);
            print_posts(&state.visible_posts());
            Ok(0)
        }
        Command::Post { id } => {
            let posts = loader::load_blog_posts(&config.site, &config.parse_options()).await;
            let post = posts
                .iter()
                .find(|post| post.id == id)
                .ok_or(CliError::PostNotFound(id))?;
            print_post(post);
            Ok(0)
        }
        Command::Profile { to } => {
            let profile = loader::load_profile(&config.site, &config.parse_options()).await?;
            let output = match to {
                ProfileFormat::Text => render_profile(&profile),
                ProfileFormat::Json => metadata_output(profile.metadata(), MetadataFormat::Json)?,
                ProfileFormat::Yaml => metadata_output(profile.metadata(), MetadataFormat::Yaml)?,
                ProfileFormat::Toml => metadata_output(profile.metadata(), MetadataFormat::Toml)?,
            };
            write_text_output(&output);
            Ok(0)
        }
    }
}

fn read_input(file: Option<&str>) -> Result<String, CliError> {
    match file {
        None | Some("-") => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| CliError::Read("stdin".to_string(), e))?;
            Ok(input)
        }
        Some(path) => fs::read_to_string(path).map_err(|e| CliError::Read(path.to_string(), e)),
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

fn parse_command(
    file: Option<&str>,
    to: MetadataFormat,
    body: bool,
    mut options: ParseOptions,
) -> Result<i32, CliError> {
    let input = read_input(file)?;
    if let Some(path) = file.filter(|p| *p != "-") {
        options.filename = Some(display_name(path));
    }

    let parsed = parse_frontmatter_with(&input, &options);
    for diagnostic in &parsed.diagnostics {
        eprintln!("{}", diagnostic);
    }

    if body {
        print!("{}", parsed.value.body);
    } else {
        write_text_output(&metadata_output(&parsed.value.metadata, to)?);
    }
    Ok(0)
}

fn metadata_output(metadata: &libvitae::Mapping, to: MetadataFormat) -> Result<String, CliError> {
    let value = Value::Mapping(metadata.clone());
    match to {
        MetadataFormat::Json => Ok(encode(&value, Format::Json)),
        MetadataFormat::Frontmatter => Ok(encode(&value, Format::Frontmatter)),
        MetadataFormat::Yaml => {
            transcode::yaml::encode(&value).map_err(|e| CliError::Transcode("YAML", e))
        }
        MetadataFormat::Toml => {
            transcode::toml::encode(&value).map_err(|e| CliError::Transcode("TOML", e))
        }
    }
}

/// Markdown files named by `paths`, directories searched recursively.
fn collect_documents(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .flatten()
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|p| p.extension().map(|e| e == "md").unwrap_or(false))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn check_command(paths: &[PathBuf], config: &Config) -> Result<i32, CliError> {
    let mut had_errors = false;

    for path in collect_documents(paths) {
        let path_str = path.display().to_string();
        let input = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path_str, e);
                had_errors = true;
                continue;
            }
        };

        let options = ParseOptions {
            strict: true,
            ..config.parse_options()
        }
        .with_filename(path_str.clone());
        let parsed = parse_frontmatter_with(&input, &options);
        if parsed.diagnostics.is_empty() {
            println!("{}: ok", path_str);
        } else {
            had_errors = true;
            for diagnostic in &parsed.diagnostics {
                println!("{}", diagnostic);
            }
        }
    }

    Ok(if had_errors { 1 } else { 0 })
}

fn print_posts(page: &libvitae::site::Page<&BlogPost>) {
    if page.items.is_empty() {
        println!("No posts found.");
        return;
    }
    for post in &page.items {
        println!("{}  {}", format_date(&post.date), post.title);
        println!("    id: {}", post.id);
        if !post.tags.is_empty() {
            println!("    tags: {}", post.tags.join(", "));
        }
        println!("    {}", excerpt(post, DEFAULT_EXCERPT_LENGTH));
        println!();
    }
    let mut footer = format!("Page {} of {}", page.number, page.total_pages);
    if page.has_previous() {
        footer.push_str("  [previous]");
    }
    if page.has_next() {
        footer.push_str("  [next]");
    }
    println!("{}", footer);
}

fn print_post(post: &BlogPost) {
    println!("{}", post.title);
    if !post.date.is_empty() {
        println!("{}", format_date(&post.date));
    }
    if !post.tags.is_empty() {
        println!("tags: {}", post.tags.join(", "));
    }
    println!();
    write_text_output(&post.content);
}

fn render_profile(profile: &Profile) -> String {
    let mut out = String::new();
    for line in [profile.name(), profile.title()].into_iter().flatten() {
        out.push_str(&line);
        out.push('\n');
    }
    for link in profile.contact_links() {
        out.push_str(&format!("{}: {}\n", link.label, link.url));
    }
    if let Some(about) = profile.about() {
        out.push_str(&format!("\n{}\n", about));
    }

    for section in profile.visible_sections() {
        out.push_str(&format!("\n{}\n", section));
        if section == Section::Papers {
            for paper in profile.papers() {
                let year = paper.year.as_deref().unwrap_or("");
                out.push_str(&format!("  {}  {}\n", year, paper.title));
                for line in [paper.authors.as_ref(), paper.venue.as_ref()]
                    .into_iter()
                    .flatten()
                {
                    out.push_str(&format!("        {}\n", line));
                }
                for link in &paper.links {
                    out.push_str(&format!("        {}: {}\n", link.label, link.url));
                }
            }
            continue;
        }
        for entry in profile.section(section) {
            let year = entry.year.as_deref().unwrap_or("");
            out.push_str(&format!("  {}  {}\n", year, entry.heading));
            for line in entry.subheading.iter().chain(entry.details.iter()) {
                out.push_str(&format!("        {}\n", line));
            }
        }
    }
    out
}

fn write_text_output(output: &str) {
    print!("{}", output);
    // Ensure output ends with newline
    if !output.ends_with('\n') {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libvitae::parse_frontmatter;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["vitae", "-v", "parse", "post.md", "-t", "yaml", "--strict"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Parse {
                file, to, strict, ..
            } => {
                assert_eq!(file.as_deref(), Some("post.md"));
                assert_eq!(to, MetadataFormat::Yaml);
                assert!(strict);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_check_requires_paths() {
        assert!(Cli::try_parse_from(["vitae", "check"]).is_err());
    }

    #[test]
    fn test_render_profile() {
        let document = parse_frontmatter(
            "---\nname: Ada\ncontact:\n  email: a@b.com\nawards:\n  - title: Medal\n    year: 1840\n    organization: Society\n---\n",
        );
        let text = render_profile(&Profile::from_metadata(document.metadata));
        assert_eq!(
            text,
            "Ada\nEmail: mailto:a@b.com\n\nAwards\n  1840  Medal\n        Society\n"
        );
    }

    #[test]
    fn test_metadata_output_toml() {
        let document = parse_frontmatter("---\ntitle: Hi\n---\n");
        assert_eq!(
            metadata_output(&document.metadata, MetadataFormat::Toml).unwrap(),
            "title = \"Hi\"\n"
        );
    }
}
