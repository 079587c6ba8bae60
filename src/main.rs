use clap::Parser;
use find_images::{config, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "find-images")]
#[command(about = "Find image files and export a CSV manifest plus an HTML gallery")]
#[command(long_about = "\
Find image files and export a CSV manifest plus an HTML gallery

Walks ROOT recursively, skipping node_modules, dist, build, coverage and out
at any depth, and collects every .png, .jpg, .jpeg, .svg and .webp file
(case-insensitive). Then, in the current directory:

  image_files.csv       # filename, relative_path, full_path per image
  images/               # one copy per image, named after its relative path
  │   ├── a_pic.png     #   (a/pic.png)
  │   └── a_b_pic.png   #   (a/b/pic.png)
  image_gallery.html    # table with a preview of every copy

Copies whose flattened names collide overwrite each other.

Run 'find-images --print-config' for a documented config file.")]
#[command(version)]
struct Cli {
    /// Directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Config file (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV manifest path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// HTML gallery path
    #[arg(long)]
    html: Option<PathBuf>,

    /// Directory receiving the image copies
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Print a stock config file with all options documented, then exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut site_config = config::load_config(cli.config.as_deref())?;
    if let Some(csv) = cli.csv {
        site_config.output.table = csv;
    }
    if let Some(html) = cli.html {
        site_config.output.gallery = html;
    }
    if let Some(images_dir) = cli.images_dir {
        site_config.output.images_dir = images_dir;
    }
    site_config.validate()?;

    let options = pipeline::RunOptions::new(cli.root, site_config);
    let summary = pipeline::run(&options, &mut |event| output::print_event(&event))?;
    output::print_summary(&summary);

    Ok(())
}
