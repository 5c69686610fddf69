//! Build helpers: man pages and shell completions for `gradewise`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

const BIN_NAME: &str = "gradewise";

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for gradewise")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Render man pages for the CLI and each subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
        /// Only this shell (default: all supported shells)
        #[arg(long, value_enum)]
        shell: Option<Shell>,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => man(&out),
        Task::Completions { out, shell } => completions(&out, shell),
    }
}

fn man(out: &Path) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let cmd = gradewise::command();
    render_page(&cmd, BIN_NAME, out)?;
    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let name = format!("{BIN_NAME}-{}", sub.get_name());
        render_page(sub, &name, out)?;
    }
    println!("man pages written to {}", out.display());
    Ok(())
}

fn render_page(cmd: &clap::Command, name: &str, out: &Path) -> io::Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .title(name)
        .render(&mut buffer)?;
    fs::write(out.join(format!("{name}.1")), buffer)
}

fn completions(out: &Path, only: Option<Shell>) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let shells: Vec<Shell> = only.map_or_else(|| Shell::value_variants().to_vec(), |s| vec![s]);
    let mut cmd = gradewise::command();
    for shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, BIN_NAME, out)?;
        println!("{shell}: {}", path.display());
    }
    Ok(())
}
