//! Filter option listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use fxbridge_config::{FilterKind, OptionInfo};
use fxbridge_core::reverb_pattern;

#[derive(Args)]
pub struct OptionsArgs {
    /// Show options for a specific filter
    #[arg(value_name = "FILTER")]
    filter: Option<String>,
}

pub fn run(args: OptionsArgs) -> anyhow::Result<()> {
    let Some(name) = &args.filter else {
        println!("Available Filters");
        println!("=================");
        println!();
        for kind in FilterKind::ALL {
            println!("  {:16}  {} option(s)", kind.name(), kind.options().len());
        }
        println!();
        println!("Use 'fxbridge options <FILTER>' for details.");
        return Ok(());
    };

    let kind = FilterKind::from_name(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown filter: {}", name))?;

    println!("{}", kind.name());
    println!("{}", "=".repeat(kind.name().len()));
    println!();
    println!(
        "  {:24}  {:12}  {:26}  {}",
        "Name", "Default", "Range", "Description"
    );
    println!(
        "  {:24}  {:12}  {:26}  {}",
        "----", "-------", "-----", "-----------"
    );
    for option in kind.options() {
        println!(
            "  {:24}  {:12}  {:26}  {}",
            option.name,
            option.default,
            range(option),
            option.help
        );
    }

    if kind == FilterKind::Tuner {
        println!();
        println!("Reverb patterns:");
        for (id, name) in reverb_pattern::NAMED {
            println!("  {id}  {name}");
        }
    }

    println!();
    println!("Example usage:");
    println!();
    let example = kind
        .options()
        .iter()
        .take(2)
        .map(|o| format!("{}={}", o.name, o.default))
        .collect::<Vec<_>>()
        .join(":");
    println!(
        "  fxbridge process input.wav output.wav --filter {}={}",
        kind.name(),
        example
    );
    if kind == FilterKind::Tuner {
        println!(
            "  fxbridge process input.wav output.wav --filter tuner --eq 3:255:255:255:255:255:255:255:255:-3"
        );
    }

    Ok(())
}

fn range(option: &OptionInfo) -> String {
    format!("[{}, {}]", option.min, option.max)
}
