use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use linkam_builder::{write_all, IocBuild, IocDefinition};
use linkam_descriptor::ARG_INFO;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to the IOC definition (YAML)")
}

fn cli() -> Command {
    Command::new("linkam-builder")
        .version(linkam_builder::VERSION)
        .about("Generate Linkam T96 substitutions and boot-script fragments")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("generate")
                .about("Validate the IOC definition and write all outputs")
                .arg(config_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .default_value(".")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate the IOC definition without writing anything")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("startup")
                .about("Print the boot-script fragment to stdout")
                .arg(config_arg()),
        )
        .subcommand(Command::new("describe").about("List the device parameters"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_build(args: &ArgMatches) -> Result<IocBuild> {
    let path = args
        .get_one::<PathBuf>("config")
        .context("missing --config")?;
    let definition = IocDefinition::load(path)?;
    let build = IocBuild::new(definition)
        .with_context(|| format!("failed to build {}", path.display()))?;
    Ok(build)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("generate", args)) => {
            let build = load_build(args)?;
            let out = args
                .get_one::<PathBuf>("out")
                .context("missing --out")?;
            let files = write_all(&build, out)?;

            println!("{}", files.substitutions.display());
            println!("{}", files.startup.display());
            println!("{}", files.manifest.display());
        }
        Some(("check", args)) => {
            let build = load_build(args)?;
            println!(
                "{}: {} device(s), {} virtual port(s), dbd: {}",
                build.ioc_name(),
                build.devices().len(),
                build.virtual_port_count(),
                build.dependencies().dbd_files.join(" ")
            );
        }
        Some(("startup", args)) => {
            let build = load_build(args)?;
            print!("{}", build.render_startup());
        }
        Some(("describe", _)) => {
            println!("{:<14} {:<5} {:<14} DESCRIPTION", "KEY", "TYPE", "DEFAULT");
            for info in &ARG_INFO {
                println!(
                    "{:<14} {:<5} {:<14} {}",
                    info.key,
                    info.kind.to_string(),
                    info.default.unwrap_or("-"),
                    info.description
                );
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn generate_defaults_to_current_dir() {
        let matches = cli()
            .try_get_matches_from(["linkam-builder", "generate", "--config", "ioc.yaml"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<PathBuf>("out"), Some(&PathBuf::from(".")));
    }

    #[test]
    fn check_requires_config() {
        assert!(cli().try_get_matches_from(["linkam-builder", "check"]).is_err());
    }
}
