use std::env;
use std::process;
use std::sync::Arc;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use slack::{ClientConfig, Directory, Group, GroupId, RestTransport, SlackError};

const USAGE: &str = "usage: cli [--token <token>] <command>

commands:
  list                     show known groups, channels, and users
  close <group-id>         close a private group
  open <group-id>          re-open a private group
  archive <group-id>       archive a private group
  unarchive <group-id>     unarchive a private group
  create-child <group-id>  clone a group into an empty child

The token is read from --token or the SLACK_TOKEN environment variable.
Completion payloads are written to stderr at debug level.";

fn main() {
    let _ = TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    if let Err(err) = run() {
        eprintln!("{}", err);
        eprintln!();
        eprintln!("{}", USAGE);
        process::exit(1);
    }
}

fn run() -> slack::Result<()> {
    let (token, positionals) = parse_args()?;

    let command = positionals
        .first()
        .map(String::as_str)
        .ok_or_else(|| SlackError::Config("no command given".to_string()))?;

    let config = ClientConfig::new(token);
    let transport = Arc::new(RestTransport::new(config)?);

    match command {
        "list" => {
            let directory = Directory::new();
            directory.load_from(&transport)?;

            println!("groups:");
            for group in directory.all_groups() {
                println!("  {}  {}", group.id, group.name);
            }
            println!("channels:");
            for channel in directory.all_channels() {
                println!("  {}  #{}", channel.id, channel.name);
            }
            println!("users:");
            for user in directory.all_users() {
                println!("  {}  @{}", user.id, user.name);
            }
        }
        "close" | "open" | "archive" | "unarchive" | "create-child" => {
            let id = positionals
                .get(1)
                .ok_or_else(|| SlackError::Config(format!("{} needs a group id", command)))?;

            let group = Group::from_id(GroupId::new(id.clone()), transport.clone());
            match command {
                "close" => group.close(),
                "open" => group.open(),
                "archive" => group.archive(),
                "unarchive" => group.unarchive(),
                _ => group.create_child(),
            }
        }
        other => {
            return Err(SlackError::Config(format!("unknown command: {}", other)));
        }
    }

    // Drains the queue so fire-and-forget completions get logged before exit
    transport.shutdown();
    Ok(())
}

fn parse_args() -> slack::Result<(String, Vec<String>)> {
    let mut token = env::var("SLACK_TOKEN").ok();
    let mut positionals = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--token" => {
                token = Some(args.next().ok_or_else(|| {
                    SlackError::Config("--token needs a value".to_string())
                })?);
            }
            _ => positionals.push(arg),
        }
    }

    let token = token.ok_or_else(|| {
        SlackError::Config("no token: pass --token or set SLACK_TOKEN".to_string())
    })?;

    Ok((token, positionals))
}
