// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! skey-relay CLI
//!
//! Host adapter for script-based proxy engines: one intercepted request
//! in as JSON, one decision out as JSON.

use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};

use skey_relay::http::upsert_cookie_attribute;
use skey_relay::{
    Dispatcher, FileStore, HttpClient, InterceptedRequest, KeyValueStore, LocalHost, RelayConfig,
};

const DEFAULT_STORE: &str = "skey-relay.json";

/// Options shared by every command
struct Options {
    config: Option<PathBuf>,
    store: PathBuf,
}

impl Options {
    /// Pull `--config`/`--store` out of `args`, leaving the rest in place
    fn extract(args: &mut Vec<String>) -> anyhow::Result<Self> {
        let config = take_flag(args, "--config")?
            .or_else(|| env::var("SKEY_RELAY_CONFIG").ok())
            .map(PathBuf::from);
        let store = take_flag(args, "--store")?
            .or_else(|| env::var("SKEY_RELAY_STORE").ok())
            .unwrap_or_else(|| DEFAULT_STORE.to_string());

        Ok(Self {
            config,
            store: PathBuf::from(store),
        })
    }

    fn relay_config(&self) -> anyhow::Result<RelayConfig> {
        match self.config {
            Some(ref path) => RelayConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(RelayConfig::default()),
        }
    }

    fn open_store(&self) -> anyhow::Result<FileStore> {
        FileStore::new(&self.store)
            .with_context(|| format!("opening store {}", self.store.display()))
    }
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> anyhow::Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("{} needs a value", flag);
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for the decision
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skey_relay=info".parse().unwrap()),
        )
        .init();

    let mut args: Vec<String> = env::args().collect();
    let options = match Options::extract(&mut args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(2);
        }
    };

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "handle" => handle(&options, args.get(2).map(String::as_str)).await,
        "show" => show(&options),
        "routes" => {
            if args.len() < 3 {
                eprintln!("Usage: skey-relay routes <url>");
                return ExitCode::from(1);
            }
            routes(&options, &args[2])
        }
        "rewrite-cookie" => {
            if args.len() < 4 {
                eprintln!("Usage: skey-relay rewrite-cookie <cookie> <skey>");
                return ExitCode::from(1);
            }
            rewrite_cookie(&options, &args[2], &args[3])
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        "--version" | "-v" | "version" => {
            println!("skey-relay {}", skey_relay::VERSION);
            Ok(ExitCode::SUCCESS)
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Ok(ExitCode::from(1))
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn print_usage() {
    println!(
        r#"skey-relay - WeRead skey capture and injection relay

USAGE:
    skey-relay [--config <file>] [--store <file>] <COMMAND>

COMMANDS:
    handle [file]                    Run one intercepted request (JSON, stdin if no file)
    show                             Print the stored skey
    routes <url>                     Show which routes a URL matches
    rewrite-cookie <cookie> <skey>   Preview the Cookie rewrite
    help                             Show this help message
    version                          Show version information

ENVIRONMENT:
    SKEY_RELAY_CONFIG   Config file used when --config is not given
    SKEY_RELAY_STORE    Store file used when --store is not given (default: {})
    RUST_LOG            Log filter (logs go to stderr)

EXAMPLES:
    echo '{{"url":"https://i.weread.qq.com/pay/balance","headers":{{"User-Agent":"WeRead/8.2","skey":"abc"}}}}' \
        | skey-relay handle
    skey-relay routes "https://i.weread.qq.com/book/info?bookId=1"
    skey-relay rewrite-cookie "wr_vid=1; wr_skey=old" new
"#,
        DEFAULT_STORE
    );
}

async fn handle(options: &Options, input: Option<&str>) -> anyhow::Result<ExitCode> {
    let json = match input {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading request from stdin")?;
            buf
        }
    };

    let request = InterceptedRequest::from_json(&json).context("parsing request")?;
    let config = options.relay_config()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(options.open_store()?);
    let host = Arc::new(LocalHost::new(store, HttpClient::new()?));
    let dispatcher = Dispatcher::new(&config, host)?;

    let decision = dispatcher.serve(&request).await;
    println!("{}", decision.to_json());

    Ok(ExitCode::SUCCESS)
}

fn show(options: &Options) -> anyhow::Result<ExitCode> {
    let config = options.relay_config()?;
    let store = options.open_store()?;

    match store.get(&config.store_key)? {
        Some(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No skey stored under {}", config.store_key);
            Ok(ExitCode::from(1))
        }
    }
}

fn routes(options: &Options, url: &str) -> anyhow::Result<ExitCode> {
    let config = options.relay_config()?;
    let routes = config.classifier()?.classify(url);

    println!("{}", routes);
    for route in routes.iter() {
        let role = if route == config.capture_route {
            "capture"
        } else if config.relay_routes.contains(&route) {
            "relay"
        } else {
            "unbound"
        };
        println!("  {:<18} {}", route.as_str(), role);
    }

    Ok(ExitCode::SUCCESS)
}

fn rewrite_cookie(options: &Options, cookie: &str, skey: &str) -> anyhow::Result<ExitCode> {
    let config = options.relay_config()?;
    println!(
        "{}",
        upsert_cookie_attribute(cookie, &config.cookie_attribute, skey)
    );
    Ok(ExitCode::SUCCESS)
}
