// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! BeeRRy CLI
//!
//! Drives the security guard from the command line. Secure entries persist
//! in a JSON file (`BEERRY_STORE`, default `.beerry-store.json`).

use std::env;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use serde_json::Value;

use beerry::dom::parse_html;
use beerry::{Guard, JsonFileStorage, StaticEnvironment};

/// Default location of the persistent store
const DEFAULT_STORE: &str = ".beerry-store.json";

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("beerry=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "token" => generate_token(args.get(2)),
        "session" => session_token(),
        "hash" => with_arg(&args, "hash <text>", |text| {
            println!("{}", Guard::new().hash(text));
            Ok(())
        }),
        "encrypt" => with_arg(&args, "encrypt <json> [key]", |data| {
            encrypt(data, args.get(3))
        }),
        "decrypt" => with_arg(&args, "decrypt <blob> [key]", |blob| {
            decrypt(blob, args.get(3))
        }),
        "store" => {
            if args.len() < 4 {
                eprintln!("Usage: beerry store <name> <json>");
                return ExitCode::from(1);
            }
            store(&args[2], &args[3])
        }
        "retrieve" => with_arg(&args, "retrieve <name>", retrieve),
        "clear" => with_arg(&args, "clear <name>", clear),
        "clear-all" => clear_all(),
        "list" => list(),
        "email" => with_arg(&args, "email <address>", |text| {
            let valid = Guard::new().validate_email(text);
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(())
        }),
        "password" => with_arg(&args, "password <password>", password),
        "xss" => with_arg(&args, "xss <text>", xss),
        "sanitize" => with_arg(&args, "sanitize <text>", |text| {
            println!("{}", Guard::new().sanitize_html(text));
            Ok(())
        }),
        "info" => info(args.get(2)),
        "init" => with_arg(&args, "init <html-file> [url]", |path| {
            init_page(path, args.get(3))
        }),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-v" | "version" => {
            println!("beerry {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"BeeRRy - profile page security helpers

USAGE:
    beerry <COMMAND> [ARGS]

COMMANDS:
    token [length]          Generate a secure alphanumeric token (default 32)
    session                 Generate a session token
    hash <text>             Rolling hash of text in base36
    encrypt <json> [key]    Obfuscate a JSON value (non-JSON is taken as a string)
    decrypt <blob> [key]    Decode an obfuscated blob
    store <name> <json>     Store an obfuscated entry in the persistent store
    retrieve <name>         Read an obfuscated entry
    clear <name>            Remove one entry
    clear-all               Remove every secure entry
    list                    List secure entry names
    email <address>         Check an email address
    password <password>     Score a password
    xss <text>              Scan text for XSS patterns
    sanitize <text>         Escape text for insertion as markup
    info [url]              Show the environment snapshot
    init <html-file> [url]  Initialize a page and print the resulting HTML
    help                    Show this help message
    version                 Show version information

ENVIRONMENT:
    BEERRY_STORE            Persistent store file (default .beerry-store.json)
    RUST_LOG                Log filter (default beerry=info)

EXAMPLES:
    beerry store profile '{{"theme":"dark"}}'
    beerry retrieve profile
    beerry xss "<img src=x onerror=alert(1)>"
"#
    );
}

/// Run `f` on `args[2]`, or print usage
fn with_arg<F>(args: &[String], usage: &str, f: F) -> anyhow::Result<()>
where
    F: FnOnce(&str) -> anyhow::Result<()>,
{
    match args.get(2) {
        Some(arg) => f(arg),
        None => bail!("missing argument\nUsage: beerry {}", usage),
    }
}

/// Guard over the JSON file store
fn persistent_guard() -> anyhow::Result<Guard> {
    let path = env::var("BEERRY_STORE").unwrap_or_else(|_| DEFAULT_STORE.to_string());
    let store = JsonFileStorage::open(&path)
        .with_context(|| format!("cannot open store {}", path))?;
    Ok(Guard::builder().persistent_store(Arc::new(store)).build()?)
}

/// Parse `arg` as JSON, falling back to a plain string
fn json_arg(arg: &str) -> Value {
    serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string()))
}

fn generate_token(length: Option<&String>) -> anyhow::Result<()> {
    let guard = Guard::new();
    let token = match length {
        Some(len) => {
            let len: usize = len.parse().with_context(|| format!("invalid length '{}'", len))?;
            guard.generate_secure_token_len(len)
        }
        None => guard.generate_secure_token(),
    };
    println!("{}", token);
    Ok(())
}

fn session_token() -> anyhow::Result<()> {
    let token = Guard::new()
        .generate_session_token()
        .context("session store refused the token")?;
    println!("{}", token);
    Ok(())
}

fn encrypt(data: &str, key: Option<&String>) -> anyhow::Result<()> {
    let guard = Guard::new();
    let value = json_arg(data);
    let blob = match key {
        Some(key) => guard.encrypt_with_key(&value, key),
        None => guard.encrypt(&value),
    };
    println!("{}", blob.context("encryption failed")?);
    Ok(())
}

fn decrypt(blob: &str, key: Option<&String>) -> anyhow::Result<()> {
    let guard = Guard::new();
    let value: Option<Value> = match key {
        Some(key) => guard.decrypt_with_key(blob, key),
        None => guard.decrypt(blob),
    };
    println!("{}", value.context("decryption failed")?);
    Ok(())
}

fn store(name: &str, data: &str) -> anyhow::Result<()> {
    let guard = persistent_guard()?;
    if !guard.store_secure(name, &json_arg(data)) {
        bail!("could not store '{}'", name);
    }
    println!("Stored {}", name);
    Ok(())
}

fn retrieve(name: &str) -> anyhow::Result<()> {
    let guard = persistent_guard()?;
    match guard.retrieve_secure_value(name) {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => bail!("no readable entry '{}'", name),
    }
    Ok(())
}

fn clear(name: &str) -> anyhow::Result<()> {
    if !persistent_guard()?.clear_secure(name) {
        bail!("could not clear '{}'", name);
    }
    println!("Cleared {}", name);
    Ok(())
}

fn clear_all() -> anyhow::Result<()> {
    let removed = persistent_guard()?.clear_all_secure();
    println!("Cleared {} entries", removed);
    Ok(())
}

fn list() -> anyhow::Result<()> {
    for name in persistent_guard()?.list_secure() {
        println!("{}", name);
    }
    Ok(())
}

fn password(password: &str) -> anyhow::Result<()> {
    let assessment = Guard::new().check_password_strength(password);
    println!("Strength: {} ({}/6) {}", assessment.level, assessment.score, assessment.color);
    for tip in &assessment.feedback {
        println!("  - {}", tip);
    }
    Ok(())
}

fn xss(text: &str) -> anyhow::Result<()> {
    let matches = Guard::new().scan_xss(text);
    if matches.is_empty() {
        println!("No XSS patterns found");
        return Ok(());
    }

    println!("=== XSS patterns ({}) ===", matches.len());
    for m in &matches {
        println!("  - {} at {}: {}", m.pattern, m.offset, m.fragment);
    }
    Ok(())
}

fn info(url: Option<&String>) -> anyhow::Result<()> {
    let env = match url {
        Some(url) => StaticEnvironment::from_url(url)?,
        None => StaticEnvironment::default(),
    };
    let guard = Guard::builder().environment(Arc::new(env)).build()?;
    println!("{}", serde_json::to_string_pretty(&guard.security_info())?);
    Ok(())
}

fn init_page(path: &str, url: Option<&String>) -> anyhow::Result<()> {
    let html = fs::read_to_string(path).with_context(|| format!("cannot read {}", path))?;
    let document = Arc::new(parse_html(&html)?);

    let env = match url {
        Some(url) => StaticEnvironment::from_url(url)?,
        None => StaticEnvironment::default(),
    };
    let guard = Guard::builder()
        .document(document.clone())
        .environment(Arc::new(env))
        .build()?;

    let report = guard.init();
    eprintln!("{}", serde_json::to_string_pretty(&report)?);
    println!("{}", document.outer_html());
    Ok(())
}
