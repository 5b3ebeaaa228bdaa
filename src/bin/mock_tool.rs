//! Mock external tool for integration testing
//!
//! A controllable child process so the test suite does not depend on which
//! system tools are installed. Flags are processed in order, so behaviors
//! compose: `--out ready --sleep-forever` prints a readiness marker and
//! then hangs until terminated.

use std::io::{BufRead, Write};
use std::time::Duration;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut exit_code = 0;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            // Print one line to stdout
            "--out" => {
                i += 1;
                println!("{}", arg(&args, i));
            }
            // Print one line to stderr
            "--err" => {
                i += 1;
                eprintln!("{}", arg(&args, i));
            }
            // Print N numbered lines to stdout as fast as possible
            "--burst" => {
                i += 1;
                let n: usize = arg(&args, i).parse().unwrap_or(0);
                let stdout = std::io::stdout();
                let mut writer = stdout.lock();
                for k in 0..n {
                    writeln!(writer, "line {k}").ok();
                }
            }
            // Echo stdin lines until end-of-input
            "--echo-stdin" => {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    match line {
                        Ok(l) => println!("echo: {l}"),
                        Err(_) => break,
                    }
                }
            }
            "--sleep-ms" => {
                i += 1;
                let ms: u64 = arg(&args, i).parse().unwrap_or(0);
                std::thread::sleep(Duration::from_millis(ms));
            }
            "--sleep-forever" => loop {
                std::thread::sleep(Duration::from_secs(3600));
            },
            // Print NAME=VALUE for an environment variable, if set
            "--print-env" => {
                i += 1;
                let name = arg(&args, i);
                if let Ok(value) = std::env::var(name) {
                    println!("{name}={value}");
                }
            }
            "--print-cwd" => {
                if let Ok(dir) = std::env::current_dir() {
                    println!("cwd={}", dir.display());
                }
            }
            // Create an empty file, proving this step ran
            "--touch" => {
                i += 1;
                std::fs::write(arg(&args, i), b"").ok();
            }
            "--exit" => {
                i += 1;
                exit_code = arg(&args, i).parse().unwrap_or(0);
            }
            _ => {}
        }
        i += 1;
    }

    std::process::exit(exit_code);
}

fn arg<'a>(args: &'a [String], i: usize) -> &'a str {
    args.get(i).map(String::as_str).unwrap_or("")
}
