//! Build script for softpwm-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates pwm.toml and generates its constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let settings = validate_config();
    generate_constants(&settings);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated values from pwm.toml
struct Settings {
    tick_interval_us: u32,
    tick_ceiling: u16,
    start_on: bool,
    baudrate: u32,
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate pwm.toml configuration at compile time
fn validate_config() -> Settings {
    println!("cargo:rerun-if-changed=pwm.toml");

    let config_path = Path::new("pwm.toml");

    if !config_path.exists() {
        fail(
            "pwm.toml not found!",
            &["Create pwm.toml in the softpwm-firmware directory".to_string()],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read pwm.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in pwm.toml",
            &e.to_string().lines().map(truncate).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    let engine = section(&config, "engine", &mut errors);
    let serial = section(&config, "serial", &mut errors);

    let tick_interval_us = integer(engine, "engine", "tick_interval_us", 1, u32::MAX as i64, &mut errors);
    let tick_ceiling = integer(engine, "engine", "tick_ceiling", 1, u16::MAX as i64, &mut errors);
    let baudrate = integer(serial, "serial", "baudrate", 300, 3_000_000, &mut errors);

    let start_on = match engine.and_then(|t| t.get("start_policy")) {
        None => false,
        Some(toml::Value::String(policy)) if policy == "off" => false,
        Some(toml::Value::String(policy)) if policy == "on" => true,
        Some(_) => {
            errors.push("[engine] start_policy must be 'off' or 'on'".to_string());
            false
        }
    };

    if !errors.is_empty() {
        fail("Invalid configuration in pwm.toml", &errors);
    }

    println!("cargo:warning=pwm.toml validated successfully");

    Settings {
        tick_interval_us: tick_interval_us as u32,
        tick_ceiling: tick_ceiling as u16,
        start_on,
        baudrate: baudrate as u32,
    }
}

fn truncate(line: &str) -> String {
    if line.len() > 62 {
        format!("{}...", &line[..59])
    } else {
        line.to_string()
    }
}

/// Look up a required `[name]` table
fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::map::Map<String, toml::Value>> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => {
            errors.push(format!("Missing [{}] section", name));
            None
        }
    }
}

/// Read a required integer key and check its range
fn integer(
    table: Option<&toml::map::Map<String, toml::Value>>,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    let Some(table) = table else {
        return min;
    };

    match table.get(key) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

/// Write the validated settings as Rust constants
fn generate_constants(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let start = if settings.start_on { "On" } else { "Off" };

    let generated = format!(
        "// Generated from pwm.toml by build.rs\n\
        pub const TICK_INTERVAL_US: u32 = {};\n\
        pub const TICK_CEILING: u16 = {};\n\
        pub const START_POLICY: softpwm_core::StartPolicy = softpwm_core::StartPolicy::{};\n\
        pub const BAUDRATE: u32 = {};\n",
        settings.tick_interval_us, settings.tick_ceiling, start, settings.baudrate,
    );

    fs::write(out_dir.join("pwm_config.rs"), generated).unwrap();
}
